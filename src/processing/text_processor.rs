//! Text validation, normalization and tokenization

use crate::error::{Result, ResumeScannerError};
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

pub struct TextProcessor {
    term_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        // Terms are runs of two or more word characters.
        let term_regex = Regex::new(r"\b\w\w+\b").expect("Invalid term regex");

        Self { term_regex }
    }

    /// Accept raw bytes only if they decode to usable text
    pub fn validate_bytes<'a>(&self, bytes: &'a [u8]) -> Result<&'a str> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            ResumeScannerError::MalformedText(format!(
                "input is not valid UTF-8 (first bad byte at offset {})",
                e.valid_up_to()
            ))
        })?;
        self.validate_text(text)
    }

    pub fn validate_text<'a>(&self, text: &'a str) -> Result<&'a str> {
        if let Some(offset) = text.find('\0') {
            return Err(ResumeScannerError::MalformedText(format!(
                "input contains a NUL character at offset {}",
                offset
            )));
        }
        Ok(text)
    }

    /// Lower-cased scoring terms, in document order
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.term_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    pub fn word_count(&self, text: &str) -> usize {
        text.unicode_words().count()
    }

    /// Fold typographic characters common in PDF output to plain ASCII
    pub fn normalize(&self, text: &str) -> String {
        let mut normalized = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '\u{2018}' | '\u{2019}' => normalized.push('\''),
                '\u{201C}' | '\u{201D}' => normalized.push('"'),
                '\u{2013}' | '\u{2014}' => normalized.push('-'),
                '\u{2022}' | '\u{25CF}' => normalized.push('-'),
                '\u{2026}' => normalized.push_str("..."),
                '\u{FB01}' => normalized.push_str("fi"),
                '\u{FB02}' => normalized.push_str("fl"),
                '\u{00A0}' => normalized.push(' '),
                '\r' => {}
                _ => normalized.push(c),
            }
        }
        normalized
    }
}
