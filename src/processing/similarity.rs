//! Per-section similarity scoring

use crate::config::{ScoringConfig, ScoringStrategy};
use crate::processing::category::Category;
use crate::processing::text_processor::TextProcessor;
use std::collections::{BTreeMap, BTreeSet};

pub const MAX_SCORE: f64 = 100.0;

/// Scores a candidate fragment against the matching reference fragment.
///
/// Implementations must be deterministic and return a value in `[0, 100]`.
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, category: &Category, candidate: &str, reference: Option<&str>) -> f64;

    fn strategy(&self) -> ScoringStrategy;
}

pub fn scorer_for(config: &ScoringConfig) -> Box<dyn SimilarityScorer> {
    match config.strategy {
        ScoringStrategy::Tfidf => Box::new(TfIdfScorer::new()),
        ScoringStrategy::KeywordFrequency => {
            Box::new(KeywordFrequencyScorer::new(config.keyword_match_weight))
        }
    }
}

/// Cosine similarity over a TF-IDF space built from just the two fragments.
///
/// Raw term counts, smoothed IDF `ln((1 + n) / (1 + df)) + 1` with `n = 2`.
pub struct TfIdfScorer {
    processor: TextProcessor,
}

impl Default for TfIdfScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfIdfScorer {
    const CORPUS_SIZE: f64 = 2.0;

    pub fn new() -> Self {
        Self {
            processor: TextProcessor::new(),
        }
    }

    pub fn similarity(&self, candidate: &str, reference: &str) -> f64 {
        let left = self.term_counts(candidate);
        let right = self.term_counts(reference);

        // A fragment without terms has a zero vector.
        if left.is_empty() || right.is_empty() {
            return 0.0;
        }

        let vocabulary: BTreeSet<&str> = left
            .keys()
            .chain(right.keys())
            .map(String::as_str)
            .collect();

        let mut dot = 0.0;
        let mut left_norm = 0.0;
        let mut right_norm = 0.0;

        for term in vocabulary {
            let tf_left = left.get(term).copied().unwrap_or(0) as f64;
            let tf_right = right.get(term).copied().unwrap_or(0) as f64;

            let df = (tf_left > 0.0) as u8 + (tf_right > 0.0) as u8;
            let idf = ((1.0 + Self::CORPUS_SIZE) / (1.0 + df as f64)).ln() + 1.0;

            let w_left = tf_left * idf;
            let w_right = tf_right * idf;

            dot += w_left * w_right;
            left_norm += w_left * w_left;
            right_norm += w_right * w_right;
        }

        // sqrt(a * a) == a, so identical fragments land on exactly 100.
        let denominator = (left_norm * right_norm).sqrt();
        if denominator == 0.0 {
            return 0.0;
        }

        (dot / denominator * MAX_SCORE).clamp(0.0, MAX_SCORE)
    }

    fn term_counts(&self, text: &str) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for term in self.processor.tokenize(text) {
            *counts.entry(term).or_insert(0) += 1;
        }
        counts
    }
}

impl SimilarityScorer for TfIdfScorer {
    fn score(&self, _category: &Category, candidate: &str, reference: Option<&str>) -> f64 {
        match reference {
            Some(reference) => self.similarity(candidate, reference),
            None => 0.0,
        }
    }

    fn strategy(&self) -> ScoringStrategy {
        ScoringStrategy::Tfidf
    }
}

/// Intrinsic score: keyword hits in the candidate fragment times a fixed
/// weight, capped at 100. The reference fragment is ignored.
pub struct KeywordFrequencyScorer {
    weight: f64,
}

impl KeywordFrequencyScorer {
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl SimilarityScorer for KeywordFrequencyScorer {
    fn score(&self, category: &Category, candidate: &str, _reference: Option<&str>) -> f64 {
        let matches = category.keyword_count(candidate) as f64;
        (matches * self.weight).clamp(0.0, MAX_SCORE)
    }

    fn strategy(&self) -> ScoringStrategy {
        ScoringStrategy::KeywordFrequency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CategoryConfig, Config};

    fn education() -> Category {
        Category::from_config(&CategoryConfig {
            name: "Education".to_string(),
            aliases: Vec::new(),
            keywords: r"education|university|degree|phd".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_identical_fragments_score_100() {
        let scorer = TfIdfScorer::new();
        for fragment in [
            "Education BS Computer Science ",
            "Projects Built a compiler and a compiler test suite ",
            "rust",
        ] {
            assert_eq!(scorer.similarity(fragment, fragment), 100.0);
        }
    }

    #[test]
    fn test_empty_fragments_score_zero() {
        let scorer = TfIdfScorer::new();

        let score = scorer.similarity("", "");
        assert_eq!(score, 0.0);
        assert!(!score.is_nan());

        assert_eq!(scorer.similarity("Education PhD", ""), 0.0);
        assert_eq!(scorer.similarity("", "Education PhD"), 0.0);
        // single-character tokens are not terms
        assert_eq!(scorer.similarity("a b c", "a b c"), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        let scorer = TfIdfScorer::new();

        // shared "rust" has idf 1, the others ln(3/2) + 1
        let score = scorer.similarity("rust compiler", "rust parser");
        assert!((score - 33.6096).abs() < 1e-3, "got {}", score);

        assert_eq!(scorer.similarity("rust compiler", "rust parser"), scorer.similarity("rust parser", "rust compiler"));
    }

    #[test]
    fn test_disjoint_and_case_insensitive() {
        let scorer = TfIdfScorer::new();

        assert_eq!(scorer.similarity("python django", "rust tokio"), 0.0);
        assert_eq!(scorer.similarity("RUST Tokio", "rust tokio"), 100.0);
    }

    #[test]
    fn test_term_frequency_matters() {
        let scorer = TfIdfScorer::new();

        let once = scorer.similarity("rust go", "rust");
        let twice = scorer.similarity("rust rust go", "rust");
        assert!(twice > once);
        assert!(twice < 100.0);
    }

    #[test]
    fn test_tfidf_without_reference() {
        let scorer = TfIdfScorer::new();
        assert_eq!(scorer.score(&education(), "Education PhD", None), 0.0);
        assert_eq!(scorer.strategy(), ScoringStrategy::Tfidf);
    }

    #[test]
    fn test_keyword_frequency() {
        let scorer = KeywordFrequencyScorer::new(20.0);
        let category = education();

        assert_eq!(scorer.score(&category, "", None), 0.0);
        assert_eq!(scorer.score(&category, "Education: PhD, University of Somewhere", None), 60.0);
        assert_eq!(
            scorer.score(&category, "degree degree degree degree degree degree", Some("ignored")),
            100.0
        );
    }

    #[test]
    fn test_scorer_for_follows_config() {
        let mut config = Config::default().scoring;
        assert_eq!(scorer_for(&config).strategy(), ScoringStrategy::Tfidf);

        config.strategy = ScoringStrategy::KeywordFrequency;
        assert_eq!(scorer_for(&config).strategy(), ScoringStrategy::KeywordFrequency);
    }
}
