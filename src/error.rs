//! Error handling for the resume scanner

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeScannerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Input bytes are not usable text; raised before categorization starts.
    #[error("Malformed text: {0}")]
    MalformedText(String),

    /// Nothing to compare or nothing to average.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeScannerError>;

impl From<regex::Error> for ResumeScannerError {
    fn from(err: regex::Error) -> Self {
        ResumeScannerError::Configuration(format!("Invalid pattern: {}", err))
    }
}
