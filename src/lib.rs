//! Resume scanner library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use error::{Result, ResumeScannerError};
pub use config::Config;
pub use processing::{EvaluationResult, Evaluator, ScanProfile};
