//! CLI interface for the resume scanner

use crate::config::{AbsentCategoryPolicy, OutputFormat, ScoringStrategy};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-scanner")]
#[command(about = "Score a resume section by section against a reference resume")]
#[command(long_about = "Split a candidate resume and a reference (sample) resume into sections, score each section's similarity and report the overall score")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume against a reference resume
    Scan {
        /// Path to the candidate resume (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to the reference resume (PDF, TXT, MD)
        #[arg(short = 'S', long)]
        sample: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Include per-section details and metadata
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Scoring strategy: tfidf, keyword
        #[arg(long)]
        strategy: Option<String>,

        /// Leave sections absent from both resumes out of the overall score
        #[arg(long)]
        exclude_absent: bool,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

pub fn parse_strategy(strategy: &str) -> Result<ScoringStrategy, String> {
    match strategy.to_lowercase().as_str() {
        "tfidf" | "tf-idf" => Ok(ScoringStrategy::Tfidf),
        "keyword" | "keywords" | "keyword_frequency" => Ok(ScoringStrategy::KeywordFrequency),
        _ => Err(format!(
            "Invalid scoring strategy: {}. Supported: tfidf, keyword",
            strategy
        )),
    }
}

pub fn absent_policy(exclude_absent: bool, configured: AbsentCategoryPolicy) -> AbsentCategoryPolicy {
    if exclude_absent {
        AbsentCategoryPolicy::Exclude
    } else {
        configured
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
