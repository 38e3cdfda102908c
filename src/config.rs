//! Configuration management for the resume scanner

use crate::error::{Result, ResumeScannerError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub categories: Vec<CategoryConfig>,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

/// One resume section. Order in the list is heading-detection priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    /// Extra literal heading texts that also open this section.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Case-insensitive regex used by the keyword-frequency scorer.
    pub keywords: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub strategy: ScoringStrategy,
    pub absent_categories: AbsentCategoryPolicy,
    pub keyword_match_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// Cosine similarity over a two-document TF-IDF space.
    Tfidf,
    /// Weighted count of category keywords in the candidate fragment.
    KeywordFrequency,
}

/// How categories missing from both documents enter the overall mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsentCategoryPolicy {
    CountAsZero,
    Exclude,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let category = |name: &str, keywords: &str| CategoryConfig {
            name: name.to_string(),
            aliases: Vec::new(),
            keywords: keywords.to_string(),
        };

        Self {
            categories: vec![
                category("Education", r"education|university|college|degree|bachelor|master|phd"),
                category("Projects", r"project|developed|implemented|created|built"),
                category("Work Experience", r"experience|work|job|position|employment|company"),
                category("Technical Skills", r"skills|technologies|programming|software|technical"),
                category("Achievements", r"achievement|award|honor|certification|accomplishment"),
                category("Publications", r"publication|published|journal|conference|paper|article"),
                category("Online Presence", r"github|linkedin|portfolio|website|blog|stack\s?overflow"),
            ],
            scoring: ScoringConfig {
                strategy: ScoringStrategy::Tfidf,
                absent_categories: AbsentCategoryPolicy::CountAsZero,
                keyword_match_weight: 20.0,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            ResumeScannerError::Configuration(format!(
                "Failed to parse config '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeScannerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-scanner")
            .join("config.toml")
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(ResumeScannerError::Configuration(
                "At least one category must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            let name = category.name.trim();
            if name.is_empty() {
                return Err(ResumeScannerError::Configuration(
                    "Category names must not be empty".to_string(),
                ));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(ResumeScannerError::Configuration(format!(
                    "Duplicate category: {}",
                    name
                )));
            }
            if category.aliases.iter().any(|alias| alias.trim().is_empty()) {
                return Err(ResumeScannerError::Configuration(format!(
                    "Category '{}' has an empty alias",
                    name
                )));
            }
        }

        let weight = self.scoring.keyword_match_weight;
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ResumeScannerError::Configuration(format!(
                "keyword_match_weight must be positive, got {}",
                weight
            )));
        }

        Ok(())
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }
}
