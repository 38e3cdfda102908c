//! Immutable runtime form of the configuration

use crate::config::{AbsentCategoryPolicy, Config, ScoringConfig, ScoringStrategy};
use crate::error::Result;
use crate::processing::category::CategorySet;

/// Compiled categories and scoring settings, built once at startup and
/// shared by reference with every evaluation.
#[derive(Debug, Clone)]
pub struct ScanProfile {
    categories: CategorySet,
    scoring: ScoringConfig,
}

impl ScanProfile {
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            categories: CategorySet::from_config(&config.categories)?,
            scoring: config.scoring.clone(),
        })
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    pub fn strategy(&self) -> ScoringStrategy {
        self.scoring.strategy
    }

    pub fn absent_policy(&self) -> AbsentCategoryPolicy {
        self.scoring.absent_categories
    }
}
