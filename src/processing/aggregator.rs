//! Per-category score map and overall score aggregation

use crate::config::AbsentCategoryPolicy;
use crate::error::{Result, ResumeScannerError};
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub category: String,
    pub score: f64,
    /// Neither document had text for this category.
    pub absent: bool,
}

/// Category -> score, in configured category order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreMap {
    entries: Vec<CategoryScore>,
}

impl ScoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the score for `category`.
    pub fn insert(&mut self, category: impl Into<String>, score: f64, absent: bool) {
        let category = category.into();
        match self.entries.iter_mut().find(|e| e.category == category) {
            Some(entry) => {
                entry.score = score;
                entry.absent = absent;
            }
            None => self.entries.push(CategoryScore {
                category,
                score,
                absent,
            }),
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.score)
    }

    pub fn entries(&self) -> &[CategoryScore] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ScoreMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.category, &entry.score)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    policy: AbsentCategoryPolicy,
}

impl Aggregator {
    pub fn new(policy: AbsentCategoryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> AbsentCategoryPolicy {
        self.policy
    }

    /// Arithmetic mean of the entries the policy counts.
    pub fn aggregate(&self, scores: &ScoreMap) -> Result<f64> {
        let counted: Vec<f64> = scores
            .entries()
            .iter()
            .filter(|e| match self.policy {
                AbsentCategoryPolicy::CountAsZero => true,
                AbsentCategoryPolicy::Exclude => !e.absent,
            })
            .map(|e| if e.absent { 0.0 } else { e.score })
            .collect();

        if counted.is_empty() {
            return Err(ResumeScannerError::EmptyInput(format!(
                "no category scores to aggregate ({} entries, policy {:?})",
                scores.len(),
                self.policy
            )));
        }

        Ok(counted.iter().sum::<f64>() / counted.len() as f64)
    }
}
