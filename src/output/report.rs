//! Report structures wrapping an evaluation for presentation

use crate::config::{AbsentCategoryPolicy, ScoringStrategy};
use crate::processing::evaluator::{DetailedEvaluation, EvaluationResult};
use crate::processing::text_processor::TextProcessor;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub result: EvaluationResult,
    pub verdict: Verdict,
    pub sections: Vec<SectionSummary>,
    pub metadata: ReportMetadata,
}

/// Per-category view for detailed output
#[derive(Debug, Clone, Serialize)]
pub struct SectionSummary {
    pub category: String,
    pub score: f64,
    pub candidate_words: usize,
    pub reference_words: usize,
    pub absent: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    pub candidate_path: String,
    pub reference_path: String,
    pub strategy: ScoringStrategy,
    pub absent_policy: AbsentCategoryPolicy,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Excellent,
    Good,
    Fair,
    Weak,
    Poor,
}

impl Verdict {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 85.0 => Verdict::Excellent,
            s if s >= 70.0 => Verdict::Good,
            s if s >= 50.0 => Verdict::Fair,
            s if s >= 25.0 => Verdict::Weak,
            _ => Verdict::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Excellent => "EXCELLENT",
            Verdict::Good => "GOOD",
            Verdict::Fair => "FAIR",
            Verdict::Weak => "WEAK",
            Verdict::Poor => "POOR",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Verdict::Excellent => "Closely follows the reference resume",
            Verdict::Good => "Most sections line up with the reference",
            Verdict::Fair => "Several sections differ from the reference",
            Verdict::Weak => "Few sections resemble the reference",
            Verdict::Poor => "Little overlap with the reference",
        }
    }
}

impl ScanReport {
    pub fn new(
        evaluation: &DetailedEvaluation,
        candidate_path: &Path,
        reference_path: &Path,
        processing_time_ms: u64,
    ) -> Self {
        let processor = TextProcessor::new();

        let sections = evaluation
            .result
            .category_scores
            .entries()
            .iter()
            .map(|entry| {
                let words = |doc: &crate::processing::SectionedDocument| {
                    doc.fragment_by_name(&entry.category)
                        .map(|fragment| processor.word_count(fragment))
                        .unwrap_or(0)
                };
                SectionSummary {
                    category: entry.category.clone(),
                    score: entry.score,
                    candidate_words: words(&evaluation.candidate),
                    reference_words: words(&evaluation.reference),
                    absent: entry.absent,
                }
            })
            .collect();

        Self {
            result: evaluation.result.clone(),
            verdict: Verdict::from_score(evaluation.result.overall_score),
            sections,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                processing_time_ms,
                candidate_path: candidate_path.display().to_string(),
                reference_path: reference_path.display().to_string(),
                strategy: evaluation.strategy,
                absent_policy: evaluation.absent_policy,
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    /// Sections scoring at or above `threshold`, best first
    pub fn strongest_sections(&self, threshold: f64) -> Vec<&SectionSummary> {
        let mut strong: Vec<&SectionSummary> = self
            .sections
            .iter()
            .filter(|s| !s.absent && s.score >= threshold)
            .collect();
        strong.sort_by(|a, b| b.score.total_cmp(&a.score));
        strong
    }

    /// Sections present in the reference but missing from the candidate
    pub fn missing_sections(&self) -> Vec<&SectionSummary> {
        self.sections
            .iter()
            .filter(|s| s.candidate_words == 0 && s.reference_words > 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::{Evaluator, ScanProfile};

    #[test]
    fn test_verdict_bands() {
        assert_eq!(Verdict::from_score(100.0), Verdict::Excellent);
        assert_eq!(Verdict::from_score(85.0), Verdict::Excellent);
        assert_eq!(Verdict::from_score(70.0), Verdict::Good);
        assert_eq!(Verdict::from_score(55.5), Verdict::Fair);
        assert_eq!(Verdict::from_score(25.0), Verdict::Weak);
        assert_eq!(Verdict::from_score(0.0), Verdict::Poor);
    }

    #[test]
    fn test_report_sections() {
        let profile = ScanProfile::from_config(&Config::default()).unwrap();
        let evaluator = Evaluator::new(&profile);
        let evaluation = evaluator
            .analyze(
                "Education\nBS Computer Science",
                "Education\nBS Computer Science\nProjects\nBuilt a compiler",
            )
            .unwrap();

        let report = ScanReport::new(&evaluation, Path::new("cv.txt"), Path::new("sample.txt"), 3);

        assert_eq!(report.sections.len(), 7);
        assert_eq!(report.sections[0].candidate_words, 4);
        assert_eq!(report.strongest_sections(90.0).len(), 1);
        assert_eq!(report.strongest_sections(90.0)[0].category, "Education");

        let missing = report.missing_sections();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].category, "Projects");
        assert_eq!(report.metadata.candidate_path, "cv.txt");
    }
}
