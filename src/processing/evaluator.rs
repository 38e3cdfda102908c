//! Evaluation of a candidate resume against a reference resume

use crate::config::{AbsentCategoryPolicy, ScoringStrategy};
use crate::error::{Result, ResumeScannerError};
use crate::processing::aggregator::{Aggregator, ScoreMap};
use crate::processing::categorizer::{Categorizer, LineClassifier, SectionedDocument};
use crate::processing::profile::ScanProfile;
use crate::processing::similarity::{scorer_for, SimilarityScorer};
use crate::processing::text_processor::TextProcessor;
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub category_scores: ScoreMap,
    pub overall_score: f64,
}

/// Result plus the sectioned documents it was computed from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedEvaluation {
    pub result: EvaluationResult,
    pub candidate: SectionedDocument,
    pub reference: SectionedDocument,
    pub strategy: ScoringStrategy,
    pub absent_policy: AbsentCategoryPolicy,
}

/// Stateless orchestrator: categorize both texts, score each category,
/// aggregate. Safe to share across threads.
pub struct Evaluator<'a> {
    profile: &'a ScanProfile,
    categorizer: Categorizer<'a>,
    scorer: Box<dyn SimilarityScorer>,
    aggregator: Aggregator,
    processor: TextProcessor,
}

impl<'a> Evaluator<'a> {
    pub fn new(profile: &'a ScanProfile) -> Self {
        Self {
            profile,
            categorizer: Categorizer::new(profile.categories()),
            scorer: scorer_for(profile.scoring()),
            aggregator: Aggregator::new(profile.absent_policy()),
            processor: TextProcessor::new(),
        }
    }

    pub fn with_classifier(mut self, classifier: Box<dyn LineClassifier + 'a>) -> Self {
        self.categorizer = Categorizer::with_classifier(self.profile.categories(), classifier);
        self
    }

    pub fn with_scorer(mut self, scorer: Box<dyn SimilarityScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn profile(&self) -> &ScanProfile {
        self.profile
    }

    pub fn categorize(&self, text: &str) -> SectionedDocument {
        self.categorizer.categorize(text)
    }

    pub fn evaluate(&self, candidate: &str, reference: &str) -> Result<EvaluationResult> {
        self.analyze(candidate, reference).map(|detailed| detailed.result)
    }

    /// Like `evaluate`, but rejects bytes that are not usable text first.
    pub fn evaluate_bytes(&self, candidate: &[u8], reference: &[u8]) -> Result<EvaluationResult> {
        let candidate = self.processor.validate_bytes(candidate)?;
        let reference = self.processor.validate_bytes(reference)?;
        self.evaluate(candidate, reference)
    }

    pub fn analyze(&self, candidate: &str, reference: &str) -> Result<DetailedEvaluation> {
        let candidate_doc = self.categorizer.categorize(candidate);
        let reference_doc = self.categorizer.categorize(reference);

        debug!(
            "Sections detected: candidate {}/{}, reference {}/{}",
            candidate_doc.detected_count(),
            candidate_doc.len(),
            reference_doc.detected_count(),
            reference_doc.len()
        );

        if candidate_doc.is_blank() && reference_doc.is_blank() {
            return Err(ResumeScannerError::EmptyInput(
                "neither document contains a recognizable section".to_string(),
            ));
        }

        let mut scores = ScoreMap::new();
        for (id, category) in self.profile.categories().iter() {
            let candidate_fragment = candidate_doc.fragment(id).unwrap_or_default();
            let reference_fragment = reference_doc.fragment(id).unwrap_or_default();
            let absent = candidate_fragment.is_empty() && reference_fragment.is_empty();

            let score = if absent {
                0.0
            } else {
                self.scorer
                    .score(category, candidate_fragment, Some(reference_fragment))
            };

            debug!("{}: {:.2}", category.name(), score);
            scores.insert(category.name(), score, absent);
        }

        let overall_score = self.aggregator.aggregate(&scores)?;
        debug!("Overall score: {:.2}", overall_score);

        Ok(DetailedEvaluation {
            result: EvaluationResult {
                category_scores: scores,
                overall_score,
            },
            candidate: candidate_doc,
            reference: reference_doc,
            strategy: self.scorer.strategy(),
            absent_policy: self.aggregator.policy(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::category::{Category, CategoryId, CategorySet};

    const SAMPLE: &str = "Education\nBS Computer Science\nProjects\nBuilt a compiler";

    fn profile_with(policy: AbsentCategoryPolicy, strategy: ScoringStrategy) -> ScanProfile {
        let mut config = Config::default();
        config.scoring.absent_categories = policy;
        config.scoring.strategy = strategy;
        ScanProfile::from_config(&config).unwrap()
    }

    fn default_profile() -> ScanProfile {
        ScanProfile::from_config(&Config::default()).unwrap()
    }

    #[test]
    fn test_identical_documents_count_as_zero() {
        let profile = default_profile();
        let evaluator = Evaluator::new(&profile);

        let result = evaluator.evaluate(SAMPLE, SAMPLE).unwrap();

        assert_eq!(result.category_scores.len(), 7);
        assert_eq!(result.category_scores.get("Education"), Some(100.0));
        assert_eq!(result.category_scores.get("Projects"), Some(100.0));
        assert_eq!(result.category_scores.get("Work Experience"), Some(0.0));
        assert!((result.overall_score - 200.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_identical_documents_excluding_absent() {
        let profile = profile_with(AbsentCategoryPolicy::Exclude, ScoringStrategy::Tfidf);
        let evaluator = Evaluator::new(&profile);

        let result = evaluator.evaluate(SAMPLE, SAMPLE).unwrap();

        assert_eq!(result.overall_score, 100.0);
        assert_eq!(result.category_scores.len(), 7);
        assert_eq!(result.category_scores.get("Publications"), Some(0.0));
    }

    #[test]
    fn test_fully_matching_documents_score_100() {
        let profile = default_profile();
        let evaluator = Evaluator::new(&profile);

        let text = profile
            .categories()
            .names()
            .iter()
            .map(|name| format!("{}\nsome detail about {}", name, name.to_lowercase()))
            .collect::<Vec<_>>()
            .join("\n");

        let result = evaluator.evaluate(&text, &text).unwrap();
        assert_eq!(result.overall_score, 100.0);
        assert!(result.category_scores.entries().iter().all(|e| e.score == 100.0));
    }

    #[test]
    fn test_empty_candidate_scores_zero() {
        let profile = default_profile();
        let evaluator = Evaluator::new(&profile);

        let detailed = evaluator.analyze("", "Education\nPhD").unwrap();

        assert!(detailed.candidate.is_blank());
        assert!(detailed.result.category_scores.entries().iter().all(|e| e.score == 0.0));
        assert_eq!(detailed.result.overall_score, 0.0);
    }

    #[test]
    fn test_candidate_without_headings() {
        let profile = default_profile();
        let evaluator = Evaluator::new(&profile);

        let detailed = evaluator
            .analyze("Jane Doe\nLoves compilers", "Education\nPhD\nProjects\nCompiler")
            .unwrap();

        assert!(detailed.candidate.is_blank());
        assert_eq!(detailed.result.overall_score, 0.0);
    }

    #[test]
    fn test_both_empty_is_error() {
        let profile = default_profile();
        let evaluator = Evaluator::new(&profile);

        assert!(matches!(
            evaluator.evaluate("", ""),
            Err(ResumeScannerError::EmptyInput(_))
        ));
        assert!(matches!(
            evaluator.evaluate("no headings", "still none"),
            Err(ResumeScannerError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_deterministic() {
        let profile = default_profile();
        let evaluator = Evaluator::new(&profile);
        let candidate = "Education\nMSc Physics, BSc Maths\nTechnical Skills\nRust Go Python SQL";
        let reference = "Education\nBSc Computer Science\nTechnical Skills\nRust, C++, Python";

        let first = evaluator.evaluate(candidate, reference).unwrap();
        let second = evaluator.evaluate(candidate, reference).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_malformed_bytes_rejected() {
        let profile = default_profile();
        let evaluator = Evaluator::new(&profile);

        assert!(matches!(
            evaluator.evaluate_bytes(&[0xc3, 0x28], SAMPLE.as_bytes()),
            Err(ResumeScannerError::MalformedText(_))
        ));
        assert!(evaluator.evaluate_bytes(SAMPLE.as_bytes(), SAMPLE.as_bytes()).is_ok());
    }

    #[test]
    fn test_keyword_strategy() {
        let profile = profile_with(AbsentCategoryPolicy::CountAsZero, ScoringStrategy::KeywordFrequency);
        let evaluator = Evaluator::new(&profile);

        let detailed = evaluator.analyze("Education\nBachelor degree, university", "").unwrap();

        // "education", "bachelor", "degree", "university"
        assert_eq!(detailed.result.category_scores.get("Education"), Some(80.0));
        assert_eq!(detailed.strategy, ScoringStrategy::KeywordFrequency);
        assert!((detailed.result.overall_score - 80.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_json_shape() {
        let profile = default_profile();
        let evaluator = Evaluator::new(&profile);

        let result = evaluator.evaluate(SAMPLE, SAMPLE).unwrap();
        let value = serde_json::to_value(&result).unwrap();

        assert!(value["overallScore"].is_f64());
        assert_eq!(value["categoryScores"]["Education"], 100.0);
        assert_eq!(value["categoryScores"].as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_custom_scorer_and_classifier() {
        struct Constant;
        impl SimilarityScorer for Constant {
            fn score(&self, _: &Category, _: &str, _: Option<&str>) -> f64 {
                42.0
            }
            fn strategy(&self) -> ScoringStrategy {
                ScoringStrategy::Tfidf
            }
        }

        struct EverythingIsEducation;
        impl LineClassifier for EverythingIsEducation {
            fn classify(&self, _: &str) -> Option<CategoryId> {
                Some(CategoryId(0))
            }
        }

        let profile = profile_with(AbsentCategoryPolicy::Exclude, ScoringStrategy::Tfidf);
        let evaluator = Evaluator::new(&profile)
            .with_scorer(Box::new(Constant))
            .with_classifier(Box::new(EverythingIsEducation));

        let detailed = evaluator.analyze("anything", "at all").unwrap();
        assert_eq!(detailed.candidate.fragment(CategoryId(0)), Some("anything "));
        assert_eq!(detailed.result.overall_score, 42.0);
    }

    #[test]
    fn test_shared_across_threads() {
        let profile = default_profile();
        let evaluator = Evaluator::new(&profile);
        let expected = evaluator.evaluate(SAMPLE, SAMPLE).unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| evaluator.evaluate(SAMPLE, SAMPLE).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_profile_categories_drive_keys() {
        let mut config = Config::default();
        config.categories.truncate(2);
        let profile = ScanProfile::from_config(&config).unwrap();
        let evaluator = Evaluator::new(&profile);

        let result = evaluator.evaluate(SAMPLE, SAMPLE).unwrap();
        assert_eq!(result.category_scores.len(), 2);
        assert_eq!(result.overall_score, 100.0);

        let set: &CategorySet = evaluator.profile().categories();
        assert_eq!(set.names(), vec!["Education", "Projects"]);
    }
}
