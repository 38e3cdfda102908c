//! Resume analysis engine: sectioning, similarity scoring and aggregation

pub mod text_processor;
pub mod category;
pub mod profile;
pub mod categorizer;
pub mod similarity;
pub mod aggregator;
pub mod evaluator;

pub use aggregator::{Aggregator, ScoreMap};
pub use categorizer::{Categorizer, HeadingClassifier, LineClassifier, SectionedDocument};
pub use evaluator::{DetailedEvaluation, EvaluationResult, Evaluator};
pub use profile::ScanProfile;
pub use similarity::{KeywordFrequencyScorer, SimilarityScorer, TfIdfScorer};
