//! Document acquisition
//! Resolves local resume files to raw text for the analysis engine

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
