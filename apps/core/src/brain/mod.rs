//! # Brain Module
//!
//! Journal-analysis pipeline: deterministic lexicon scoring plus the
//! model-backed analysis with heuristic fallback.
//!
//! ## Components
//! - `lexicon`: keyword-scoring emotion classifier and content moderation
//! - `prompt`: the fixed system instruction and reply cleanup
//! - `analyzer`: main orchestrator (moderate, model attempt, fallback)

pub mod analyzer;
pub mod lexicon;
pub mod prompt;

pub use analyzer::JournalAnalyzer;
pub use lexicon::{Lexicon, LexiconClassifier};
