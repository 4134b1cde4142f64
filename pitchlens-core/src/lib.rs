// Pitchlens Core Library
//
// Turns free-form evaluator feedback into titled sections of categorised
// items. The engine is pure and total; `responses` holds the typed boundary
// with the evaluation service that produces the raw text.

pub mod types;
pub mod rules;
pub mod classifier;
pub mod processor;
pub mod config;
pub mod responses;
pub mod serialization;
pub mod error;

// Re-export main types and functions for easy use
pub use types::*;
pub use rules::segment;
pub use classifier::{classify, KeywordClassifier};
pub use processor::{process, FeedbackProcessor, PipelineStages};
pub use config::FeedbackConfig;
pub use error::FeedbackError;
