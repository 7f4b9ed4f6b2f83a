//! bandwise-core: heuristic scoring and rewriting for writing-exam practice.
//!
//! This crate turns a raw response into four criterion scores, narrative
//! feedback and an "improved" rewrite. Everything is driven by surface
//! statistics and regex rule tables; there is no language model involved.

pub mod aggregate;
pub mod analyzer;
pub mod bands;
pub mod config;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod model;
pub mod report;
pub mod rewrite;
pub mod scoring;

pub use config::EngineConfig;
pub use engine::{evaluate, BatchItem, FeedbackEngine, NoopReporter, ProgressReporter};
pub use error::{FeedbackError, InvalidInput};
pub use model::{
    AnalysisStats, Criterion, CriterionScore, FeedbackResult, SubmissionInput, TaskType,
};
pub use report::{GradedSubmission, GradingReport};
