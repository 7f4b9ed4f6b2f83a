//! Error types for the grading pipeline.
//!
//! Input validation failures are surfaced to the caller. Everything else is
//! an internal failure that the engine converts into the fallback result.

use thiserror::Error;

/// Reasons a submission is rejected before scoring starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    /// The response text was missing or only whitespace.
    #[error("response text is empty")]
    EmptyResponse,

    /// The task type was not one of the known variants.
    #[error("invalid task type '{0}': must be 'task1' or 'task2'")]
    UnknownTaskType(String),
}

/// Errors that can occur while producing feedback for a submission.
#[derive(Debug, Error)]
pub enum FeedbackError {
    /// The request was rejected during validation.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    /// A built-in pattern table failed to compile.
    #[error("pattern table '{name}' failed to compile: {source}")]
    Pattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    /// Any other failure inside analysis, scoring or rewriting.
    #[error("internal failure: {0}")]
    Internal(String),
}

impl FeedbackError {
    /// Returns `true` if the error was caused by the caller's input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, FeedbackError::InvalidInput(_))
    }
}
