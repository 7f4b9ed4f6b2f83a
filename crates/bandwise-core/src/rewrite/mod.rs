//! The rewrite engine: produces the "improved version" of a response.
//!
//! The text is split into paragraphs and each one is rewritten according to
//! its position. Short or single-paragraph responses are replaced with a
//! template built from their content words instead.

mod paragraph;
pub mod restructure;
pub mod rules;

use rand::Rng;

use crate::error::FeedbackError;
use crate::model::TaskType;

pub use paragraph::BODY_VOCABULARY_LIMIT;
pub use restructure::restructure;
pub use rules::{apply_rules, compile_rules, Replacement, RewriteRule, RuleOutcome, RuleSpec};

/// Rewritten text shorter than this (in characters) is restructured.
pub const MIN_IMPROVED_CHARS: usize = 150;

const NO_RESPONSE_NOTE: &str = "[No original response was provided to improve upon.]";

/// The canned text returned for a blank response.
pub fn placeholder(task: TaskType) -> String {
    let lead = match task {
        TaskType::Task1 => {
            "The graph illustrates the proportion of elderly population aged 65 and over across \
             three different countries between 1940 and 2040."
        }
        TaskType::Task2 => {
            "The question of whether universities should prioritize academic skills or \
             employment preparation is a matter of significant debate in educational circles."
        }
    };
    format!("{lead} {NO_RESPONSE_NOTE}")
}

/// Non-blank paragraphs, trimmed.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Produce an improved version of `text`.
pub fn improve<R: Rng + ?Sized>(
    text: &str,
    task: TaskType,
    rng: &mut R,
) -> Result<String, FeedbackError> {
    if text.trim().is_empty() {
        return Ok(placeholder(task));
    }

    let tables = paragraph::tables()?;
    let paragraphs = split_paragraphs(text);
    let last = paragraphs.len().saturating_sub(1);

    let improved: Vec<String> = paragraphs
        .iter()
        .enumerate()
        .map(|(index, p)| match index {
            0 => paragraph::introduction(p, task, tables),
            i if i == last => paragraph::conclusion(p, task, tables, rng),
            _ => paragraph::body(p, tables, rng),
        })
        .filter(|p| !p.trim().is_empty())
        .collect();
    let joined = improved.join("\n\n");

    if joined.chars().count() < MIN_IMPROVED_CHARS || paragraphs.len() < 2 {
        tracing::debug!(
            paragraphs = paragraphs.len(),
            chars = joined.chars().count(),
            "response too short to rewrite in place"
        );
        return restructure(text, task);
    }

    Ok(joined)
}
