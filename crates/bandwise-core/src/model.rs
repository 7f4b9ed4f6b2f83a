//! Core data model types for bandwise.
//!
//! These are the value objects that flow through one grading call: the
//! validated submission, the statistics derived from it, and the result
//! handed back to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InvalidInput;

/// The two writing-exam task categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// Describe a chart, graph, table or diagram.
    Task1,
    /// Write an argumentative essay.
    Task2,
}

impl TaskType {
    /// Minimum word count the exam expects for this task.
    pub fn min_words(self) -> usize {
        match self {
            TaskType::Task1 => 150,
            TaskType::Task2 => 250,
        }
    }

    /// Recommended time limit in seconds.
    pub fn time_limit_secs(self) -> u64 {
        match self {
            TaskType::Task1 => 20 * 60,
            TaskType::Task2 => 40 * 60,
        }
    }

    /// Phrase describing the skill the task exercises.
    pub fn focus_phrase(self) -> &'static str {
        match self {
            TaskType::Task1 => "data interpretation and description",
            TaskType::Task2 => "essay writing and argumentation",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskType::Task1 => write!(f, "task1"),
            TaskType::Task2 => write!(f, "task2"),
        }
    }
}

impl FromStr for TaskType {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "task1" => Ok(TaskType::Task1),
            "task2" => Ok(TaskType::Task2),
            other => Err(InvalidInput::UnknownTaskType(other.to_string())),
        }
    }
}

/// A validated submission: known task type and non-blank text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionInput {
    pub task_type: TaskType,
    pub text: String,
}

impl SubmissionInput {
    pub fn new(task_type: TaskType, text: impl Into<String>) -> Result<Self, InvalidInput> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(InvalidInput::EmptyResponse);
        }
        Ok(Self { task_type, text })
    }

    /// Parse the task type and validate the text in one step.
    pub fn parse(task_type: &str, text: &str) -> Result<Self, InvalidInput> {
        if text.trim().is_empty() {
            return Err(InvalidInput::EmptyResponse);
        }
        Self::new(task_type.parse()?, text)
    }
}

/// Surface statistics computed from a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisStats {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_words_per_sentence: f64,
    pub unique_word_count: usize,
    pub lexical_diversity: f64,
    pub paragraph_count: usize,
    pub transition_hit_count: usize,
    pub advanced_vocab_hit_count: usize,
    pub grammar_issue_hit_count: usize,
}

/// The four assessment criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Criterion {
    TaskAchievement,
    CoherenceAndCohesion,
    LexicalResource,
    GrammaticalRangeAndAccuracy,
}

impl Criterion {
    pub const ALL: [Criterion; 4] = [
        Criterion::TaskAchievement,
        Criterion::CoherenceAndCohesion,
        Criterion::LexicalResource,
        Criterion::GrammaticalRangeAndAccuracy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Criterion::TaskAchievement => "Task Achievement",
            Criterion::CoherenceAndCohesion => "Coherence and Cohesion",
            Criterion::LexicalResource => "Lexical Resource",
            Criterion::GrammaticalRangeAndAccuracy => "Grammatical Range and Accuracy",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A score for one criterion plus the comment explaining it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    /// Band score in `[4.0, 9.0]`.
    pub score: f64,
    pub feedback: String,
}

/// Everything the caller gets back for one submission.
///
/// Field names serialize in camelCase to match what the practice UI reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResult {
    pub task_achievement: CriterionScore,
    pub coherence_and_cohesion: CriterionScore,
    pub lexical_resource: CriterionScore,
    pub grammatical_range_and_accuracy: CriterionScore,
    pub overall_score: f64,
    pub overall_feedback: String,
    pub improved_version: String,
}

impl FeedbackResult {
    pub fn criterion(&self, criterion: Criterion) -> &CriterionScore {
        match criterion {
            Criterion::TaskAchievement => &self.task_achievement,
            Criterion::CoherenceAndCohesion => &self.coherence_and_cohesion,
            Criterion::LexicalResource => &self.lexical_resource,
            Criterion::GrammaticalRangeAndAccuracy => &self.grammatical_range_and_accuracy,
        }
    }
}
