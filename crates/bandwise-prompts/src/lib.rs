//! bandwise-prompts: practice questions for both writing tasks.
//!
//! Questions are generated from templates first; the fixed sample bank is
//! used if that fails.

pub mod error;
pub mod generator;
pub mod samples;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use bandwise_core::TaskType;

pub use error::PromptError;
pub use generator::generate_question;
pub use samples::sample_questions;

/// A practice question shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub prompt: String,
    pub time_limit_secs: u64,
}

impl Question {
    pub fn new(id: i64, task: TaskType, prompt: impl Into<String>) -> Self {
        let title = match task {
            TaskType::Task1 => "Task 1: Academic Writing",
            TaskType::Task2 => "Task 2: Essay",
        };
        let minutes = task.time_limit_secs() / 60;
        Self {
            id,
            title: title.to_string(),
            description: format!(
                "You should spend about {minutes} minutes on this task. Write at least {} words.",
                task.min_words()
            ),
            prompt: prompt.into(),
            time_limit_secs: task.time_limit_secs(),
        }
    }
}

/// A question for `task`: generated when possible, otherwise a random
/// sample from the fixed bank.
pub fn random_question<R: Rng + ?Sized>(task: TaskType, rng: &mut R) -> Question {
    match generate_question(task, rng) {
        Ok(question) => question,
        Err(e) => {
            tracing::warn!(%task, "question generation failed, using sample bank: {e}");
            let samples = sample_questions(task);
            samples
                .choose(rng)
                .cloned()
                .unwrap_or_else(|| Question::new(0, task, String::new()))
        }
    }
}
