//! Narrative feedback for each criterion.
//!
//! Comments are drawn at random from the band matching the score. The
//! random source is always passed in, so a seeded RNG gives repeatable text.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::bands::{band_or_lowest, table};
use crate::model::{Criterion, TaskType};
use crate::scoring::{CriterionScores, LengthRatio};

/// Pick a comment for `criterion` at `score`.
pub fn criterion_comment<R: Rng + ?Sized>(criterion: Criterion, score: f64, rng: &mut R) -> String {
    band_or_lowest(table(criterion), score)
        .and_then(|band| band.candidates.choose(rng))
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// The sentence appended to task-achievement feedback about length.
pub fn word_count_advisory(word_count: usize, min_words: usize) -> String {
    let ratio = LengthRatio::new(word_count, min_words);
    if !ratio.at_least(10) {
        format!(
            " Note that your response contains {word_count} words, which is below the minimum \
             requirement of {min_words} words. This affects your Task Achievement score."
        )
    } else if !ratio.at_least(12) {
        format!(" Your response meets the minimum word count requirement of {min_words} words.")
    } else {
        " Your response exceeds the minimum word count requirement, which allows for good \
         development of your ideas."
            .to_string()
    }
}

/// Task-achievement comment followed by the word-count advisory.
pub fn task_comment<R: Rng + ?Sized>(
    score: f64,
    task: TaskType,
    word_count: usize,
    rng: &mut R,
) -> String {
    let mut comment = criterion_comment(Criterion::TaskAchievement, score, rng);
    comment.push_str(&word_count_advisory(word_count, task.min_words()));
    comment
}

/// Comments for all four criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionComments {
    pub task_achievement: String,
    pub coherence_and_cohesion: String,
    pub lexical_resource: String,
    pub grammatical_range_and_accuracy: String,
}

impl CriterionComments {
    /// Comments are drawn in a fixed order (grammar, coherence, lexical,
    /// task) so that a seeded RNG always produces the same set.
    pub fn generate<R: Rng + ?Sized>(
        scores: &CriterionScores,
        task: TaskType,
        word_count: usize,
        rng: &mut R,
    ) -> Self {
        let grammatical_range_and_accuracy = criterion_comment(
            Criterion::GrammaticalRangeAndAccuracy,
            scores.grammatical_range_and_accuracy,
            rng,
        );
        let coherence_and_cohesion = criterion_comment(
            Criterion::CoherenceAndCohesion,
            scores.coherence_and_cohesion,
            rng,
        );
        let lexical_resource =
            criterion_comment(Criterion::LexicalResource, scores.lexical_resource, rng);
        let task_achievement = task_comment(scores.task_achievement, task, word_count, rng);

        Self {
            task_achievement,
            coherence_and_cohesion,
            lexical_resource,
            grammatical_range_and_accuracy,
        }
    }
}
