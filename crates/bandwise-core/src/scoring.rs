//! Criterion scoring from analysis statistics.
//!
//! Every criterion starts at a base band and applies additive adjustments.
//! Results are clamped to `[4.0, 9.0]`: this simplified heuristic never
//! reports the extreme bands at either end of the exam scale.

use serde::{Deserialize, Serialize};

use crate::model::{AnalysisStats, Criterion, TaskType};

/// Starting band for every criterion.
pub const BASE_SCORE: f64 = 6.0;
/// Lowest band the heuristic will report.
pub const SCORE_FLOOR: f64 = 4.0;
/// Highest band the heuristic will report.
pub const SCORE_CEILING: f64 = 9.0;

/// Clamp a raw score into `[SCORE_FLOOR, SCORE_CEILING]` and round it to one
/// decimal place. NaN clamps to the ceiling.
pub fn clamp_score(score: f64) -> f64 {
    round_to_tenth(SCORE_FLOOR.max(SCORE_CEILING.min(score)))
}

/// Round to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Grammatical range and accuracy.
pub fn grammar_score(stats: &AnalysisStats) -> f64 {
    let mut score = BASE_SCORE;

    let avg = stats.avg_words_per_sentence;
    if avg > 20.0 {
        score += 1.0;
    } else if avg > 15.0 {
        score += 0.5;
    } else if avg < 8.0 {
        score -= 0.5;
    }

    score -= (stats.grammar_issue_hit_count as f64 * 0.1).min(2.0);

    clamp_score(score)
}

/// Coherence and cohesion.
pub fn coherence_score(stats: &AnalysisStats) -> f64 {
    let mut score = BASE_SCORE;

    if stats.paragraph_count >= 3 {
        score += 0.5;
    }
    if stats.paragraph_count >= 4 {
        score += 0.5;
    }

    if stats.transition_hit_count >= 5 {
        score += 1.0;
    } else if stats.transition_hit_count >= 3 {
        score += 0.5;
    }

    clamp_score(score)
}

/// Lexical resource.
pub fn lexical_score(stats: &AnalysisStats) -> f64 {
    let mut score = BASE_SCORE;

    let diversity = stats.lexical_diversity;
    if diversity > 0.7 {
        score += 1.5;
    } else if diversity > 0.6 {
        score += 1.0;
    } else if diversity > 0.5 {
        score += 0.5;
    } else if diversity < 0.4 {
        score -= 0.5;
    }

    let unique = stats.unique_word_count;
    if unique > 120 {
        score += 1.0;
    } else if unique > 100 {
        score += 0.5;
    } else if unique < 70 {
        score -= 0.5;
    }

    if stats.advanced_vocab_hit_count >= 5 {
        score += 1.0;
    } else if stats.advanced_vocab_hit_count >= 3 {
        score += 0.5;
    }

    clamp_score(score)
}

/// Task achievement, judged on length relative to the task minimum.
pub fn task_score(stats: &AnalysisStats, task: TaskType) -> f64 {
    let mut score = BASE_SCORE;
    let ratio = LengthRatio::new(stats.word_count, task.min_words());

    if ratio.at_least(12) {
        score += 0.5;
    }
    if ratio.at_least(15) {
        score += 0.5;
    }
    if !ratio.at_least(10) {
        score -= 1.0;
    }
    if !ratio.at_least(8) {
        score -= 1.0;
    }

    clamp_score(score)
}

/// Word count compared against a minimum in tenths, using integer maths so
/// `180 >= 1.2 * 150` holds exactly.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LengthRatio {
    words: usize,
    min_words: usize,
}

impl LengthRatio {
    pub(crate) fn new(words: usize, min_words: usize) -> Self {
        Self { words, min_words }
    }

    /// `words >= min_words * tenths / 10`
    pub(crate) fn at_least(self, tenths: usize) -> bool {
        self.words * 10 >= self.min_words * tenths
    }
}

/// The four criterion scores for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionScores {
    pub task_achievement: f64,
    pub coherence_and_cohesion: f64,
    pub lexical_resource: f64,
    pub grammatical_range_and_accuracy: f64,
}

impl CriterionScores {
    /// Score all four criteria.
    pub fn compute(stats: &AnalysisStats, task: TaskType) -> Self {
        Self {
            task_achievement: task_score(stats, task),
            coherence_and_cohesion: coherence_score(stats),
            lexical_resource: lexical_score(stats),
            grammatical_range_and_accuracy: grammar_score(stats),
        }
    }

    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::TaskAchievement => self.task_achievement,
            Criterion::CoherenceAndCohesion => self.coherence_and_cohesion,
            Criterion::LexicalResource => self.lexical_resource,
            Criterion::GrammaticalRangeAndAccuracy => self.grammatical_range_and_accuracy,
        }
    }

    /// Mean of the four scores, rounded to one decimal place.
    pub fn overall(&self) -> f64 {
        let sum: f64 = Criterion::ALL.iter().map(|&c| self.get(c)).sum();
        round_to_tenth(sum / 4.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> AnalysisStats {
        AnalysisStats {
            word_count: 200,
            sentence_count: 10,
            avg_words_per_sentence: 12.0,
            unique_word_count: 90,
            lexical_diversity: 0.45,
            paragraph_count: 1,
            transition_hit_count: 0,
            advanced_vocab_hit_count: 0,
            grammar_issue_hit_count: 0,
        }
    }

    #[test]
    fn baseline_scores_are_six() {
        let s = stats();
        assert_eq!(grammar_score(&s), 6.0);
        assert_eq!(coherence_score(&s), 6.0);
        assert_eq!(lexical_score(&s), 6.0);
    }

    #[test]
    fn grammar_rewards_long_sentences_and_penalises_issues() {
        let mut s = stats();
        s.avg_words_per_sentence = 21.0;
        assert_eq!(grammar_score(&s), 7.0);
        s.avg_words_per_sentence = 16.0;
        assert_eq!(grammar_score(&s), 6.5);
        s.avg_words_per_sentence = 5.0;
        assert_eq!(grammar_score(&s), 5.5);

        s.avg_words_per_sentence = 12.0;
        s.grammar_issue_hit_count = 3;
        assert_eq!(grammar_score(&s), 5.7);
        // Penalty is capped at 2.0.
        s.grammar_issue_hit_count = 500;
        assert_eq!(grammar_score(&s), 4.0);
    }

    #[test]
    fn coherence_tiers() {
        let mut s = stats();
        s.paragraph_count = 3;
        assert_eq!(coherence_score(&s), 6.5);
        s.paragraph_count = 5;
        s.transition_hit_count = 3;
        assert_eq!(coherence_score(&s), 7.5);
        s.transition_hit_count = 6;
        assert_eq!(coherence_score(&s), 8.0);
    }

    #[test]
    fn lexical_tiers_stack_and_clamp() {
        let mut s = stats();
        s.lexical_diversity = 0.75;
        s.unique_word_count = 130;
        s.advanced_vocab_hit_count = 5;
        assert_eq!(lexical_score(&s), 9.0);

        s.lexical_diversity = 0.3;
        s.unique_word_count = 40;
        s.advanced_vocab_hit_count = 0;
        assert_eq!(lexical_score(&s), 5.0);
    }

    #[test]
    fn task_score_by_length() {
        let mut s = stats();
        s.word_count = 50;
        assert_eq!(task_score(&s, TaskType::Task1), 4.0);
        s.word_count = 130;
        assert_eq!(task_score(&s, TaskType::Task1), 5.0);
        s.word_count = 150;
        assert_eq!(task_score(&s, TaskType::Task1), 6.0);
        s.word_count = 180;
        assert_eq!(task_score(&s, TaskType::Task1), 6.5);
        s.word_count = 225;
        assert_eq!(task_score(&s, TaskType::Task1), 7.0);
        s.word_count = 225;
        assert_eq!(task_score(&s, TaskType::Task2), 5.0);
    }

    #[test]
    fn clamp_handles_out_of_range_and_nan() {
        assert_eq!(clamp_score(1.0), 4.0);
        assert_eq!(clamp_score(12.0), 9.0);
        assert_eq!(clamp_score(f64::NAN), 9.0);
        assert_eq!(clamp_score(6.6999999), 6.7);
    }

    #[test]
    fn overall_is_rounded_mean() {
        let scores = CriterionScores {
            task_achievement: 6.5,
            coherence_and_cohesion: 7.0,
            lexical_resource: 5.5,
            grammatical_range_and_accuracy: 6.0,
        };
        // 25.0 / 4 = 6.25
        assert_eq!(scores.overall(), 6.3);
    }
}
