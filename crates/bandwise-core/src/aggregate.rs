//! Overall score, overall narrative and final result assembly.

use crate::feedback::CriterionComments;
use crate::model::{CriterionScore, FeedbackResult, TaskType};
use crate::scoring::{CriterionScores, BASE_SCORE};

/// Shown as the improved version when the fallback fires on blank input.
pub const NO_RESPONSE_PROVIDED: &str = "No response provided.";

/// Summary paragraph for an overall score.
pub fn overall_feedback(score: f64, task: TaskType) -> String {
    let focus = task.focus_phrase();
    if score >= 8.0 {
        format!(
            "Excellent work! Your writing demonstrates a very high level of proficiency in \
             {focus}. You've addressed all aspects of the task with well-developed ideas, logical \
             organization, and a wide range of vocabulary and grammatical structures. To maintain \
             this level, continue practicing with complex topics and refining your advanced \
             language skills."
        )
    } else if score >= 7.0 {
        format!(
            "Good job! Your writing shows a good command of English with effective {focus}. \
             You've addressed the task well with mostly well-developed ideas and good \
             organization. Your vocabulary and grammar are generally strong with only occasional \
             errors. To improve further, work on developing more sophisticated language use and \
             ensuring all aspects of the task are fully developed."
        )
    } else if score >= 6.0 {
        format!(
            "Your writing demonstrates a generally effective command of English for {focus}, \
             despite some errors and limitations. You've addressed the main requirements of the \
             task, though some aspects could be more fully developed. To improve your score, \
             focus on developing more complex sentence structures, expanding your vocabulary \
             range, and organizing your ideas more coherently."
        )
    } else if score >= 5.0 {
        format!(
            "Your writing shows a modest command of English for {focus}. While you've attempted \
             to address the task, your response is underdeveloped in places with limitations in \
             organization, vocabulary, and grammar that affect clarity. To improve, practice \
             developing your ideas more fully, using a wider range of vocabulary and grammatical \
             structures, and organizing your writing more effectively."
        )
    } else {
        format!(
            "Your writing demonstrates a limited command of English for {focus}. There are \
             significant issues with task achievement, organization, vocabulary, and grammar that \
             impede communication. To improve, focus on understanding task requirements better, \
             developing basic paragraph structure, expanding your vocabulary, and practicing \
             fundamental grammatical structures."
        )
    }
}

/// Package scores, comments and the rewrite into a result.
pub fn assemble(
    scores: &CriterionScores,
    comments: CriterionComments,
    task: TaskType,
    improved_version: String,
) -> FeedbackResult {
    let overall_score = scores.overall();
    FeedbackResult {
        task_achievement: CriterionScore {
            score: scores.task_achievement,
            feedback: comments.task_achievement,
        },
        coherence_and_cohesion: CriterionScore {
            score: scores.coherence_and_cohesion,
            feedback: comments.coherence_and_cohesion,
        },
        lexical_resource: CriterionScore {
            score: scores.lexical_resource,
            feedback: comments.lexical_resource,
        },
        grammatical_range_and_accuracy: CriterionScore {
            score: scores.grammatical_range_and_accuracy,
            feedback: comments.grammatical_range_and_accuracy,
        },
        overall_score,
        overall_feedback: overall_feedback(overall_score, task),
        improved_version,
    }
}

/// The fixed result returned when grading fails. The submission text is
/// echoed back as the improved version.
pub fn fallback_result(original: &str) -> FeedbackResult {
    let improved_version = if original.trim().is_empty() {
        NO_RESPONSE_PROVIDED.to_string()
    } else {
        original.to_string()
    };

    let score = |feedback: &str| CriterionScore {
        score: BASE_SCORE,
        feedback: feedback.to_string(),
    };

    FeedbackResult {
        task_achievement: score(
            "Your response addresses the task, but could be more comprehensive.",
        ),
        coherence_and_cohesion: score(
            "Your ideas are generally well-organized, but transitions could be improved.",
        ),
        lexical_resource: score(
            "You use a reasonable range of vocabulary with some errors in word choice.",
        ),
        grammatical_range_and_accuracy: score(
            "You demonstrate a mix of simple and complex sentences with some grammatical errors.",
        ),
        overall_score: BASE_SCORE,
        overall_feedback: "Your writing shows competence but needs improvement in several areas \
                           to achieve a higher band score."
            .to_string(),
        improved_version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Criterion;

    fn comments() -> CriterionComments {
        CriterionComments {
            task_achievement: "ta".into(),
            coherence_and_cohesion: "cc".into(),
            lexical_resource: "lr".into(),
            grammatical_range_and_accuracy: "gra".into(),
        }
    }

    #[test]
    fn overall_feedback_tiers() {
        assert!(overall_feedback(8.0, TaskType::Task1).starts_with("Excellent work!"));
        assert!(overall_feedback(7.9, TaskType::Task1).starts_with("Good job!"));
        assert!(overall_feedback(6.0, TaskType::Task2).contains("generally effective"));
        assert!(overall_feedback(5.5, TaskType::Task2).contains("modest command"));
        assert!(overall_feedback(4.9, TaskType::Task2).contains("limited command"));
    }

    #[test]
    fn overall_feedback_mentions_task_focus() {
        assert!(overall_feedback(6.5, TaskType::Task1)
            .contains("data interpretation and description"));
        assert!(overall_feedback(6.5, TaskType::Task2)
            .contains("essay writing and argumentation"));
    }

    #[test]
    fn assemble_uses_mean_for_overall() {
        let scores = CriterionScores {
            task_achievement: 7.0,
            coherence_and_cohesion: 8.0,
            lexical_resource: 7.0,
            grammatical_range_and_accuracy: 6.0,
        };
        let result = assemble(&scores, comments(), TaskType::Task2, "better".into());
        assert_eq!(result.overall_score, 7.0);
        assert!(result.overall_feedback.starts_with("Good job!"));
        assert_eq!(result.criterion(Criterion::CoherenceAndCohesion).score, 8.0);
        assert_eq!(result.grammatical_range_and_accuracy.feedback, "gra");
        assert_eq!(result.improved_version, "better");
    }

    #[test]
    fn fallback_echoes_input() {
        let result = fallback_result("my essay");
        assert_eq!(result.improved_version, "my essay");
        assert_eq!(result.overall_score, 6.0);
        for criterion in Criterion::ALL {
            assert_eq!(result.criterion(criterion).score, 6.0);
        }
    }

    #[test]
    fn fallback_on_blank_input() {
        assert_eq!(fallback_result("  ").improved_version, NO_RESPONSE_PROVIDED);
    }
}
