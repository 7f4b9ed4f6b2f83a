//! Batch grading report types and rendering.
//!
//! Reports are printed, never persisted.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Criterion, FeedbackResult, TaskType};
use crate::scoring::round_to_tenth;

/// One graded submission in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradedSubmission {
    /// File name or `<stdin>`.
    pub name: String,
    pub word_count: usize,
    pub result: FeedbackResult,
    /// Set when the submission was rejected and `result` is the fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GradedSubmission {
    pub fn is_rejected(&self) -> bool {
        self.error.is_some()
    }
}

/// The outcome of grading a batch of submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingReport {
    /// Unique run identifier.
    pub run_id: Uuid,
    /// When the run started.
    pub created_at: DateTime<Utc>,
    pub task_type: TaskType,
    /// Entries in submission order.
    pub entries: Vec<GradedSubmission>,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl GradingReport {
    /// Mean overall score across accepted entries, one decimal.
    pub fn average_overall(&self) -> Option<f64> {
        let scores: Vec<f64> = self
            .entries
            .iter()
            .filter(|e| !e.is_rejected())
            .map(|e| e.result.overall_score)
            .collect();
        if scores.is_empty() {
            return None;
        }
        Some(round_to_tenth(
            scores.iter().sum::<f64>() / scores.len() as f64,
        ))
    }

    pub fn rejected_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_rejected()).count()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize report")
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "# Grading report ({})\n\n**Run:** `{}`  \n**Created:** {}  \n**Duration:** {} ms\n\n",
            self.task_type,
            self.run_id,
            self.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.duration_ms
        ));

        md.push_str("| Submission | Words | TA | CC | LR | GRA | Overall |\n");
        md.push_str("|------------|-------|----|----|----|-----|---------|\n");
        for entry in &self.entries {
            let r = &entry.result;
            md.push_str(&format!(
                "| {}{} | {} | {:.1} | {:.1} | {:.1} | {:.1} | **{:.1}** |\n",
                entry.name,
                if entry.is_rejected() { " (rejected)" } else { "" },
                entry.word_count,
                r.task_achievement.score,
                r.coherence_and_cohesion.score,
                r.lexical_resource.score,
                r.grammatical_range_and_accuracy.score,
                r.overall_score
            ));
        }
        md.push('\n');

        for entry in &self.entries {
            md.push_str(&format!("## {}\n\n", entry.name));
            if let Some(error) = &entry.error {
                md.push_str(&format!("> Rejected: {error}\n\n"));
                continue;
            }
            for criterion in Criterion::ALL {
                let score = entry.result.criterion(criterion);
                md.push_str(&format!(
                    "### {} ({:.1})\n\n{}\n\n",
                    criterion.label(),
                    score.score,
                    score.feedback
                ));
            }
            md.push_str(&format!(
                "### Overall ({:.1})\n\n{}\n\n",
                entry.result.overall_score, entry.result.overall_feedback
            ));
            md.push_str("### Improved version\n\n");
            for paragraph in entry.result.improved_version.split("\n\n") {
                md.push_str(&format!("> {paragraph}\n>\n"));
            }
            md.push('\n');
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::fallback_result;

    fn entry(name: &str, overall: f64, error: Option<&str>) -> GradedSubmission {
        let mut result = fallback_result("Some text.\n\nMore text.");
        result.overall_score = overall;
        GradedSubmission {
            name: name.into(),
            word_count: 4,
            result,
            error: error.map(String::from),
        }
    }

    fn make_report(entries: Vec<GradedSubmission>) -> GradingReport {
        GradingReport {
            run_id: Uuid::new_v4(),
            created_at: Utc::now(),
            task_type: TaskType::Task1,
            entries,
            duration_ms: 12,
        }
    }

    #[test]
    fn average_skips_rejected_entries() {
        let report = make_report(vec![
            entry("a.txt", 6.0, None),
            entry("b.txt", 7.0, None),
            entry("c.txt", 6.0, Some("response text is empty")),
        ]);
        assert_eq!(report.average_overall(), Some(6.5));
        assert_eq!(report.rejected_count(), 1);
        assert_eq!(make_report(vec![]).average_overall(), None);
    }

    #[test]
    fn json_has_camel_case_result_fields() {
        let report = make_report(vec![entry("a.txt", 6.0, None)]);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["task_type"], "task1");
        assert_eq!(json["entries"][0]["result"]["overallScore"], 6.0);
        assert!(json["entries"][0].get("error").is_none());
    }

    #[test]
    fn markdown_output() {
        let report = make_report(vec![
            entry("essay.txt", 6.0, None),
            entry("empty.txt", 6.0, Some("response text is empty")),
        ]);
        let md = report.to_markdown();
        assert!(md.contains("# Grading report (task1)"));
        assert!(md.contains("| essay.txt | 4 | 6.0 | 6.0 | 6.0 | 6.0 | **6.0** |"));
        assert!(md.contains("empty.txt (rejected)"));
        assert!(md.contains("> Rejected: response text is empty"));
        assert!(md.contains("### Grammatical Range and Accuracy (6.0)"));
        assert!(md.contains("> Some text.\n>\n> More text."));
    }
}
