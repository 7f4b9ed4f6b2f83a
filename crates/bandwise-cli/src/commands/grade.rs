//! The `bandwise grade` command.

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use bandwise_core::engine::{BatchItem, FeedbackEngine, ProgressReporter};
use bandwise_core::{Criterion, GradedSubmission, GradingReport};

use super::load_with_task;

/// Console progress reporter. Writes to stderr so stdout stays clean.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_grade_start(&self, name: &str) {
        eprintln!("  Grading: {name}");
    }

    fn on_grade_complete(&self, entry: &GradedSubmission) {
        match &entry.error {
            Some(error) => eprintln!("  Rejected: {} ({error})", entry.name),
            None => eprintln!(
                "  Done: {} overall {:.1} ({} words)",
                entry.name, entry.result.overall_score, entry.word_count
            ),
        }
    }

    fn on_batch_complete(&self, total: usize, rejected: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {}/{total} graded, {rejected} rejected ({:.1}s)",
            total - rejected,
            elapsed.as_secs_f64()
        );
    }
}

pub async fn execute(
    task: Option<String>,
    files: Vec<PathBuf>,
    format: String,
    seed: Option<u64>,
    latency_ms: Option<u64>,
    parallelism: Option<usize>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json" | "markdown"),
        "unknown format '{format}': expected text, json or markdown"
    );

    let (mut config, task) = load_with_task(config_path.as_deref(), task.as_deref())?;
    if let Some(seed) = seed {
        config.seed = Some(seed);
    }
    if let Some(ms) = latency_ms {
        config.simulated_latency_ms = ms;
    }
    if let Some(n) = parallelism {
        config.parallelism = n;
    }
    anyhow::ensure!(config.parallelism >= 1, "parallelism must be at least 1");

    let items = read_items(&files)?;
    eprintln!("bandwise: grading {} {task} response(s)", items.len());

    let engine = FeedbackEngine::new(config);
    let report = engine.grade_batch(task, items, &ConsoleReporter).await;

    match format.as_str() {
        "json" => println!("{}", report.to_json()?),
        "markdown" => print!("{}", report.to_markdown()),
        _ => print_text(&report),
    }

    anyhow::ensure!(
        report.rejected_count() < report.entries.len(),
        "no response could be graded"
    );
    Ok(())
}

fn read_items(files: &[PathBuf]) -> Result<Vec<BatchItem>> {
    if files.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read response from stdin")?;
        return Ok(vec![BatchItem::new("<stdin>", text)]);
    }

    files
        .iter()
        .map(|path| -> Result<BatchItem> {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read response: {}", path.display()))?;
            Ok(BatchItem::new(path.display().to_string(), text))
        })
        .collect()
}

fn print_text(report: &GradingReport) {
    for entry in &report.entries {
        println!("== {} ({} words) ==", entry.name, entry.word_count);
        if let Some(error) = &entry.error {
            println!("Rejected: {error}\n");
            continue;
        }

        let result = &entry.result;
        let mut table = Table::new();
        table.set_header(vec!["Criterion", "Score"]);
        for criterion in Criterion::ALL {
            table.add_row(vec![
                Cell::new(criterion.label()),
                Cell::new(format!("{:.1}", result.criterion(criterion).score)),
            ]);
        }
        table.add_row(vec![
            Cell::new("Overall"),
            Cell::new(format!("{:.1}", result.overall_score)),
        ]);
        println!("{table}\n");

        for criterion in Criterion::ALL {
            println!("{}:\n  {}\n", criterion.label(), result.criterion(criterion).feedback);
        }
        println!("Overall:\n  {}\n", result.overall_feedback);
        println!("Improved version:\n\n{}\n", result.improved_version);
    }

    if report.entries.len() > 1 {
        if let Some(avg) = report.average_overall() {
            println!("Average overall: {avg:.1}");
        }
    }
}
