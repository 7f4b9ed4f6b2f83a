//! The `bandwise prompt` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use bandwise_prompts::random_question;

use super::load_with_task;

pub fn execute(
    task: Option<String>,
    seed: Option<u64>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json"),
        "unknown format '{format}': expected text or json"
    );

    let (config, task) = load_with_task(config_path.as_deref(), task.as_deref())?;
    let mut rng = match seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let question = random_question(task, &mut rng);

    if format == "json" {
        let json =
            serde_json::to_string_pretty(&question).context("failed to serialize question")?;
        println!("{json}");
    } else {
        println!("{}", question.title);
        println!("{}\n", question.description);
        println!("{}", question.prompt);
    }

    Ok(())
}
