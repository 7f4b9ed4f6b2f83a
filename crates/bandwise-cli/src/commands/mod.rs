pub mod grade;
pub mod init;
pub mod prompt;

use std::path::Path;

use anyhow::{Context, Result};

use bandwise_core::config::load_config_from;
use bandwise_core::{EngineConfig, TaskType};

/// Load config and resolve the task type, falling back to the configured
/// default.
pub fn load_with_task(
    config_path: Option<&Path>,
    task: Option<&str>,
) -> Result<(EngineConfig, TaskType)> {
    let config = load_config_from(config_path)?;
    let task = match task {
        Some(t) => t
            .parse::<TaskType>()
            .with_context(|| format!("bad --task value '{t}'"))?,
        None => config.default_task,
    };
    Ok((config, task))
}
