//! Engine configuration and loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::TaskType;

/// Environment variable overriding [`EngineConfig::seed`].
pub const SEED_ENV: &str = "BANDWISE_SEED";
/// Environment variable overriding [`EngineConfig::simulated_latency_ms`].
pub const LATENCY_ENV: &str = "BANDWISE_LATENCY_MS";

/// Configuration for the feedback engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Artificial delay before each analysis, in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub simulated_latency_ms: u64,
    /// Seed for comment and rewrite selection. Unset means entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Max concurrent gradings in a batch.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Task type used when the caller does not name one.
    #[serde(default = "default_task")]
    pub default_task: TaskType,
}

fn default_latency_ms() -> u64 {
    2000
}
fn default_parallelism() -> usize {
    4
}
fn default_task() -> TaskType {
    TaskType::Task2
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: default_latency_ms(),
            seed: None,
            parallelism: default_parallelism(),
            default_task: default_task(),
        }
    }
}

impl EngineConfig {
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(SEED_ENV) {
            self.seed = Some(
                raw.trim()
                    .parse()
                    .with_context(|| format!("invalid {SEED_ENV}: '{raw}'"))?,
            );
        }
        if let Some(raw) = lookup(LATENCY_ENV) {
            self.simulated_latency_ms = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid {LATENCY_ENV}: '{raw}'"))?;
        }
        Ok(())
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `bandwise.toml` in the current directory
/// 2. `~/.config/bandwise/config.toml`
///
/// Environment variable overrides: `BANDWISE_SEED`, `BANDWISE_LATENCY_MS`.
pub fn load_config() -> Result<EngineConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<EngineConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("bandwise.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            parse_config_file(&path)?
        }
        None => EngineConfig::default(),
    };

    config.apply_env(|name| std::env::var(name).ok())?;
    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<EngineConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("bandwise"))
}

/// Commented starter config written by `bandwise init`.
pub const SAMPLE_CONFIG: &str = r#"# bandwise configuration

# Delay before each grading, in milliseconds. Set to 0 for instant results.
simulated_latency_ms = 2000

# Fix the seed to get the same comments and rewrites on every run.
# seed = 42

# Max submissions graded at once by `bandwise grade`.
parallelism = 4

# Task used when --task is not given: "task1" or "task2".
default_task = "task2"
"#;
