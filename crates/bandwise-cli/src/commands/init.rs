//! The `bandwise init` command.

use std::path::Path;

use anyhow::{Context, Result};

use bandwise_core::config::SAMPLE_CONFIG;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("bandwise.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("responses").context("failed to create responses/")?;
    write_if_missing(Path::new("responses/sample-task2.txt"), SAMPLE_RESPONSE)?;

    println!("\nNext steps:");
    println!("  1. Run: bandwise prompt --task task2");
    println!("  2. Write your answer to a file under responses/");
    println!("  3. Run: bandwise grade --task task2 responses/sample-task2.txt");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_RESPONSE: &str = "\
Nowadays, many people believe that universities should prepare students for employment rather \
than focus on academic skills. I think that both goals are very important.

Firstly, a degree is a big investment. Students want a good job after they graduate, so courses \
that teach practical skills help them compete in the labour market.

However, academic skills are the foundation of every profession. Critical thinking and research \
methods make graduates adaptable when industries change.

In conclusion, universities should balance academic study with career preparation so that \
graduates are ready for both work and lifelong learning.
";
