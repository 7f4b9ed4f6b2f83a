//! bandwise CLI: practice prompts and heuristic grading for writing tasks.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bandwise", version, about = "Writing-exam practice grader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade one or more responses
    Grade {
        /// Task type: task1 or task2 (default from config)
        #[arg(long)]
        task: Option<String>,

        /// Response files; reads stdin when none are given
        files: Vec<PathBuf>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Seed for comment and rewrite selection
        #[arg(long)]
        seed: Option<u64>,

        /// Simulated analysis delay in milliseconds
        #[arg(long)]
        latency_ms: Option<u64>,

        /// Max concurrent gradings
        #[arg(long)]
        parallelism: Option<usize>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print a practice question
    Prompt {
        /// Task type: task1 or task2 (default from config)
        #[arg(long)]
        task: Option<String>,

        /// Seed for question selection
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and sample response
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bandwise=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            task,
            files,
            format,
            seed,
            latency_ms,
            parallelism,
            config,
        } => {
            commands::grade::execute(task, files, format, seed, latency_ms, parallelism, config)
                .await
        }
        Commands::Prompt {
            task,
            seed,
            format,
            config,
        } => commands::prompt::execute(task, seed, format, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
