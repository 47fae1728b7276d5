//! fakeplate CLI: render text templates filled with generated fake data.
//!
//! Provides four commands: `init`, `render`, `generate`, and `fields`.
//!
//! Every command resolves `%% expression %%` tokens against the built-in
//! provider from [`fakeplate_core::faker`].

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fakeplate",
    about = "Render text templates filled with generated fake data",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to fakeplate.config.json (default: ./fakeplate.config.json)
    #[arg(long, global = true, default_value = fakeplate_core::config::CONFIG_FILE)]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a new project with a config and a sample template
    Init {
        /// Project name (creates a directory with this name)
        name: String,

        /// Number of records `generate` produces by default
        #[arg(long, default_value = "10")]
        count: u64,

        /// Number of concurrent render workers
        #[arg(long, default_value = "4")]
        workers: usize,
    },

    /// Render a template once and print the result
    Render {
        /// Template file
        template: PathBuf,

        /// Seed for reproducible output
        #[arg(long, env = "FAKEPLATE_SEED")]
        seed: Option<u64>,
    },

    /// Render many records from the configured template
    Generate {
        /// Override the number of records
        #[arg(long, short = 'n')]
        count: Option<u64>,

        /// Override the number of concurrent workers
        #[arg(long, short)]
        workers: Option<usize>,

        /// Base seed for reproducible output
        #[arg(long, env = "FAKEPLATE_SEED")]
        seed: Option<u64>,

        /// Write records to this directory instead of the configured sink
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Override the sink kind: stdout or directory
        #[arg(long)]
        sink: Option<String>,
    },

    /// List every expression the built-in provider resolves
    Fields {
        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },
}

/// `-v` flags win, then `RUST_LOG`, then warnings only.
fn log_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init {
            name,
            count,
            workers,
        } => {
            commands::init::run(&name, count, workers)?;
        }
        Commands::Render { template, seed } => {
            commands::render::run(&template, seed)?;
        }
        Commands::Generate {
            count,
            workers,
            seed,
            out_dir,
            sink,
        } => {
            let overrides = commands::generate::Overrides {
                count,
                workers,
                seed,
                out_dir,
                sink,
            };
            commands::generate::run(&cli.config, overrides).await?;
        }
        Commands::Fields { json } => {
            commands::fields::run(json)?;
        }
    }

    Ok(())
}
