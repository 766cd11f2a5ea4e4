//! mdgram CLI - Mermaid diagrams in Markdown.
//!
//! Provides commands for:
//! - `extract`: List the diagrams found in Markdown files
//! - `check`: Run syntax checks on every extracted diagram

mod commands;
mod error;
mod output;
mod sources;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use commands::{CheckArgs, ExtractArgs};
use output::Output;

/// mdgram - Mermaid diagrams in Markdown.
#[derive(Parser)]
#[command(name = "mdgram", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract diagrams from Markdown files.
    Extract(ExtractArgs),
    /// Check extracted diagrams for syntax errors.
    Check(CheckArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Extract(args) => args.verbose,
            Self::Check(args) => args.verbose,
        }
    }
}

/// `--verbose` enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.command.verbose()))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Extract(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
