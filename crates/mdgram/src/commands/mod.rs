//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod extract;

use std::path::PathBuf;

use clap::Args;
use mdgram_config::{CliSettings, Config};

use crate::error::CliError;
use crate::sources::Discovery;

pub(crate) use check::CheckArgs;
pub(crate) use extract::ExtractArgs;

/// Arguments shared by every command that reads Markdown sources.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Markdown files or directories (default: `sources.dir` from config).
    paths: Vec<PathBuf>,

    /// Path to configuration file (default: auto-discover mdgram.toml).
    #[arg(short, long, env = "MDGRAM_CONFIG")]
    config: Option<PathBuf>,

    /// Directory scanned when no paths are given (overrides config).
    #[arg(long)]
    source_dir: Option<PathBuf>,
}

impl SourceArgs {
    /// Load configuration and resolve the files to process.
    pub(crate) fn resolve(
        &self,
        mut settings: CliSettings,
    ) -> Result<(Config, Vec<PathBuf>), CliError> {
        settings.source_dir.clone_from(&self.source_dir);
        let config = Config::load(self.config.as_deref(), Some(&settings))?;
        match &config.config_path {
            Some(path) => tracing::info!(path = %path.display(), "Loaded configuration"),
            None => tracing::info!("No mdgram.toml found, using defaults"),
        }

        let roots = if self.paths.is_empty() {
            vec![config.sources_resolved.dir.clone()]
        } else {
            self.paths.clone()
        };
        let files = Discovery::new(&config.sources_resolved).discover(&roots)?;

        Ok((config, files))
    }
}

/// Display form of a 0-based line range.
pub(crate) fn display_lines(start_line: usize, end_line: usize) -> String {
    if start_line == end_line {
        format!("line {}", start_line + 1)
    } else {
        format!("lines {}-{}", start_line + 1, end_line + 1)
    }
}
