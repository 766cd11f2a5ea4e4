//! CLI error types.

use std::path::PathBuf;

use mdgram_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} diagram(s) failed syntax check")]
    InvalidDiagrams(usize),
}
