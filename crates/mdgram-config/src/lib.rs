//! Configuration management for mdgram.
//!
//! Parses `mdgram.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `sources.dir` supports `${VAR}` (errors if unset) and `${VAR:-default}`.

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdgram.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the source directory scanned when no paths are given.
    pub source_dir: Option<PathBuf>,
    /// Override output format.
    pub format: Option<OutputFormat>,
    /// Override JSON pretty-printing.
    pub pretty: Option<bool>,
    /// Override whether invalid diagrams fail `mdgram check`.
    pub fail_on_invalid: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source discovery configuration (paths are relative strings from TOML).
    sources: SourcesConfigRaw,
    /// Output configuration.
    pub output: OutputConfig,
    /// Syntax check configuration.
    pub check: CheckConfig,

    /// Resolved sources configuration (set after loading).
    #[serde(skip)]
    pub sources_resolved: SourcesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw sources configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SourcesConfigRaw {
    dir: Option<String>,
    extensions: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
}

/// Resolved source discovery configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcesConfig {
    /// Directory walked when no paths are given on the command line.
    pub dir: PathBuf,
    /// File extensions (without dot) treated as Markdown.
    pub extensions: Vec<String>,
    /// Glob patterns of paths to skip during directory walks.
    pub exclude: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            extensions: default_extensions(),
            exclude: Vec::new(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_owned(), "markdown".to_owned()]
}

/// Output format for extracted diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON array of per-file results.
    #[default]
    Json,
    /// Human-readable listing.
    Text,
}

impl OutputFormat {
    /// Return format as string representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            other => Err(format!("unknown output format `{other}` (expected json or text)")),
        }
    }
}

/// Output configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format.
    pub format: OutputFormat,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: true,
        }
    }
}

/// Syntax check configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Exit with an error when any diagram fails its syntax check.
    pub fail_on_invalid: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            fail_on_invalid: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`sources.dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdgram.toml` in current directory and parents,
    /// falling back to defaults relative to the current directory.
    ///
    /// CLI settings are applied after loading and path resolution.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.sources_resolved.dir.clone_from(source_dir);
        }
        if let Some(format) = settings.format {
            self.output.format = format;
        }
        if let Some(pretty) = settings.pretty {
            self.output.pretty = pretty;
        }
        if let Some(fail_on_invalid) = settings.fail_on_invalid {
            self.check.fail_on_invalid = fail_on_invalid;
        }
    }

    /// Search for config file starting at `start` and walking up its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_config_from(&cwd)
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            sources: SourcesConfigRaw::default(),
            output: OutputConfig::default(),
            check: CheckConfig::default(),
            sources_resolved: SourcesConfig {
                dir: base.to_path_buf(),
                ..SourcesConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_sources()
    }

    /// Validate sources configuration.
    fn validate_sources(&self) -> Result<(), ConfigError> {
        let sources = &self.sources_resolved;

        if sources.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "sources.extensions cannot be empty".to_owned(),
            ));
        }
        for ext in &sources.extensions {
            if ext.is_empty() {
                return Err(ConfigError::Validation(
                    "sources.extensions cannot contain empty entries".to_owned(),
                ));
            }
            if ext.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "sources.extensions entry `{ext}` must not start with a dot"
                )));
            }
        }
        for pattern in &sources.exclude {
            glob::Pattern::new(pattern).map_err(|e| {
                ConfigError::Validation(format!(
                    "sources.exclude pattern `{pattern}` is invalid: {e}"
                ))
            })?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.sources.dir {
            self.sources.dir = Some(expand::expand_env(dir, "sources.dir")?);
        }
        Ok(())
    }

    /// Resolve raw TOML values against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.sources_resolved = SourcesConfig {
            dir: self
                .sources
                .dir
                .as_deref()
                .map_or_else(|| config_dir.to_path_buf(), |d| config_dir.join(d)),
            extensions: self
                .sources
                .extensions
                .clone()
                .unwrap_or_else(default_extensions),
            exclude: self.sources.exclude.clone().unwrap_or_default(),
        };
    }
}
