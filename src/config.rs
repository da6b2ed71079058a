//! Configuration management with TOML file support.
//!
//! Merges settings from three sources (highest precedence first):
//! 1. CLI flags
//! 2. Config file (`$XDG_CONFIG_HOME/log-extract/config.toml` or `~/.config/log-extract/config.toml`)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::ExtractError;
use crate::formatter::OutputFormat;
use crate::pattern::LogFormat;
use crate::timestamp::parse_date_bound;

/// Runtime configuration merged from defaults, config file, and CLI arguments.
///
/// Use [`Config::from_cli`] to build from parsed CLI arguments, or
/// [`Config::default`] for built-in defaults (useful in tests and benchmarks).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Input file; `None` reads stdin.
    pub input: Option<PathBuf>,
    /// Log format whose pattern is applied to each line.
    pub format: LogFormat,
    /// Pattern for [`LogFormat::Custom`].
    pub pattern: Option<String>,
    /// Output encoding.
    pub output: OutputFormat,
    /// Inclusive lower bound on `parsed_timestamp`.
    pub start_date: Option<jiff::Timestamp>,
    /// Inclusive upper bound on `parsed_timestamp`.
    pub end_date: Option<jiff::Timestamp>,
    /// `field:regex` filter applied after the date filter.
    pub filter: Option<String>,
    /// Print statistics to stderr after the output.
    pub stats: bool,
}

impl Config {
    /// Build a [`Config`] from CLI arguments, loading the config file if present.
    ///
    /// Merge precedence: CLI flags > config file > defaults. An explicit
    /// `--config` path must exist; the default path is optional.
    pub fn from_cli(cli: &Cli) -> Result<Self, ExtractError> {
        let mut config = Self::default();

        let config_path = match cli.config {
            Some(ref path) => Some(path.clone()),
            None => Some(Self::default_config_path()).filter(|p| p.exists()),
        };
        if let Some(path) = config_path {
            let file_config = FileConfig::load(&path)?;
            config.apply_file_config(file_config)?;
            tracing::debug!(path = %path.display(), "loaded config file");
        }

        // CLI overrides
        config.input.clone_from(&cli.file);

        if let Some(format) = cli.format {
            config.format = format;
        }
        if cli.pattern.is_some() {
            config.pattern.clone_from(&cli.pattern);
        }
        if let Some(output) = cli.output {
            config.output = output;
        }
        if cli.start_date.is_some() {
            config.start_date = cli.start_date;
        }
        if cli.end_date.is_some() {
            config.end_date = cli.end_date;
        }
        if cli.filter.is_some() {
            config.filter.clone_from(&cli.filter);
        }
        config.stats |= cli.stats;

        if cli.pattern.is_some() && config.format != LogFormat::Custom {
            return Err(ExtractError::Config(format!(
                "--pattern can only be used with --format custom (format is {})",
                config.format
            )));
        }
        config.validate()?;

        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.format == LogFormat::Custom && self.pattern.as_deref().is_none_or(str::is_empty) {
            return Err(ExtractError::Config(
                "--pattern required when using --format custom".to_string(),
            ));
        }
        Ok(())
    }

    /// Default config file path: `$XDG_CONFIG_HOME/log-extract/config.toml` or `~/.config/log-extract/config.toml`.
    fn default_config_path() -> PathBuf {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(xdg).join("log-extract").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("log-extract")
                .join("config.toml")
        } else {
            PathBuf::from(".config/log-extract/config.toml")
        }
    }

    /// Apply settings from a parsed config file.
    fn apply_file_config(&mut self, file: FileConfig) -> Result<(), ExtractError> {
        if let Some(format) = file.format {
            self.format = format.parse()?;
        }
        if let Some(pattern) = file.pattern {
            self.pattern = Some(pattern);
        }
        if let Some(output) = file.output {
            self.output = output.parse()?;
        }
        if let Some(start) = file.start_date {
            self.start_date = Some(parse_date_bound(&start)?);
        }
        if let Some(end) = file.end_date {
            self.end_date = Some(parse_date_bound(&end)?);
        }
        if let Some(filter) = file.filter {
            self.filter = Some(filter);
        }
        if let Some(stats) = file.stats {
            self.stats = stats;
        }
        Ok(())
    }
}

/// Config file structure (TOML deserialization).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    format: Option<String>,
    pattern: Option<String>,
    output: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    filter: Option<String>,
    stats: Option<bool>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, ExtractError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ExtractError::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
