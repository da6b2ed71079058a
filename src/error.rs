//! Error types for `log-extract`.
//!
//! Uses [`thiserror`] for ergonomic error derivation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while extracting, filtering, or rendering records.
///
/// Non-matching lines and unparseable timestamps are never errors; they are
/// skipped or stored as absent values. Everything listed here is surfaced to
/// the caller, and the binary maps every variant to exit code 1.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Configuration error (invalid flag combination, bad config file value).
    #[error("configuration error: {0}")]
    Config(String),

    /// Format identifier outside the built-in set.
    #[error("unknown format: {0}")]
    UnknownFormat(String),

    /// `custom` format requested without a pattern string.
    #[error("custom pattern required for custom format")]
    CustomPatternRequired,

    /// Malformed custom pattern or field filter regex.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Custom capture group named like a field the engine adds itself.
    #[error("capture group `{0}` collides with a reserved field name")]
    ReservedField(String),

    /// Date bound that is not an ISO-8601 date or date-time.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Input file does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization error.
    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON rendering error.
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV rendering error.
    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),
}

impl ExtractError {
    /// Whether this error is raised while building a pattern or configuration,
    /// before any input is read.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::UnknownFormat(_)
                | Self::CustomPatternRequired
                | Self::InvalidPattern(_)
                | Self::ReservedField(_)
                | Self::InvalidDate(_)
                | Self::Toml(_)
        )
    }
}
