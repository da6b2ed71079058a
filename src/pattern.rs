//! Built-in log formats and their named-capture-group patterns.
//!
//! The set of formats is closed: three built-in layouts plus a `custom`
//! variant whose expression is supplied by the caller. Every pattern is
//! compiled up front, so a malformed expression is reported when the
//! [`Pattern`] is built, never halfway through an input file.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use regex::Regex;

use crate::error::ExtractError;
use crate::fields;

/// Apache common log format.
///
/// Fields: `ip`, `user`, `timestamp`, `method`, `path`, `protocol`, `status`, `size`.
pub const APACHE: &str = r#"(?P<ip>[\d.]+) - (?P<user>\S+) \[(?P<timestamp>[^\]]+)\] "(?P<method>\S+) (?P<path>\S+) (?P<protocol>\S+)" (?P<status>\d+) (?P<size>\S+)"#;

/// Nginx combined log format: the Apache fields plus `referrer` and `user_agent`.
pub const NGINX: &str = r#"(?P<ip>[\d.]+) - (?P<user>\S+) \[(?P<timestamp>[^\]]+)\] "(?P<method>\S+) (?P<path>\S+) (?P<protocol>\S+)" (?P<status>\d+) (?P<size>\d+) "(?P<referrer>[^"]*)" "(?P<user_agent>[^"]*)""#;

/// BSD syslog: `timestamp`, `host`, `process`, optional `pid`, `message`.
pub const SYSLOG: &str = r"(?P<timestamp>\w+\s+\d+\s+[\d:]+) (?P<host>\S+) (?P<process>\S+?)(?:\[(?P<pid>\d+)\])?: (?P<message>.*)";

/// Log format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum LogFormat {
    /// Apache common log format.
    #[default]
    Apache,
    /// Nginx combined log format.
    Nginx,
    /// BSD syslog.
    Syslog,
    /// User-supplied regular expression with named groups.
    Custom,
}

impl LogFormat {
    /// Identifier used on the command line and in config files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Apache => "apache",
            Self::Nginx => "nginx",
            Self::Syslog => "syslog",
            Self::Custom => "custom",
        }
    }

    /// The fixed expression for a built-in format; `None` for [`Custom`](Self::Custom).
    pub const fn builtin_pattern(self) -> Option<&'static str> {
        match self {
            Self::Apache => Some(APACHE),
            Self::Nginx => Some(NGINX),
            Self::Syslog => Some(SYSLOG),
            Self::Custom => None,
        }
    }
}

impl FromStr for LogFormat {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apache" => Ok(Self::Apache),
            "nginx" => Ok(Self::Nginx),
            "syslog" => Ok(Self::Syslog),
            "custom" => Ok(Self::Custom),
            other => Err(ExtractError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A compiled pattern bound to a [`LogFormat`].
#[derive(Debug, Clone)]
pub struct Pattern {
    format: LogFormat,
    regex: Regex,
}

impl Pattern {
    /// Compile the pattern for `format`.
    ///
    /// `custom` is only consulted for [`LogFormat::Custom`]; built-in formats
    /// ignore it. A custom pattern must be present and must not name a group
    /// after one of the [reserved fields](crate::fields::RESERVED).
    pub fn new(format: LogFormat, custom: Option<&str>) -> Result<Self, ExtractError> {
        let source = match format.builtin_pattern() {
            Some(builtin) => builtin,
            None => custom
                .filter(|p| !p.is_empty())
                .ok_or(ExtractError::CustomPatternRequired)?,
        };

        let regex = Regex::new(source)?;

        if format == LogFormat::Custom
            && let Some(name) = regex
                .capture_names()
                .flatten()
                .find(|name| fields::is_reserved(name))
        {
            return Err(ExtractError::ReservedField(name.to_string()));
        }

        tracing::debug!(%format, groups = regex.captures_len() - 1, "compiled pattern");
        Ok(Self { format, regex })
    }

    /// Compile the pattern for a format given by name.
    pub fn from_name(name: &str, custom: Option<&str>) -> Result<Self, ExtractError> {
        Self::new(name.parse()?, custom)
    }

    pub const fn format(&self) -> LogFormat {
        self.format
    }

    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Named capture groups in definition order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.regex.capture_names().flatten()
    }
}
