//! Command-line argument definitions for `log-extract`.
//!
//! Uses [`clap`] derive macros for argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::formatter::OutputFormat;
use crate::pattern::LogFormat;
use crate::timestamp::parse_date_bound;

/// Extract structured data from log files.
///
/// Reads log lines from FILE (or stdin), captures fields with the selected
/// format's pattern, and prints the matched records as JSON, CSV, or
/// tab-separated text.
#[derive(Debug, Parser)]
#[command(name = "log-extract", version, about, long_about = None)]
pub struct Cli {
    /// Log file to process (default: stdin).
    pub file: Option<PathBuf>,

    /// Log format to parse.
    ///
    /// Defaults to `apache` unless the config file says otherwise.
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<LogFormat>,

    /// Custom regex pattern with named groups (use with `-f custom`).
    #[arg(short = 'p', long)]
    pub pattern: Option<String>,

    /// Output format.
    ///
    /// Defaults to `json` unless the config file says otherwise.
    #[arg(short = 'o', long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Keep only records at or after this ISO 8601 date or date-time.
    #[arg(long, value_parser = parse_date_arg)]
    pub start_date: Option<jiff::Timestamp>,

    /// Keep only records at or before this ISO 8601 date or date-time.
    #[arg(long, value_parser = parse_date_arg)]
    pub end_date: Option<jiff::Timestamp>,

    /// Keep only records whose field matches a regex, as `field:regex`.
    #[arg(long)]
    pub filter: Option<String>,

    /// Print total/matched line counts and match rate to stderr.
    #[arg(short = 's', long)]
    pub stats: bool,

    /// Path to configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr (`RUST_LOG` takes precedence).
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Parse a date bound argument.
fn parse_date_arg(s: &str) -> Result<jiff::Timestamp, String> {
    parse_date_bound(s).map_err(|_| format!("invalid date format: {s}"))
}
