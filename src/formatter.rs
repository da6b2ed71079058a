//! Output renderers for extracted records.
//!
//! Every renderer implements [`Formatter`]: a record sequence in, a string out.
//! - JSON: pretty-printed array of objects, fields in record order
//! - CSV: header row plus one row per record
//! - Text: tab-separated header and rows
//!
//! The tabular renderers take their header from the first record. Later
//! records are projected onto that header: missing fields become empty cells
//! and fields outside the header are dropped. Empty input renders as the
//! empty string.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use crate::error::ExtractError;
use crate::record::{Record, Value};

/// Renders a sequence of records as text.
pub trait Formatter {
    fn format(&self, records: &[Record]) -> Result<String, ExtractError>;
}

/// Pretty-printed JSON array.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

/// Comma-separated values with a header row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFormatter;

/// Tab-separated plain text with a header row.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, records: &[Record]) -> Result<String, ExtractError> {
        Ok(serde_json::to_string_pretty(records)?)
    }
}

impl Formatter for CsvFormatter {
    fn format(&self, records: &[Record]) -> Result<String, ExtractError> {
        let Some(header) = header(records) else {
            return Ok(String::new());
        };

        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(&header)?;
        for record in records {
            writer.write_record(project(record, &header))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ExtractError::Io(e.into_error()))?;
        let out = String::from_utf8_lossy(&bytes);
        Ok(out.trim_end_matches('\n').to_string())
    }
}

impl Formatter for TextFormatter {
    fn format(&self, records: &[Record]) -> Result<String, ExtractError> {
        let Some(header) = header(records) else {
            return Ok(String::new());
        };

        let mut lines = Vec::with_capacity(records.len() + 1);
        lines.push(header.join("\t"));
        for record in records {
            lines.push(project(record, &header).collect::<Vec<_>>().join("\t"));
        }
        Ok(lines.join("\n"))
    }
}

/// Field names of the first record.
fn header(records: &[Record]) -> Option<Vec<&str>> {
    records.first().map(|first| first.keys().collect())
}

/// Render `record`'s values in `header` order.
fn project<'a>(record: &'a Record, header: &'a [&'a str]) -> impl Iterator<Item = String> + 'a {
    header
        .iter()
        .map(|name| record.get(name).map(Value::to_string).unwrap_or_default())
}

/// Output encoding identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON array of objects.
    #[default]
    Json,
    /// Comma-separated values.
    Csv,
    /// Tab-separated plain text.
    Text,
}

impl OutputFormat {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "text",
        }
    }

    /// The renderer for this encoding.
    pub fn formatter(self) -> Box<dyn Formatter> {
        match self {
            Self::Json => Box::new(JsonFormatter),
            Self::Csv => Box::new(CsvFormatter),
            Self::Text => Box::new(TextFormatter),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "text" => Ok(Self::Text),
            other => Err(ExtractError::Config(format!(
                "unknown output format '{other}': expected one of json, csv, text"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
