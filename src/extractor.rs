//! The extraction engine: applies a [`Pattern`] to lines of log text.
//!
//! Each line is searched (not anchored) for the active pattern. A match
//! becomes a [`Record`] holding every named group, followed by the
//! engine-added fields `line_number`, `raw_line`, and, when the pattern has
//! the corresponding groups, `parsed_timestamp` and `ip_version`. Lines that
//! do not match are skipped and only show up in [`Stats`].

use std::io::BufRead;

use regex::Captures;

use crate::error::ExtractError;
use crate::fields;
use crate::pattern::{LogFormat, Pattern};
use crate::record::{Record, Value};
use crate::timestamp::Timestamp;

/// Line counters for one [`Extractor`].
///
/// Counters accumulate over every `extract` call made on the same extractor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_lines: u64,
    pub matched_lines: u64,
}

impl Stats {
    /// Matched lines as a percentage of total lines; `0.0` before any input.
    #[allow(clippy::cast_precision_loss)]
    pub fn match_rate(&self) -> f64 {
        if self.total_lines == 0 {
            return 0.0;
        }
        self.matched_lines as f64 / self.total_lines as f64 * 100.0
    }
}

/// Extracts [`Record`]s from lines of text using one compiled pattern.
#[derive(Debug, Clone)]
pub struct Extractor {
    pattern: Pattern,
    stats: Stats,
}

impl Extractor {
    /// Build an extractor for `format`; see [`Pattern::new`] for the errors.
    pub fn new(format: LogFormat, custom: Option<&str>) -> Result<Self, ExtractError> {
        Ok(Self::with_pattern(Pattern::new(format, custom)?))
    }

    pub const fn with_pattern(pattern: Pattern) -> Self {
        Self {
            pattern,
            stats: Stats {
                total_lines: 0,
                matched_lines: 0,
            },
        }
    }

    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub const fn stats(&self) -> Stats {
        self.stats
    }

    /// Extract records from a line-oriented reader.
    ///
    /// The reader is consumed exactly once. The line terminator (`\n` or
    /// `\r\n`) is stripped from each line, and invalid UTF-8 is replaced
    /// rather than rejected.
    /// Read errors are returned as-is; records gathered before the error are
    /// discarded but still counted in [`stats`](Self::stats).
    pub fn extract<R: BufRead>(&mut self, mut reader: R) -> Result<Vec<Record>, ExtractError> {
        let mut records = Vec::new();
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            line_number += 1;
            let line = String::from_utf8_lossy(&buf);
            if let Some(record) = self.process_line(line_number, &line) {
                records.push(record);
            }
        }

        self.log_summary(line_number, records.len());
        Ok(records)
    }

    /// Extract records from lines that are already in memory.
    ///
    /// Each item is one line; a trailing `\n` or `\r\n` is stripped if present.
    pub fn extract_lines<I, S>(&mut self, lines: I) -> Vec<Record>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records = Vec::new();
        let mut line_number = 0;

        for line in lines {
            line_number += 1;
            let line = line.as_ref();
            let line = line
                .strip_suffix('\n')
                .map_or(line, |l| l.strip_suffix('\r').unwrap_or(l));
            if let Some(record) = self.process_line(line_number, line) {
                records.push(record);
            }
        }

        self.log_summary(line_number, records.len());
        records
    }

    fn process_line(&mut self, line_number: i64, line: &str) -> Option<Record> {
        self.stats.total_lines += 1;

        let Some(caps) = self.pattern.regex().captures(line) else {
            tracing::trace!(line_number, "line did not match");
            return None;
        };

        let record = self.build_record(&caps, line_number, line);
        self.stats.matched_lines += 1;
        Some(record)
    }

    fn build_record(&self, caps: &Captures<'_>, line_number: i64, line: &str) -> Record {
        let mut record = Record::new();
        for name in self.pattern.field_names() {
            let value = caps
                .name(name)
                .map_or(Value::Absent, |m| Value::from(m.as_str()));
            record.insert(name, value);
        }

        record.insert(fields::LINE_NUMBER, line_number);
        record.insert(fields::RAW_LINE, line);

        if let Some(raw) = record.get(fields::TIMESTAMP) {
            let parsed = raw.as_str().and_then(Timestamp::parse);
            record.insert(fields::PARSED_TIMESTAMP, parsed);
        }

        if let Some(ip) = record.get(fields::IP) {
            let version = ip
                .as_str()
                .map_or(Value::Absent, |ip| Value::from(ip_version(ip)));
            record.insert(fields::IP_VERSION, version);
        }

        record
    }

    fn log_summary(&self, lines: i64, matched: usize) {
        tracing::debug!(
            format = %self.pattern.format(),
            lines,
            matched,
            total_lines = self.stats.total_lines,
            total_matched = self.stats.matched_lines,
            "extraction finished"
        );
    }
}

/// Classify an IP address string: `"v6"` if it contains a colon, else `"v4"`.
pub fn ip_version(ip: &str) -> &'static str {
    if ip.contains(':') { "v6" } else { "v4" }
}
