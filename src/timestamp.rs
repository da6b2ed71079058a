//! Timestamp normalization across heterogeneous log formats.
//!
//! Raw timestamps are tried against an ordered rule table:
//! 1. ISO 8601 with an optional `Z` or `±HH:MM` offset
//! 2. Access-log style `10/Oct/2023:13:55:36 +0000`
//! 3. Syslog style `Nov 15 10:23:45` (no year, fixed to [`SYSLOG_YEAR`])
//!
//! A rule only applies when its detection regex matches at the start of the
//! string. If detection succeeds but the strict parse fails, the next rule is
//! tried. A string no rule accepts normalizes to `None`, never an error.

use std::fmt;
use std::sync::LazyLock;

use jiff::civil;
use jiff::fmt::strtime::BrokenDownTime;
use jiff::tz::Offset;
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::ExtractError;

/// Year assigned to syslog timestamps, which carry none.
pub const SYSLOG_YEAR: i16 = 1900;

/// A normalized timestamp.
///
/// Keeps the wall-clock reading and the offset exactly as written, plus the
/// UTC instant used for ordering. Timestamps without an offset are read as UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    /// Wall-clock date and time as written in the log.
    pub civil: civil::DateTime,
    /// Offset parsed from the log, if the format carries one.
    pub offset: Option<Offset>,
    /// The instant this timestamp denotes.
    pub instant: jiff::Timestamp,
    /// Original string representation.
    pub original: String,
}

#[derive(Debug, Clone, Copy)]
enum Layout {
    Iso8601,
    AccessLog,
    Syslog,
}

struct Rule {
    detect: Regex,
    layout: Layout,
}

static RULES: LazyLock<[Rule; 3]> = LazyLock::new(|| {
    let rule = |detect: &str, layout| Rule {
        detect: Regex::new(detect).expect("timestamp detection regex is valid"),
        layout,
    };
    [
        rule(
            r"^\d{4}-\d{2}-\d{2}T[\d:.]+(?:Z|[+-]\d{2}:\d{2})?",
            Layout::Iso8601,
        ),
        rule(r"^\d{2}/\w+/\d{4}:[\d:]+\s+[+-]\d{4}", Layout::AccessLog),
        rule(r"^\w+\s+\d+\s+[\d:]+", Layout::Syslog),
    ]
});

impl Layout {
    /// Strict parse of `s` against this layout; the whole string must be consumed.
    fn parse(self, s: &str) -> Option<(civil::DateTime, Option<Offset>)> {
        match self {
            Self::Iso8601 => {
                if let Some(local) = s.strip_suffix('Z') {
                    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
                        .iter()
                        .find_map(|fmt| civil::DateTime::strptime(fmt, local).ok())
                        .map(|dt| (dt, Some(Offset::UTC)))
                } else {
                    ["%Y-%m-%dT%H:%M:%S%:z", "%Y-%m-%dT%H:%M:%S%.f%:z"]
                        .iter()
                        .find_map(|fmt| parse_with_offset(fmt, s))
                        .or_else(|| {
                            ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
                                .iter()
                                .find_map(|fmt| civil::DateTime::strptime(fmt, s).ok())
                                .map(|dt| (dt, None))
                        })
                }
            }
            Self::AccessLog => {
                let parts: Vec<&str> = s.split_whitespace().collect();
                let [stamp, zone] = parts.as_slice() else {
                    return None;
                };
                parse_with_offset("%d/%b/%Y:%H:%M:%S %z", &format!("{stamp} {zone}"))
            }
            Self::Syslog => {
                // "Nov  5" is padded to "Nov 05" so the day always has two digits.
                let parts: Vec<&str> = s.split_whitespace().collect();
                let [month, day, time] = parts.as_slice() else {
                    return None;
                };
                let normalized = format!("{month} {day:0>2} {time}");
                let mut tm = BrokenDownTime::parse("%b %d %H:%M:%S", &normalized).ok()?;
                tm.set_year(Some(SYSLOG_YEAR)).ok()?;
                Some((tm.to_datetime().ok()?, None))
            }
        }
    }
}

fn parse_with_offset(fmt: &str, s: &str) -> Option<(civil::DateTime, Option<Offset>)> {
    let tm = BrokenDownTime::parse(fmt, s).ok()?;
    let offset = tm.offset()?;
    Some((tm.to_datetime().ok()?, Some(offset)))
}

impl Timestamp {
    /// Normalize a raw timestamp string, or `None` if no rule accepts it.
    pub fn parse(s: &str) -> Option<Self> {
        let parsed = RULES
            .iter()
            .filter(|rule| rule.detect.is_match(s))
            .find_map(|rule| rule.layout.parse(s));

        let Some((civil, offset)) = parsed else {
            tracing::trace!(raw = s, "unparseable timestamp");
            return None;
        };
        let instant = offset.unwrap_or(Offset::UTC).to_timestamp(civil).ok()?;

        Some(Self {
            civil,
            offset,
            instant,
            original: s.to_string(),
        })
    }

    /// Render as ISO 8601: `YYYY-MM-DDTHH:MM:SS[.fff][±HH:MM]`.
    ///
    /// Fractional seconds appear only when non-zero, the offset only when one
    /// was parsed.
    pub fn format_iso(&self) -> String {
        let mut out = self.civil.strftime("%Y-%m-%dT%H:%M:%S").to_string();

        let nanos = self.civil.subsec_nanosecond();
        if nanos != 0 {
            let frac = format!("{nanos:09}");
            out.push('.');
            out.push_str(frac.trim_end_matches('0'));
        }

        if let Some(offset) = self.offset {
            let seconds = offset.seconds();
            let sign = if seconds < 0 { '-' } else { '+' };
            let abs = seconds.unsigned_abs();
            out.push_str(&format!("{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60));
        }

        out
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format_iso())
    }
}

/// Parse a date-range bound.
///
/// Accepts an ISO 8601 date (`2023-11-12`, read as midnight), a date-time
/// (`2023-11-12T08:00:00` or `2023-11-12 08:00:00`), or a date-time with an
/// offset. Bounds without an offset are UTC.
pub fn parse_date_bound(s: &str) -> Result<jiff::Timestamp, ExtractError> {
    let s = s.trim();

    if let Ok(ts) = s.parse::<jiff::Timestamp>() {
        return Ok(ts);
    }

    let civil = if let Ok(dt) = s.parse::<civil::DateTime>() {
        dt
    } else if let Ok(date) = s.parse::<civil::Date>() {
        date.to_datetime(civil::Time::midnight())
    } else {
        return Err(ExtractError::InvalidDate(s.to_string()));
    };

    Offset::UTC
        .to_timestamp(civil)
        .map_err(|e| ExtractError::InvalidDate(format!("{s}: {e}")))
}
