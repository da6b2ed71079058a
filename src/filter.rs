//! Post-extraction filters over record sequences.
//!
//! Filters consume a record sequence and return the surviving records in
//! their original order. They never look at extractor state.

use regex::Regex;

use crate::error::ExtractError;
use crate::record::Record;

/// Keep records whose `parsed_timestamp` lies within `[start, end]`.
///
/// With neither bound the input is returned as-is. With any bound, records
/// lacking a parsed timestamp are dropped. Bounds are inclusive and compared
/// against the timestamp's instant.
pub fn filter_by_date(
    records: Vec<Record>,
    start: Option<jiff::Timestamp>,
    end: Option<jiff::Timestamp>,
) -> Vec<Record> {
    if start.is_none() && end.is_none() {
        return records;
    }

    let before = records.len();
    let kept: Vec<Record> = records
        .into_iter()
        .filter(|record| {
            let Some(ts) = record.parsed_timestamp() else {
                return false;
            };
            start.is_none_or(|start| start <= ts.instant) && end.is_none_or(|end| ts.instant <= end)
        })
        .collect();

    tracing::debug!(?start, ?end, before, after = kept.len(), "date filter applied");
    kept
}

/// A `field:regex` filter.
#[derive(Debug, Clone)]
pub struct FieldFilter {
    field: String,
    regex: Regex,
}

impl FieldFilter {
    /// Parse a `field:regex` filter spec.
    ///
    /// Splits on the first colon, so the regex itself may contain colons.
    /// A spec without any colon is not a filter and yields `Ok(None)`.
    pub fn parse(spec: &str) -> Result<Option<Self>, ExtractError> {
        let Some((field, pattern)) = spec.split_once(':') else {
            return Ok(None);
        };
        Ok(Some(Self {
            field: field.to_string(),
            regex: Regex::new(pattern)?,
        }))
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Whether the record has the field and its string form matches anywhere.
    ///
    /// Fields with an absent value never match.
    pub fn matches(&self, record: &Record) -> bool {
        match record.get(&self.field) {
            Some(value) if !value.is_absent() => self.regex.is_match(&value.to_string()),
            _ => false,
        }
    }
}

/// Keep records whose `field` matches `regex`, given as `"field:regex"`.
///
/// A spec without a colon returns the input unchanged.
pub fn filter_by_pattern(records: Vec<Record>, spec: &str) -> Result<Vec<Record>, ExtractError> {
    let Some(filter) = FieldFilter::parse(spec)? else {
        tracing::debug!(spec, "filter has no field separator, ignoring");
        return Ok(records);
    };

    let before = records.len();
    let kept: Vec<Record> = records
        .into_iter()
        .filter(|record| filter.matches(record))
        .collect();

    tracing::debug!(field = filter.field(), before, after = kept.len(), "field filter applied");
    Ok(kept)
}
