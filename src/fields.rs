//! Field names the extraction engine adds to every record.
//!
//! Capture groups in a custom pattern may not reuse these names; the engine
//! would otherwise overwrite the captured value with its own.

/// 1-based position of the source line.
pub const LINE_NUMBER: &str = "line_number";

/// The source line with its trailing newline removed.
pub const RAW_LINE: &str = "raw_line";

/// Normalized form of the `timestamp` capture, absent when unparseable.
pub const PARSED_TIMESTAMP: &str = "parsed_timestamp";

/// `"v4"` or `"v6"`, derived from the `ip` capture.
pub const IP_VERSION: &str = "ip_version";

/// Capture group that triggers timestamp normalization.
pub const TIMESTAMP: &str = "timestamp";

/// Capture group that triggers IP family classification.
pub const IP: &str = "ip";

/// Every engine-added field, in the order they are appended to a record.
pub const RESERVED: &[&str] = &[LINE_NUMBER, RAW_LINE, PARSED_TIMESTAMP, IP_VERSION];

/// Whether `name` is reserved for an engine-added field.
pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name)
}
