//! `log-extract` — Extract structured records from semi-structured log text.
//!
//! This library provides the extraction pipeline behind the `log-extract`
//! CLI tool. It matches log lines against a named-capture-group pattern
//! (Apache, Nginx, syslog, or a custom expression), normalizes timestamps
//! across formats, filters the resulting records by date range or field
//! content, and renders them as JSON, CSV, or tab-separated text.
//!
//! # Example
//!
//! ```
//! use log_extract::{Extractor, LogFormat, filter_by_pattern};
//!
//! let mut extractor = Extractor::new(LogFormat::Apache, None).unwrap();
//! let records = extractor.extract_lines([
//!     r#"192.168.1.1 - alice [10/Oct/2023:13:55:36 +0000] "GET /index.html HTTP/1.1" 200 1234"#,
//!     r#"192.168.1.2 - bob [10/Oct/2023:13:55:37 +0000] "GET /missing HTTP/1.1" 404 0"#,
//! ]);
//! assert_eq!(extractor.stats().matched_lines, 2);
//!
//! let ok = filter_by_pattern(records, "status:^2").unwrap();
//! assert_eq!(ok.len(), 1);
//! assert_eq!(ok[0].get_str("user"), Some("alice"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fields;
pub mod filter;
pub mod formatter;
pub mod pattern;
pub mod record;
pub mod timestamp;

// Re-export primary API types for convenience.
pub use config::Config;
pub use error::ExtractError;
pub use extractor::{Extractor, Stats};
pub use filter::{FieldFilter, filter_by_date, filter_by_pattern};
pub use formatter::{CsvFormatter, Formatter, JsonFormatter, OutputFormat, TextFormatter};
pub use pattern::{LogFormat, Pattern};
pub use record::{Record, Value};
pub use timestamp::{Timestamp, parse_date_bound};
