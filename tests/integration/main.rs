//! CLI integration tests for `log-extract`.

use assert_cmd::Command;

mod config_custom;
mod field_filter;
mod output_formats;
mod stats;

/// The binary under test, isolated from any host config file and `RUST_LOG`.
#[allow(deprecated)]
fn log_extract() -> Command {
    let mut cmd = Command::cargo_bin("log-extract").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/log-extract-test-no-config");
    cmd.env_remove("RUST_LOG");
    cmd
}
