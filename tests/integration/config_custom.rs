//! Integration tests for custom patterns and the config file.

use std::io::Write;

use predicates::prelude::*;

use crate::log_extract;

const CUSTOM: &str = r"(?P<level>\w+) (?P<date>[\d-]+) user=(?P<user>\w+) action=(?P<action>\w+)";

#[test]
fn custom_pattern() {
    let output = log_extract()
        .args(["--format", "custom", "--pattern", CUSTOM])
        .write_stdin("ERROR 2023-11-15 user=john action=login\nnoise\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["level"], "ERROR");
    assert_eq!(parsed[0]["user"], "john");
    assert_eq!(parsed[0]["action"], "login");
}

#[test]
fn custom_without_pattern_exits_one() {
    log_extract()
        .args(["--format", "custom"])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--pattern required"));
}

#[test]
fn pattern_with_builtin_format_is_rejected() {
    log_extract()
        .args(["--format", "nginx", "--pattern", CUSTOM])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--pattern can only be used"));
}

#[test]
fn malformed_custom_pattern_exits_one() {
    log_extract()
        .args(["-f", "custom", "-p", r"(?P<level>\w+"])
        .write_stdin("INFO hello")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("invalid pattern"));
}

#[test]
fn reserved_group_name_exits_one() {
    log_extract()
        .args(["-f", "custom", "-p", r"(?P<line_number>\d+)"])
        .write_stdin("42")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("reserved field name"));
}

#[test]
fn config_file_sets_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "format = \"syslog\"").unwrap();
    writeln!(file, "output = \"text\"").unwrap();
    writeln!(file, "filter = \"process:sshd\"").unwrap();

    let output = log_extract()
        .arg("--config")
        .arg(file.path())
        .arg("tests/fixtures/syslog.log")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("timestamp\thost\tprocess\tpid\tmessage"));
}

#[test]
fn cli_overrides_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "format = \"syslog\"").unwrap();
    writeln!(file, "output = \"text\"").unwrap();

    log_extract()
        .arg("--config")
        .arg(file.path())
        .args(["-o", "json", "tests/fixtures/syslog.log"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn config_file_custom_pattern() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("log-extract");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "format = \"custom\"\npattern = '(?P<level>[A-Z]+): (?P<msg>.*)'\n",
    )
    .unwrap();

    log_extract()
        .env("XDG_CONFIG_HOME", dir.path())
        .write_stdin("WARN: disk almost full\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""level": "WARN""#))
        .stdout(predicate::str::contains(r#""msg": "disk almost full""#));
}

#[test]
fn malformed_config_file_exits_one() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "format = [not toml").unwrap();

    log_extract()
        .arg("--config")
        .arg(file.path())
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config file error"));
}

#[test]
fn unknown_format_in_config_file_exits_one() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "format = \"iis\"").unwrap();

    log_extract()
        .arg("--config")
        .arg(file.path())
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown format: iis"));
}
