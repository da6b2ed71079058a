//! Integration tests for `--filter field:regex`.

use predicates::prelude::*;

use crate::log_extract;

fn users(stdout: &[u8]) -> Vec<String> {
    let parsed: serde_json::Value = serde_json::from_slice(stdout).unwrap();
    parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["user"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn filter_by_status() {
    let output = log_extract()
        .args(["tests/fixtures/apache.log", "--filter", "status:200"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(users(&output.stdout), ["user1", "user1"]);
}

#[test]
fn filter_regex_with_colon() {
    let output = log_extract()
        .args(["tests/fixtures/apache.log", "--filter", "timestamp:2023:(13|07):"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(users(&output.stdout), ["user1", "user1"]);
}

#[test]
fn filter_without_colon_keeps_everything() {
    let output = log_extract()
        .args(["tests/fixtures/apache.log", "--filter", "status200"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(users(&output.stdout).len(), 4);
}

#[test]
fn filter_on_missing_field_drops_all() {
    log_extract()
        .args(["tests/fixtures/apache.log", "--filter", "referrer:."])
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn combined_with_date_filter() {
    let output = log_extract()
        .args([
            "tests/fixtures/apache.log",
            "--start-date",
            "2023-11-12",
            "--filter",
            "method:GET",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(users(&output.stdout), ["-", "user1"]);
}

#[test]
fn invalid_filter_regex_exits_one() {
    log_extract()
        .args(["tests/fixtures/apache.log", "--filter", "status:(2"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid pattern"));
}
