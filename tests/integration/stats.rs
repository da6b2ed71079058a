//! Integration tests for `--stats`.

use predicates::prelude::*;

use crate::log_extract;

#[test]
fn stats_after_output() {
    log_extract()
        .args(["tests/fixtures/apache.log", "--stats", "-o", "text"])
        .assert()
        .success()
        .stderr(predicate::str::contains("--- Statistics ---"))
        .stderr(predicate::str::contains("Total lines: 5"))
        .stderr(predicate::str::contains("Matched lines: 4"))
        .stderr(predicate::str::contains("Match rate: 80.0%"));
}

#[test]
fn stats_count_lines_before_filtering() {
    log_extract()
        .args(["-f", "syslog", "-s", "--filter", "process:kernel"])
        .arg("tests/fixtures/syslog.log")
        .assert()
        .success()
        .stdout(predicate::str::contains("eth0: link up"))
        .stderr(predicate::str::contains("Total lines: 4"))
        .stderr(predicate::str::contains("Matched lines: 3"))
        .stderr(predicate::str::contains("Match rate: 75.0%"));
}

#[test]
fn stats_on_empty_input() {
    log_extract()
        .arg("--stats")
        .write_stdin("")
        .assert()
        .success()
        .stdout("[]\n")
        .stderr(predicate::str::contains("Total lines: 0"))
        .stderr(predicate::str::contains("Match rate: 0.0%"));
}

#[test]
fn no_stats_by_default() {
    log_extract()
        .arg("tests/fixtures/apache.log")
        .assert()
        .success()
        .stderr("");
}
