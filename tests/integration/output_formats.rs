//! Integration tests for the CSV and text renderers.

use crate::log_extract;

const INPUT: &str = r#"192.168.1.1 - alice [10/Oct/2023:13:55:36 +0000] "GET / HTTP/1.1" 200 1234
192.168.1.2 - bob [10/Oct/2023:13:55:37 +0000] "POST /api HTTP/1.1" 201 512"#;

const HEADER: &str =
    "ip,user,timestamp,method,path,protocol,status,size,line_number,raw_line,parsed_timestamp,ip_version";

#[test]
fn csv_output() {
    let output = log_extract()
        .args(["--output", "csv"])
        .write_stdin(INPUT)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], HEADER);
    assert!(lines[1].starts_with("192.168.1.1,alice,10/Oct/2023:13:55:36 +0000,GET,/,HTTP/1.1,200,1234,1,"));
    assert!(lines[1].ends_with(",2023-10-10T13:55:36+00:00,v4"));
    assert!(lines[2].contains(",bob,"));
}

#[test]
fn text_output() {
    let output = log_extract()
        .args(["-o", "text"])
        .write_stdin(INPUT)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], HEADER.replace(',', "\t"));
    let cells: Vec<&str> = lines[2].split('\t').collect();
    assert_eq!(cells[0], "192.168.1.2");
    assert_eq!(cells[1], "bob");
    assert_eq!(cells[8], "2");
    assert_eq!(cells[10], "2023-10-10T13:55:37+00:00");
}

#[test]
fn empty_tabular_output() {
    log_extract()
        .args(["-o", "csv"])
        .write_stdin("nothing to see here\n")
        .assert()
        .success()
        .stdout("\n");
    log_extract()
        .args(["-o", "text"])
        .write_stdin("")
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn output_is_deterministic() {
    for format in ["json", "csv", "text"] {
        let first = log_extract()
            .args(["-o", format])
            .write_stdin(INPUT)
            .output()
            .unwrap();
        let second = log_extract()
            .args(["-o", format])
            .write_stdin(INPUT)
            .output()
            .unwrap();
        assert_eq!(first.stdout, second.stdout, "{format} output differs");
    }
}
