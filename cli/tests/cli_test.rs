//! Integration tests for the `scanbuddy` binary.

#[path = "../../tests/common/mod.rs"]
mod common;

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use common::Value;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("scanbuddy").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("SCANBUDDY_DIAGNOSTICS_DIR");
    cmd
}

/// One line of text per page.
fn write_pdf(dir: &Path, texts: &[&str]) -> PathBuf {
    let pages: Vec<&[&str]> = texts.iter().map(std::slice::from_ref).collect();
    common::write_pdf(dir, "source.pdf", &pages)
}

fn write_codes(dir: &Path, codes: &[&str]) -> PathBuf {
    let rows: Vec<Vec<Value>> = codes.iter().map(|c| vec![Value::Text(*c)]).collect();
    common::write_xlsx(dir, "codes.xlsx", &["Code", "Note"], &rows)
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn run_reports_matches_and_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path(), &["Invoice A-1 /2024", "Invoice B-2 /2023"]);
    let table = write_codes(dir.path(), &["A-1", "C-3", "B-2"]);
    let output = dir.path().join("out.xlsx");

    cmd()
        .args(["run", "--pdf", path_str(&pdf), "--table", path_str(&table)])
        .args(["--output", path_str(&output)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matches found: 2"))
        .stdout(predicate::str::contains("A-1"))
        .stdout(predicate::str::contains("B-2"));

    assert!(output.exists());
}

#[test]
fn run_sample_limits_listing() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path(), &["Codes A-1 B-2 C-3 /2024"]);
    let table = write_codes(dir.path(), &["A-1", "B-2", "C-3"]);
    let output = dir.path().join("out.csv");

    cmd()
        .args(["run", "--pdf", path_str(&pdf), "--table", path_str(&table)])
        .args(["--output", path_str(&output), "--sample", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("... and 2 more"));
}

#[test]
fn run_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path(), &["Invoice A-1 /2024", "Invoice B-2 /2023"]);
    let table = write_codes(dir.path(), &["A-1", "B-2"]);
    let output = dir.path().join("out.csv");

    let assert = cmd()
        .args(["run", "--pdf", path_str(&pdf), "--table", path_str(&table)])
        .args(["--output", path_str(&output), "--pages", "2", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["matches"], serde_json::json!(["B-2"]));
    assert_eq!(report["pages_extracted"], 1);
}

#[test]
fn run_rejects_page_range_beyond_document() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path(), &["Only page /2024"]);
    let table = write_codes(dir.path(), &["A-1"]);
    let output = dir.path().join("out.xlsx");

    cmd()
        .args(["run", "--pdf", path_str(&pdf), "--table", path_str(&table)])
        .args(["--output", path_str(&output), "--pages", "1-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    assert!(!output.exists());
}

#[test]
fn run_reports_malformed_page_range_once() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path(), &["Only page /2024"]);
    let table = write_codes(dir.path(), &["A-1"]);

    cmd()
        .args(["run", "--pdf", path_str(&pdf), "--table", path_str(&table)])
        .args(["--pages", "x-2"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: Invalid page range: invalid page number: 'x'",
        ))
        .stderr(predicate::str::contains("Invalid page range: Invalid page range").not());
}

#[test]
fn run_matches_lines_within_one_text_block() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = common::write_pdf_content(
        dir.path(),
        "block.pdf",
        &["BT /F1 12 Tf 72 720 Td (Invoice A-1 /2024) Tj 0 -20 Td (Reference B-2) Tj ET"],
    );
    let table = write_codes(dir.path(), &["A-1", "B-2"]);
    let output = dir.path().join("out.csv");

    let assert = cmd()
        .args(["run", "--pdf", path_str(&pdf), "--table", path_str(&table)])
        .args(["--output", path_str(&output), "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["matches"], serde_json::json!(["A-1"]));
    assert_eq!(report["filtered_line_count"], 1);
}

#[test]
fn run_rejects_column_zero_and_past_end() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path(), &["Only page /2024"]);
    let table = write_codes(dir.path(), &["A-1"]);

    for column in ["0", "3"] {
        cmd()
            .args(["run", "--pdf", path_str(&pdf), "--table", path_str(&table)])
            .args(["--column", column])
            .current_dir(dir.path())
            .assert()
            .failure();
    }
    assert!(!dir.path().join("matched_output.xlsx").exists());
}

#[test]
fn run_rejects_unknown_condition() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path(), &["Only page /2024"]);
    let table = write_codes(dir.path(), &["A-1"]);

    cmd()
        .args(["run", "--pdf", path_str(&pdf), "--table", path_str(&table)])
        .args(["--condition", "iso-date"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("iso-date"));
}

#[test]
fn run_writes_diagnostics_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path(), &["Invoice A-1 /2024"]);
    let table = write_codes(dir.path(), &["A-1"]);
    let output = dir.path().join("out.csv");
    let check = dir.path().join("check");

    cmd()
        .env("SCANBUDDY_DIAGNOSTICS_DIR", path_str(&check))
        .args(["run", "--pdf", path_str(&pdf), "--table", path_str(&table)])
        .args(["--output", path_str(&output)])
        .assert()
        .success();

    assert!(check.join("filtered_lines.txt").exists());
    assert!(check.join("column_values.txt").exists());
    assert!(check.join("ranged_source.pdf").exists());
}

#[test]
fn info_shows_page_count() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = write_pdf(dir.path(), &["Hello", "World"]);

    cmd()
        .args(["info", path_str(&pdf)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pages: 2"));
}

#[test]
fn info_shows_columns() {
    let dir = tempfile::tempdir().unwrap();
    let table = write_codes(dir.path(), &["A-1"]);

    cmd()
        .args(["info", path_str(&table)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Columns: 2"))
        .stdout(predicate::str::contains("Code"))
        .stdout(predicate::str::contains("Note"));
}

#[test]
fn conditions_lists_registry() {
    cmd()
        .arg("conditions")
        .assert()
        .success()
        .stdout(predicate::str::contains("slash-year"))
        .stdout(predicate::str::contains("/YYYY (4-digit year)"));
}
