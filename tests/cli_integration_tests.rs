use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SUCCESS: &str = "Label file format is correct";

struct LabelFile {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl LabelFile {
    fn new(contents: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("base_labels.txt");
        fs::write(&path, contents).expect("Failed to write label file");
        Self {
            _temp_dir: temp_dir,
            path,
        }
    }
}

fn labelcheck() -> Command {
    Command::cargo_bin("labelcheck").unwrap()
}

#[test]
fn test_cli_version() {
    labelcheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("labelcheck"));
}

#[test]
fn test_cli_help() {
    labelcheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("<LABEL_FILE>"));
}

#[test]
fn test_valid_file() {
    let file = LabelFile::new("1,2,3\n1,2\n1\n");

    labelcheck()
        .arg(&file.path)
        .assert()
        .code(0)
        .stdout(format!("{}\n", SUCCESS));
}

#[test]
fn test_valid_file_without_trailing_newline() {
    let file = LabelFile::new("2,1\n1");

    labelcheck()
        .arg(&file.path)
        .assert()
        .success()
        .stdout(predicate::str::contains(SUCCESS));
}

#[test]
fn test_empty_line_reports_index() {
    let file = LabelFile::new("1,2\n1\n\n2\n");

    labelcheck()
        .arg(&file.path)
        .assert()
        .code(255)
        .stdout("Error: The label set of vector 2 is empty\n");
}

#[test]
fn test_whitespace_only_line_is_empty() {
    let file = LabelFile::new("   \t\n1\n");

    labelcheck()
        .arg(&file.path)
        .assert()
        .code(255)
        .stdout(predicate::str::contains("vector 0 is empty"));
}

#[test]
fn test_non_numeric_label() {
    let file = LabelFile::new("1\n1,two\n");

    labelcheck()
        .arg(&file.path)
        .assert()
        .code(255)
        .stdout("Error: The label set of vector 1 contains non-numeric labels\n");
}

#[test]
fn test_duplicate_label() {
    let file = LabelFile::new("1,2\n3,1,3\n");

    labelcheck()
        .arg(&file.path)
        .assert()
        .code(255)
        .stdout("Error: The label set of vector 1 has duplicate labels\n");
}

#[test]
fn test_non_positive_label() {
    let file = LabelFile::new("1\n2\n0,1\n");

    labelcheck()
        .arg(&file.path)
        .assert()
        .code(255)
        .stdout(predicate::str::contains(
            "Error: The label set of vector 2 has non-positive integer labels",
        ))
        .stdout(predicate::str::contains("[1,L]"));
}

#[test]
fn test_first_error_wins_and_no_report() {
    let file = LabelFile::new("2\n1,2\nx\n\n");

    labelcheck()
        .arg(&file.path)
        .assert()
        .code(255)
        .stdout(predicate::str::contains("vector 2 contains non-numeric"))
        .stdout(predicate::str::contains("Warning").not())
        .stdout(predicate::str::contains(SUCCESS).not());
}

#[test]
fn test_order_warning() {
    let file = LabelFile::new("1,2\n2,3\n2\n");

    labelcheck()
        .arg(&file.path)
        .assert()
        .success()
        .stdout(
            "Warning: Label 2 appears more frequently than label 1 (3 > 1), \
             please try to ensure smaller labels appear more frequently\n\
             Label file format is correct\n",
        );
}

#[test]
fn test_one_warning_per_increasing_pair() {
    // frequencies: 1 -> 1, 2 -> 2, 3 -> 1, 4 -> 3
    let file = LabelFile::new("1,2,4\n2,3,4\n4\n");

    let output = labelcheck().arg(&file.path).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout.matches("Warning:").count(), 2);
    assert!(stdout.contains("Label 2 appears more frequently than label 1 (2 > 1)"));
    assert!(stdout.contains("Label 4 appears more frequently than label 3 (3 > 1)"));
    assert!(stdout.ends_with(&format!("{}\n", SUCCESS)));
}

#[test]
fn test_no_warnings_flag() {
    let file = LabelFile::new("1,2\n2,3\n2\n");

    labelcheck()
        .arg(&file.path)
        .arg("--no-warnings")
        .assert()
        .success()
        .stdout(format!("{}\n", SUCCESS));
}

#[test]
fn test_stats_flag() {
    let file = LabelFile::new("1,3\n1\n");

    labelcheck()
        .arg(&file.path)
        .arg("--stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("  - Label sets: 2"))
        .stdout(predicate::str::contains("  - Distinct labels: 2"))
        .stdout(predicate::str::contains("  - Unused label ids: 1 (2)"));
}

#[test]
fn test_json_output() {
    let file = LabelFile::new("1,2\n2,3\n2\n");

    let output = labelcheck()
        .arg(&file.path)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["stats"]["label_sets"], 3);
    assert_eq!(value["frequencies"].as_array().unwrap().len(), 3);
    assert_eq!(value["warnings"].as_array().unwrap().len(), 1);
}

#[test]
fn test_json_error_output() {
    let file = LabelFile::new("1\n1,1\n");

    let output = labelcheck()
        .arg(&file.path)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(255));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["kind"], "duplicate_label");
    assert_eq!(value["line"], 1);
}

#[test]
fn test_missing_argument_is_usage_error() {
    labelcheck()
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Usage: labelcheck"));
}

#[test]
fn test_too_many_arguments_is_usage_error() {
    // both files would fail validation if either were read
    let invalid = LabelFile::new("not,labels\n");
    let missing = invalid.path.with_file_name("missing.txt");

    labelcheck()
        .arg(&invalid.path)
        .arg(&missing)
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Usage: labelcheck"))
        .stdout(predicate::str::contains("Error").not());

    labelcheck()
        .arg(&missing)
        .arg(&invalid.path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error reading file").not());
}

#[test]
fn test_nonexistent_file() {
    let temp_dir = TempDir::new().unwrap();

    labelcheck()
        .arg(temp_dir.path().join("missing.txt"))
        .assert()
        .code(255)
        .stdout(predicate::str::starts_with("Error reading file:"));
}

#[test]
fn test_directory_is_io_error() {
    let temp_dir = TempDir::new().unwrap();

    labelcheck()
        .arg(temp_dir.path())
        .assert()
        .code(255)
        .stdout(predicate::str::starts_with("Error reading file:"));
}

#[test]
fn test_empty_file_is_valid() {
    let file = LabelFile::new("");

    labelcheck()
        .arg(&file.path)
        .assert()
        .success()
        .stdout(format!("{}\n", SUCCESS));
}

#[test]
fn test_huge_negative_label_is_non_positive() {
    let file = LabelFile::new("1\n2,-99999999999999999999\n");

    labelcheck()
        .arg(&file.path)
        .assert()
        .code(255)
        .stdout(predicate::str::starts_with(
            "Error: The label set of vector 1 has non-positive integer labels",
        ));
}

#[test]
fn test_huge_positive_label_is_out_of_range() {
    let file = LabelFile::new("1\n99999999999999999999\n");

    labelcheck()
        .arg(&file.path)
        .assert()
        .code(255)
        .stdout(predicate::str::contains("vector 1 has label 99999999999999999999"))
        .stdout(predicate::str::contains("non-numeric").not());
}

#[test]
fn test_cr_line_endings() {
    let file = LabelFile::new("1,2\r1\r2\r");

    labelcheck()
        .arg(&file.path)
        .assert()
        .success()
        .stdout(format!("{}\n", SUCCESS));
}
