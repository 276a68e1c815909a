use assert_cmd::Command;
use predicates::prelude::*;

fn rosenplot() -> Command { Command::cargo_bin("rosenplot").unwrap() }

#[test]
fn sample_writes_default_file() {
  let dir = tempfile::tempdir().unwrap();

  rosenplot()
    .current_dir(dir.path())
    .arg("sample")
    .assert()
    .success()
    .stdout(predicate::str::contains("Wrote 101 rows"));

  let contents = std::fs::read_to_string(dir.path().join("output.txt")).unwrap();
  let lines: Vec<&str> = contents.lines().collect();
  assert_eq!(lines.len(), 101);
  assert_eq!(lines[0], "-2.000000,909.000000");
  assert_eq!(lines[100], "2.000000,901.000000");
}

#[test]
fn sample_rejects_zero() {
  rosenplot().args(["sample", "--samples", "0"]).assert().failure();
}

#[test]
fn plot_fails_without_data() {
  let dir = tempfile::tempdir().unwrap();

  rosenplot()
    .current_dir(dir.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to open output.txt"));
}

#[test]
fn plot_fails_on_malformed_data() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join("output.txt"), "a,b\n").unwrap();

  rosenplot()
    .current_dir(dir.path())
    .arg("plot")
    .assert()
    .failure()
    .stderr(predicate::str::contains("row 1: field 1 is not a number"));
}

#[test]
fn plot_fails_on_single_column() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join("output.txt"), "5\n6\n").unwrap();

  rosenplot()
    .current_dir(dir.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("expected at least 2 columns, found 1"));
}

#[test]
fn minimize_reports_result() {
  rosenplot()
    .arg("minimize")
    .assert()
    .success()
    .stdout(predicate::str::contains("p0 F("))
    .stdout(predicate::str::contains("Iterations taken:"));
}

#[test]
fn plot_fails_on_ragged_data() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join("output.txt"), "1,2\n\n3,4,5\n").unwrap();

  rosenplot()
    .current_dir(dir.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("row 3: expected 2 fields, found 3"));
}
