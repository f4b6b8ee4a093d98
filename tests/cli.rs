//! CLI behavior tests: exit codes, output formats, stdin, init.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const STRONG_RESUME: &str = "test-resumes/strong_resume.txt";
const WEAK_RESUME: &str = "test-resumes/weak_resume.txt";
const BATCH_DIR: &str = "test-resumes/batch";

fn ats_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ats-lens"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn no_args_returns_error_not_panic() {
    let mut cmd = ats_cmd();
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("PATH").or(predicate::str::contains("path")));
}

#[test]
fn below_threshold_exit_1() {
    let mut cmd = ats_cmd();
    cmd.arg(WEAK_RESUME).arg("--threshold").arg("70").arg("--no-cache");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("below threshold"));
}

#[test]
fn above_threshold_exit_0() {
    let mut cmd = ats_cmd();
    cmd.arg(STRONG_RESUME).arg("--threshold").arg("50").arg("--no-cache");
    cmd.assert().success();
}

#[test]
fn json_output_valid() {
    let mut cmd = ats_cmd();
    cmd.arg(STRONG_RESUME).arg("--json").arg("--no-cache");
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let s = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value = serde_json::from_str(s.trim()).expect("valid JSON");
    assert_eq!(value["analysis"]["contact"]["score"], 100);
    assert!(value["analysis"]["overallScore"].is_number());
    assert_eq!(value["fingerprint"].as_str().map(str::len), Some(64));
    assert!(value["profile"]["skills"]
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s == "python"));
}

#[test]
fn json_directory_has_summary() {
    let mut cmd = ats_cmd();
    cmd.arg(BATCH_DIR).arg("--json").arg("--no-cache");
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["summary"]["filesAnalyzed"], 2);
    let paths: Vec<&str> = value["results"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["path"].as_str())
        .collect();
    assert_eq!(paths.len(), 2);
    assert!(paths[0].ends_with("alex_chen.txt"));
    assert!(paths[1].ends_with("sam_taylor.md"));
}

#[test]
fn plain_output_is_report_text() {
    let mut cmd = ats_cmd();
    cmd.arg(STRONG_RESUME).arg("--plain").arg("--no-cache");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ATS RESUME COMPATIBILITY REPORT"))
        .stdout(predicate::str::contains("OVERALL ATS SCORE:"))
        .stdout(predicate::str::contains("DETAILED SCORE BREAKDOWN:"));
}

#[test]
fn plain_conflicts_with_json() {
    let mut cmd = ats_cmd();
    cmd.arg(STRONG_RESUME).arg("--plain").arg("--json");
    cmd.assert().failure().code(2);
}

#[test]
fn quiet_prints_one_line_per_file() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::copy(WEAK_RESUME, dir.path().join("weak.txt")).unwrap();
    fs::copy(STRONG_RESUME, dir.path().join("strong.txt")).unwrap();

    let mut cmd = ats_cmd();
    cmd.arg(dir.path()).arg("--quiet");
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("strong.txt"));
    assert!(lines[1].contains("weak.txt"));
}

#[test]
fn stdin_input_with_name() {
    let text = fs::read_to_string(STRONG_RESUME).unwrap();
    let mut cmd = ats_cmd();
    cmd.arg("-")
        .arg("--name")
        .arg("maria.pdf")
        .arg("--json")
        .write_stdin(text);
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["path"], "<stdin>");
    assert_eq!(value["analysis"]["formatting"]["formatScore"], 100);
}

#[test]
fn stdin_empty_input_scores_without_error() {
    let mut cmd = ats_cmd();
    cmd.arg("-").arg("--json").write_stdin("");
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["analysis"]["contact"]["score"], 0);
    assert_eq!(value["analysis"]["tier"], "poor");
}

#[test]
fn file_not_found_exit_2() {
    let mut cmd = ats_cmd();
    cmd.arg("nonexistent_resume.txt");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("nonexistent_resume.txt"));
}

#[test]
fn unsupported_format_exit_2() {
    let dir = tempfile::TempDir::new().unwrap();
    let pdf = dir.path().join("resume.pdf");
    fs::write(&pdf, b"%PDF-1.7 binary").unwrap();

    let mut cmd = ats_cmd();
    cmd.arg(&pdf).arg("--no-cache");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Unsupported format .pdf"));
}

#[test]
fn input_above_max_bytes_exit_2() {
    let mut cmd = ats_cmd();
    cmd.arg(STRONG_RESUME).arg("--max-bytes").arg("16").arg("--no-cache");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("byte limit"));
}

#[test]
fn empty_directory_exit_2() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = ats_cmd();
    cmd.arg(dir.path());
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("No resume files found"));
}

#[test]
fn config_threshold_applies() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::copy(WEAK_RESUME, dir.path().join("weak.txt")).unwrap();
    fs::write(dir.path().join(".atslensrc.json"), r#"{"threshold": 80}"#).unwrap();

    let mut cmd = ats_cmd();
    cmd.arg(dir.path()).arg("--quiet");
    cmd.assert().failure().code(1);

    // CLI flag overrides config
    let mut cmd = ats_cmd();
    cmd.arg(dir.path()).arg("--quiet").arg("--threshold").arg("10");
    cmd.assert().success();
}

#[test]
fn invalid_config_exit_2() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::copy(WEAK_RESUME, dir.path().join("weak.txt")).unwrap();
    fs::write(
        dir.path().join(".atslensrc.json"),
        r#"{"vocabulary": {"sections": {"hobbies": ["chess"]}}}"#,
    )
    .unwrap();

    let mut cmd = ats_cmd();
    cmd.arg(dir.path());
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Unknown section"));
}

#[test]
fn config_ignore_skips_files() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::create_dir(dir.path().join("drafts")).unwrap();
    fs::copy(STRONG_RESUME, dir.path().join("final.txt")).unwrap();
    fs::copy(WEAK_RESUME, dir.path().join("drafts/old.txt")).unwrap();
    fs::write(
        dir.path().join(".atslensrc.json"),
        r#"{"ignore": ["**/drafts/**"]}"#,
    )
    .unwrap();

    let mut cmd = ats_cmd();
    cmd.arg(dir.path()).arg("--quiet");
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("final.txt"));
    assert!(!stdout.contains("old.txt"));
}

#[test]
fn history_records_trend_for_quiet_output() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::copy(STRONG_RESUME, dir.path().join("maria.txt")).unwrap();
    // a config file marks the project root that holds the history
    fs::write(dir.path().join(".atslensrc.json"), "{}").unwrap();

    let mut first = ats_cmd();
    first.arg(dir.path()).arg("--quiet");
    first.assert().success();
    assert!(dir.path().join(".ats-lens-history.json").exists());

    let mut second = ats_cmd();
    second.arg(dir.path()).arg("--quiet");
    second
        .assert()
        .success()
        .stdout(predicate::str::contains("[unchanged at"));
}

#[test]
fn cache_file_written_and_reused() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::copy(STRONG_RESUME, dir.path().join("maria.txt")).unwrap();

    let mut first = ats_cmd();
    first.arg(dir.path());
    first.assert().success();
    assert!(dir.path().join(".ats-lens-cache.json").exists());

    let mut second = ats_cmd();
    second.arg(dir.path());
    second
        .assert()
        .success()
        .stderr(predicate::str::contains("1 files from cache"));
}

#[test]
fn init_creates_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join(".atslensrc.json");
    let mut cmd = ats_cmd();
    cmd.arg("init")
        .arg("--dir")
        .arg(dir.path())
        .arg("--threshold")
        .arg("75");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("threshold=75"));
    assert!(config_path.exists(), ".atslensrc.json should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["threshold"], 75);
    assert!(value["vocabulary"].is_object());
}

#[test]
fn init_does_not_overwrite() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join(".atslensrc.json");
    fs::write(&config_path, r#"{"threshold": 42}"#).unwrap();

    let mut cmd = ats_cmd();
    cmd.arg("init").arg("--dir").arg(dir.path());
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(
        fs::read_to_string(&config_path).unwrap(),
        r#"{"threshold": 42}"#
    );
}

#[test]
fn verbose_shows_candidate_profile() {
    let mut cmd = ats_cmd();
    cmd.arg(STRONG_RESUME).arg("--verbose").arg("--no-cache");
    cmd.env("NO_COLOR", "1");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Candidate Profile"))
        .stdout(predicate::str::contains("Denver, CO"));
}
