//! Smoke tests to verify command wiring

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_export_help() {
    let mut cmd = Command::cargo_bin("threadmark").unwrap();
    cmd.arg("export").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Input export file"));
}

#[test]
fn test_config_help() {
    let mut cmd = Command::cargo_bin("threadmark").unwrap();
    cmd.arg("config").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Show config file path"));
}

#[test]
fn test_export_missing_input_fails() {
    let mut cmd = Command::cargo_bin("threadmark").unwrap();
    cmd.arg("export")
        .arg("--in")
        .arg("/definitely/not/here.json")
        .arg("--out")
        .arg("/tmp/unused")
        .arg("--no-progress");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn test_export_end_to_end() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();

    let export = r#"{
        "name": "Smoke test",
        "chat_messages": [
            {"sender": "human", "content": [{"type": "text", "text": "ping"}]},
            {"sender": "assistant", "content": [{"type": "text", "text": "pong"}]}
        ]
    }"#;
    let input_path = input_dir.path().join("one.json");
    fs::write(&input_path, export).unwrap();

    let mut cmd = Command::cargo_bin("threadmark").unwrap();
    cmd.arg("--quiet")
        .arg("export")
        .arg("--in")
        .arg(&input_path)
        .arg("--out")
        .arg(output_dir.path())
        .arg("--name")
        .arg("Tester")
        .arg("--no-progress");

    cmd.assert().success();

    let doc = fs::read_to_string(output_dir.path().join("smoke-test.md")).unwrap();
    assert!(doc.starts_with("Exported by Tester on "));
    assert!(doc.contains("**User:**\nping"));
    assert!(doc.contains("\n\n---\n\n**Claude:**\npong"));
}

#[test]
fn test_export_dry_run_writes_nothing() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();

    let input_path = input_dir.path().join("one.json");
    fs::write(
        &input_path,
        r#"{"chat_messages": [{"sender": "human", "content": [{"type": "text", "text": "hi"}]}]}"#,
    )
    .unwrap();

    let out = output_dir.path().join("never");
    let mut cmd = Command::cargo_bin("threadmark").unwrap();
    cmd.arg("export")
        .arg("--in")
        .arg(&input_path)
        .arg("--out")
        .arg(&out)
        .arg("--dry-run")
        .arg("--no-progress");

    cmd.assert().success();
    assert!(!out.exists());
}
