//! End-to-end tests for the ideguard CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn get_cmd() -> Command {
    let mut cmd = Command::cargo_bin("ideguard").unwrap();
    cmd.env("CLICOLOR", "0").env("NO_COLOR", "1");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// scan
// ============================================================================

#[test]
fn scan_clean_file_exits_zero() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "math.js", "function add(a, b) {\n  return a + b;\n}\n");

    get_cmd()
        .arg("scan")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("VALIDATED"))
        .stdout(predicate::str::contains("100/100"));
}

#[test]
fn scan_blocked_file_exits_one() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "cleanup.sh", "#!/bin/sh\nrm -rf /\n");

    get_cmd()
        .arg("scan")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("BLOCKED"))
        .stdout(predicate::str::contains("system-commands"));
}

#[test]
fn scan_warning_file_exits_two() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "prefs.js", "const theme = localStorage.getItem('theme');\n");

    get_cmd()
        .arg("scan")
        .arg(&path)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Browser storage access"));
}

#[test]
fn scan_missing_file_exits_three() {
    let dir = TempDir::new().unwrap();

    get_cmd()
        .arg("scan")
        .arg(dir.path().join("nope.js"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn scan_stdin_with_language() {
    get_cmd()
        .args(["scan", "-", "--language", "python", "--format", "json"])
        .write_stdin("import pickle\nobj = pickle.loads(raw)\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"language\": \"python\""))
        .stdout(predicate::str::contains("Unsafe deserialization"));
}

#[test]
fn scan_json_is_parseable() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.js", "let a = 1;\n");
    write(&dir, "b.php", "<?php\necho $_GET['q'];\n");

    let output = get_cmd()
        .args(["scan", "--format", "json"])
        .arg(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["sources"], 2);
    assert_eq!(json["summary"]["warnings"], 1);
    assert_eq!(json["summary"]["validated"], 1);
}

#[test]
fn scan_directory_respects_gitignore() {
    let dir = TempDir::new().unwrap();
    write(&dir, ".gitignore", "dist/\n");
    fs::create_dir(dir.path().join("dist")).unwrap();
    write(&dir, "dist/bundle.js", "eval(payload)");
    write(&dir, "index.js", "let ok = true;\n");

    get_cmd()
        .args(["scan", "--format", "json"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("bundle.js").not());
}

#[test]
fn scan_sarif_to_output_file() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "hook.py", "import os\nos.system('ls')\n");
    let report = dir.path().join("report.sarif");

    get_cmd()
        .args(["scan", "--format", "sarif", "--output"])
        .arg(&report)
        .arg(&source)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Report written to"));

    let sarif: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(sarif["version"], "2.1.0");
    assert!(!sarif["runs"][0]["results"].as_array().unwrap().is_empty());
}

#[test]
fn scan_requires_path() {
    get_cmd().arg("scan").assert().failure();
}

// ============================================================================
// init / levels / session
// ============================================================================

#[test]
fn init_non_interactive_writes_config() {
    let dir = TempDir::new().unwrap();

    get_cmd()
        .current_dir(dir.path())
        .args(["init", "--non-interactive", "--level", "max"])
        .assert()
        .success()
        .stdout(predicate::str::contains("maximum"));

    let content = fs::read_to_string(dir.path().join(".ideguard.toml")).unwrap();
    assert!(content.contains("default_level = \"maximum\""));
    assert!(content.contains("max_attempts = 3"));
}

#[test]
fn init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    write(&dir, ".ideguard.toml", "default_level = \"basic\"\n");

    get_cmd()
        .current_dir(dir.path())
        .args(["init", "--non-interactive"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("already exists"));

    let content = fs::read_to_string(dir.path().join(".ideguard.toml")).unwrap();
    assert_eq!(content, "default_level = \"basic\"\n");
}

#[test]
fn init_rejects_unknown_level() {
    let dir = TempDir::new().unwrap();

    get_cmd()
        .current_dir(dir.path())
        .args(["init", "--non-interactive", "--level", "paranoid"])
        .assert()
        .code(4);

    assert!(!dir.path().join(".ideguard.toml").exists());
}

#[test]
fn levels_lists_all_levels() {
    let dir = TempDir::new().unwrap();

    get_cmd()
        .current_dir(dir.path())
        .arg("levels")
        .assert()
        .success()
        .stdout(predicate::str::contains("basic"))
        .stdout(predicate::str::contains("enhanced"))
        .stdout(predicate::str::contains("maximum"))
        .stdout(predicate::str::contains("Two-factor code"));
}

#[test]
fn levels_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "bad.toml", "[auth]\nmax_attempts = 0\n");

    get_cmd()
        .args(["levels", "--config"])
        .arg(&config)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("auth.max_attempts"));
}

#[test]
fn session_requires_a_terminal() {
    get_cmd()
        .arg("session")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("interactive terminal"));
}

#[test]
fn generate_man_writes_page() {
    let dir = TempDir::new().unwrap();

    get_cmd()
        .args(["generate-man", "--output"])
        .arg(dir.path())
        .assert()
        .success();

    assert!(dir.path().join("ideguard.1").exists());
}
