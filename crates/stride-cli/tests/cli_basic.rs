//! Basic CLI E2E tests.
//!
//! Each test points STRIDE_CONFIG at a temporary file so runs never touch
//! the real settings directory.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command with `input` on stdin and return (stdout, stderr, code).
fn run_cli(config: &Path, args: &[&str], input: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_stride-cli"))
        .args(args)
        .env("STRIDE_CONFIG", config)
        .env_remove("STRIDE_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn config_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
    dir.path().join("config").join("config.json")
}

#[test]
fn test_config_get_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_file(&dir);

    let (stdout, _, code) = run_cli(&config, &["config", "get", "Appearance.ThemeColor"], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "#009faa");
    assert!(config.exists(), "defaults should be written on first load");
}

#[test]
fn test_config_set_then_get() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_file(&dir);

    let (stdout, _, code) = run_cli(&config, &["config", "set", "MainWindow.Language", "en"], "");
    assert_eq!(code, 0);
    assert!(stdout.contains("restart"));

    let (stdout, _, code) = run_cli(&config, &["config", "get", "MainWindow.Language"], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "en");

    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(on_disk["MainWindow"]["Language"], "en");
}

#[test]
fn test_config_list_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_file(&dir);

    let (stdout, _, code) = run_cli(&config, &["config", "list", "--json"], "");
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["Appearance"]["ThemeMode"], "Auto");
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_file(&dir);

    let (_, stderr, code) = run_cli(&config, &["config", "get", "Nope.Missing"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));

    let (_, _, code) = run_cli(&config, &["config", "set", "Appearance.ThemeMode", "Neon"], "");
    assert_ne!(code, 0);
}

#[test]
fn test_config_rejected_set_keeps_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_file(&dir);

    let (_, _, code) = run_cli(&config, &["config", "set", "Appearance.ThemeMode", "Dark"], "");
    assert_eq!(code, 0);
    let before = std::fs::read(&config).unwrap();

    let (_, _, code) = run_cli(&config, &["config", "set", "Appearance.ThemeColor", "blue"], "");
    assert_ne!(code, 0);
    let (_, _, code) = run_cli(&config, &["config", "set", "Nope.Missing", "1"], "");
    assert_ne!(code, 0);

    assert_eq!(std::fs::read(&config).unwrap(), before);
}

#[test]
fn test_hint_long_focus() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(&config_file(&dir), &["hint", "25m"], "");
    assert_eq!(code, 0);
    assert!(stdout.contains("Break for 5 minutes"));

    let (stdout, _, _) = run_cli(&config_file(&dir), &["hint", "25m", "--skip-breaks"], "");
    assert!(stdout.contains("no break time"));
}

#[test]
fn test_hint_rejects_zero() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(&config_file(&dir), &["hint", "0"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("valid focus duration"));
}

#[test]
fn test_run_missing_password() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        &config_file(&dir),
        &["run", "--username", "jojo", "--password", ""],
        "",
    );
    assert_ne!(code, 0);
    assert!(stdout.contains("please enter password"));
}

#[test]
fn test_run_guest_manages_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        &config_file(&dir),
        &["run", "--guest"],
        "task add Write report\ntask list\nquit\n",
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Welcome back, Guest!"));
    assert!(stdout.contains("[ ] Write report"));
}

#[test]
fn test_run_prompts_for_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        &config_file(&dir),
        &["run"],
        "jojo\nwrong\njojo\n123456\nquit\n",
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("incorrect username or password"));
    assert!(stdout.contains("Welcome back, jojo!"));
}

#[test]
fn test_run_zero_focus_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(&config_file(&dir), &["run", "--guest"], "focus start 0m\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("[error]"));
    assert!(stdout.contains("valid focus duration"));
}
