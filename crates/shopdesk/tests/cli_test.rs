//! Integration tests for the `shopdesk` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions
//! and offline error handling. None of them needs a running backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `shopdesk` binary with env isolation.
///
/// Clears all `SHOPDESK_*` env vars and points config and data
/// directories at `home` so tests never touch the user's real files.
fn shopdesk_cmd(home: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("shopdesk");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env_remove("SHOPDESK_PROFILE")
        .env_remove("SHOPDESK_API_ROOT")
        .env_remove("SHOPDESK_OUTPUT")
        .env_remove("SHOPDESK_INSECURE")
        .env_remove("SHOPDESK_TIMEOUT")
        .env_remove("SHOPDESK_EMAIL")
        .env_remove("SHOPDESK_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = shopdesk_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_command_groups() {
    let home = tempfile::tempdir().unwrap();
    shopdesk_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("shops")
            .and(predicate::str::contains("employees"))
            .and(predicate::str::contains("rotas"))
            .and(predicate::str::contains("punchings"))
            .and(predicate::str::contains("payouts"))
            .and(predicate::str::contains("salary")),
    );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    shopdesk_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("shopdesk"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let home = tempfile::tempdir().unwrap();
    shopdesk_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shopdesk"));
}

#[test]
fn test_completions_unknown_shell_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    shopdesk_cmd(home.path())
        .args(["completions", "tcsh"])
        .assert()
        .code(2);
}

// ── Argument validation ─────────────────────────────────────────────

#[test]
fn test_invalid_output_format() {
    let home = tempfile::tempdir().unwrap();
    shopdesk_cmd(home.path())
        .args(["--output", "xml", "shops", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("xml"));
}

#[test]
fn test_rota_create_requires_date() {
    let home = tempfile::tempdir().unwrap();
    let output = shopdesk_cmd(home.path())
        .args([
            "rotas", "create", "--employee", "e1", "--shop", "s1", "--start", "09:00", "--end",
            "17:00",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--date"));
}

#[test]
fn test_salary_range_rejects_bad_dates() {
    let home = tempfile::tempdir().unwrap();
    shopdesk_cmd(home.path())
        .args(["salary", "overview", "--from", "2025-13-01", "--to", "2025-12-31"])
        .assert()
        .code(2);
}

// ── Offline behavior ────────────────────────────────────────────────

#[test]
fn test_config_path_prints_toml_location() {
    let home = tempfile::tempdir().unwrap();
    shopdesk_cmd(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_whoami_without_session_is_auth_error() {
    let home = tempfile::tempdir().unwrap();
    let output = shopdesk_cmd(home.path()).arg("whoami").output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("Not logged in"));
}

#[test]
fn test_guarded_command_without_session_is_auth_error() {
    let home = tempfile::tempdir().unwrap();
    let output = shopdesk_cmd(home.path())
        .args(["employees", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("shopdesk login"));
}

#[test]
fn test_unknown_profile_fails() {
    let home = tempfile::tempdir().unwrap();
    let output = shopdesk_cmd(home.path())
        .args(["--profile", "nowhere", "whoami"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("nowhere"));
}

#[test]
fn test_logout_without_session_succeeds() {
    let home = tempfile::tempdir().unwrap();
    shopdesk_cmd(home.path()).arg("logout").assert().success();
}
