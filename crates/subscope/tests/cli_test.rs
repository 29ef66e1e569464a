//! Integration tests for the `subscope` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring a live server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `subscope` binary with env isolation.
///
/// Clears all `SUBSCOPE_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn subscope_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("subscope");
    cmd.env("HOME", "/tmp/subscope-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/subscope-cli-test-nonexistent")
        .env_remove("SUBSCOPE_PROFILE")
        .env_remove("SUBSCOPE_SERVER")
        .env_remove("SUBSCOPE_EMAIL")
        .env_remove("SUBSCOPE_PASSWORD")
        .env_remove("SUBSCOPE_OUTPUT")
        .env_remove("SUBSCOPE_INSECURE")
        .env_remove("SUBSCOPE_TIMEOUT");
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
    let output = subscope_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    subscope_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("subdomains")
            .and(predicate::str::contains("login"))
            .and(predicate::str::contains("search"))
            .and(predicate::str::contains("domains")),
    );
}

#[test]
fn test_version_flag() {
    subscope_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("subscope"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    subscope_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    subscope_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = subscope_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_search_no_server_configured() {
    subscope_cmd()
        .args(["search", "example.com"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("config")
                .or(predicate::str::contains("Configuration"))
                .or(predicate::str::contains("server"))
                .or(predicate::str::contains("profile")),
        );
}

#[test]
fn test_login_validation_before_network() {
    // Invalid email format fails locally -- the bogus server is never
    // contacted, so the error is the validation message.
    let output = subscope_cmd()
        .args([
            "--server",
            "http://127.0.0.1:1",
            "--email",
            "not-an-email",
            "login",
        ])
        .env("SUBSCOPE_PASSWORD", "abc123")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("Invalid email format"),
        "Expected validation message:\n{text}"
    );
}

#[test]
fn test_login_weak_password_rejected_locally() {
    let output = subscope_cmd()
        .args([
            "--server",
            "http://127.0.0.1:1",
            "--email",
            "user@example.com",
            "login",
        ])
        .env("SUBSCOPE_PASSWORD", "short")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("at least 6 characters"),
        "Expected password rule in output:\n{text}"
    );
}

#[test]
fn test_subdomains_page_zero_rejected() {
    let output = subscope_cmd()
        .args([
            "--server",
            "http://127.0.0.1:1",
            "--email",
            "user@example.com",
            "domains",
            "subdomains",
            "7",
            "--page",
            "0",
        ])
        .env("SUBSCOPE_PASSWORD", "abc123")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("pages start at 1") || text.contains("page"),
        "Expected page validation error:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = subscope_cmd()
        .args(["--output", "invalid", "profile"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_domains_subcommands_exist() {
    subscope_cmd()
        .args(["domains", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list").and(predicate::str::contains("subdomains")));
}

#[test]
fn test_config_subcommands_exist() {
    subscope_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("profiles")),
        );
}

#[test]
fn test_config_show_no_config() {
    // `config show` uses load_config_or_default() so it succeeds even
    // when no config file exists — it just renders the default config.
    subscope_cmd().args(["config", "show"]).assert().success();
}
