//! CLI end-to-end tests
//!
//! Tests for the filterbrr command-line interface.

mod common;

use assert_cmd::prelude::*;
use common::SAMPLE_CONFIG;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the filterbrr binary
#[allow(deprecated)]
fn filterbrr_cmd() -> Command {
    Command::cargo_bin("filterbrr").unwrap()
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = filterbrr_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = filterbrr_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("filterbrr"));
}

#[test]
fn test_cli_parse_prints_fields() {
    let mut cmd = filterbrr_cmd();
    cmd.args(["parse", "The.Matrix.1999.1080p.BluRay.x264-GROUP"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: The Matrix"))
        .stdout(predicate::str::contains("Year: 1999"))
        .stdout(predicate::str::contains("Group: GROUP"));
}

#[test]
fn test_cli_parse_json() {
    let mut cmd = filterbrr_cmd();
    cmd.args([
        "parse",
        "Artist - Album",
        "--tags",
        "FLAC / Lossless / Log / 100% / Cue / CD",
        "--json",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"artists\": \"Artist\""))
    .stdout(predicate::str::contains("\"log_score\": 100"));
}

#[test]
fn test_cli_check_reports_match_and_rejections() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("filterbrr.toml");
    fs::write(&config, SAMPLE_CONFIG).unwrap();

    let mut cmd = filterbrr_cmd();
    cmd.arg("--config")
        .arg(&config)
        .args([
            "check",
            "Inception.2010.2160p.UHD.BluRay.x265-RELEASE",
            "--indexer",
            "tl",
            "--category",
            "Movies",
            "--size",
            "40 GB",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ UHD Movies"))
        .stdout(predicate::str::contains("✗ HD TV"))
        .stdout(predicate::str::contains("category not matching"))
        .stdout(predicate::str::contains("Accepted by: UHD Movies"));
}

#[test]
fn test_cli_check_rejects_malformed_var() {
    let mut cmd = filterbrr_cmd();
    cmd.args(["check", "Some.Release-GRP", "--var", "novalue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn test_cli_validate_valid_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("filterbrr.toml");
    fs::write(&config, SAMPLE_CONFIG).unwrap();

    let mut cmd = filterbrr_cmd();
    cmd.arg("validate")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Filters: 4"));
}

#[test]
fn test_cli_validate_invalid_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[[indexers]]\nidentifier = \"a\"\n[[indexers]]\nidentifier = \"a\"\n").unwrap();

    let mut cmd = filterbrr_cmd();
    cmd.arg("validate").arg(&config).assert().failure();
}
