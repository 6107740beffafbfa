//! CLI end-to-end tests
//!
//! Tests for the vidmeta command-line interface.

mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the vidmeta binary
#[allow(deprecated)]
fn vidmeta_cmd() -> Command {
    let mut cmd = Command::cargo_bin("vidmeta").unwrap();
    // Keep the user's config files out of the tests.
    cmd.env("HOME", std::env::temp_dir());
    cmd
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = vidmeta_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = vidmeta_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("vidmeta"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = vidmeta_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vidmeta"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = vidmeta_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_check_tools_command() {
    let mut cmd = vidmeta_cmd();
    cmd.arg("check-tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("mediainfo"));
}

#[test]
fn test_cli_inspect_help() {
    let mut cmd = vidmeta_cmd();
    cmd.args(["inspect", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("--backend"));
}

#[test]
fn test_cli_inspect_requires_file() {
    let mut cmd = vidmeta_cmd();
    cmd.arg("inspect")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_cli_inspect_nonexistent_file() {
    let mut cmd = vidmeta_cmd();
    cmd.args(["inspect", "/nonexistent/vidmeta/file.mkv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_cli_inspect_rejects_unknown_backend() {
    let mut cmd = vidmeta_cmd();
    cmd.args(["inspect", "movie.mkv", "--backend", "ffprobe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_cli_inspect_native_garbage_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("garbage.mp4");
    fs::write(&path, b"not a container at all, just text").unwrap();

    let mut cmd = vidmeta_cmd();
    cmd.args(["inspect", "--backend", "native"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Analysis failed"));
}

#[test]
fn test_cli_inspect_native_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sample.mkv");
    fs::write(&path, common::minimal_mkv()).unwrap();

    let mut cmd = vidmeta_cmd();
    cmd.args(["inspect", "--backend", "native", "--json"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""file_name": "sample.mkv""#))
        .stdout(predicate::str::contains(r#""container": "Matroska""#))
        .stdout(predicate::str::contains(r#""duration": "2:15""#))
        .stdout(predicate::str::contains(r#""resolution": "1920 x 1080""#))
        .stdout(predicate::str::contains(r#""resolution_class": "FullHD""#))
        .stdout(predicate::str::contains(r#""frame_rate": "25 fps""#))
        .stdout(predicate::str::contains(
            r#""video_codec": "Advanced Video Coding（H.264）""#,
        ))
        .stdout(predicate::str::contains(
            r#""audio_codec": "Dolby Digital（AC-3）""#,
        ));
}

#[test]
fn test_cli_inspect_native_text() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sample.mkv");
    fs::write(&path, common::minimal_mkv()).unwrap();

    let mut cmd = vidmeta_cmd();
    cmd.args(["inspect", "--backend", "native"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1920 x 1080 [FullHD]"))
        .stdout(predicate::str::contains("2:15"));
}

#[test]
fn test_cli_tracks_native_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sample.mkv");
    fs::write(&path, common::minimal_mkv()).unwrap();

    let output = vidmeta_cmd()
        .args(["tracks", "--backend", "native"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["engine"], "native");
    assert_eq!(value["tracks"].as_array().map(|t| t.len()), Some(3));
}

#[test]
fn test_cli_tracks_native_garbage_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("garbage.mkv");
    fs::write(&path, b"\x00\x01\x02").unwrap();

    let mut cmd = vidmeta_cmd();
    cmd.args(["tracks", "--backend", "native"])
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn test_cli_validate_no_config() {
    let mut cmd = vidmeta_cmd();
    cmd.arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("using defaults"))
        .stdout(predicate::str::contains("Backend: auto"));
}

#[test]
fn test_cli_validate_valid_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("vidmeta.toml");
    fs::write(
        &config_path,
        r#"
[probe]
backend = "native"
chunk_size = 65536

[display]
timestamp_format = "%d/%m/%Y %H:%M"
"#,
    )
    .unwrap();

    let mut cmd = vidmeta_cmd();
    cmd.arg("validate")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Backend: native"))
        .stdout(predicate::str::contains("Chunk size: 65536 bytes"));
}

#[test]
fn test_cli_validate_global_config_flag() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("custom.toml");
    fs::write(&config_path, "[probe]\nbackend = \"mediainfo\"\n").unwrap();

    let mut cmd = vidmeta_cmd();
    cmd.arg("--config")
        .arg(&config_path)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backend: mediainfo"));
}

#[test]
fn test_cli_validate_invalid_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("broken.toml");
    fs::write(&config_path, "[probe]\nchunk_size = 0\n").unwrap();

    let mut cmd = vidmeta_cmd();
    cmd.arg("validate")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("chunk_size"));
}

#[test]
fn test_cli_validate_malformed_toml() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("malformed.toml");
    fs::write(&config_path, "[probe\nbackend = ").unwrap();

    let mut cmd = vidmeta_cmd();
    cmd.arg("validate")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}
