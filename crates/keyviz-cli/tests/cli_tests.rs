//! End-to-end tests for the `keyviz` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn keyviz() -> Command {
    let mut cmd = Command::cargo_bin("keyviz").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_options_lists_both_sections() {
    keyviz()
        .arg("options")
        .assert()
        .success()
        .stdout(predicate::str::contains("--showWave"))
        .stdout(predicate::str::contains("--notes.majorColors.<set>"));
}

#[test]
fn test_show_applies_overrides_in_order() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("settings.conf");
    fs::write(&config, "7 1\nscale 3\n").unwrap();

    keyviz()
        .arg("-C")
        .arg(&config)
        .args(["show", "--set", "scale=1.0", "--set", "scale=2.0"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# keyviz settings file\n"))
        .stdout(predicate::str::contains("\nscale 2\n"));
}

#[test]
fn test_show_warns_about_unknown_lines() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("settings.conf");
    fs::write(&config, "7 1\nnoSuchOption 1\n").unwrap();

    keyviz()
        .arg("-C")
        .arg(&config)
        .arg("show")
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown option 'noSuchOption'"));
}

#[test]
fn test_show_fails_without_header() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("settings.conf");
    fs::write(&config, "scale 3\n").unwrap();

    keyviz()
        .arg("-C")
        .arg(&config)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load settings file"));
}

#[test]
fn test_write_upgrades_legacy_file() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("settings.conf");
    fs::write(&config, "5 0\ntimeScale 0.25\n").unwrap();

    keyviz()
        .arg("--config")
        .arg(&config)
        .args(["write", "--set", "showWave=0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote settings to"));

    let content = fs::read_to_string(&config).unwrap();
    assert!(content.contains("\n7 1\n"));
    assert!(content.contains("\nscale 0.25\n"));
    assert!(content.contains("\nshowWave 0\n"));
    assert!(!content.contains("timeScale"));
}

#[test]
fn test_schema_json_export() {
    keyviz()
        .args(["schema", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"sets.count\""));
}

#[test]
fn test_presets_table() {
    keyviz()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("LOW_RES"))
        .stdout(predicate::str::contains("HIGH_RES"));
}
