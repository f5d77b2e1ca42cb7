use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("lifeguide")
        .env("LIFEGUIDE_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    cargo_bin_cmd!("lifeguide")
        .env("LIFEGUIDE_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("api_base_url"));
    assert!(contents.contains("[search]"));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "# existing config").unwrap();

    cargo_bin_cmd!("lifeguide")
        .env("LIFEGUIDE_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_generate_prints_defaults() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("lifeguide")
        .env("LIFEGUIDE_HOME", dir.path())
        .args(["config", "generate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("min_query_len = 2"));
}

#[test]
fn test_theme_round_trip() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("lifeguide")
        .env("LIFEGUIDE_HOME", dir.path())
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("system"));

    cargo_bin_cmd!("lifeguide")
        .env("LIFEGUIDE_HOME", dir.path())
        .args(["theme", "set", "dark"])
        .assert()
        .success();

    cargo_bin_cmd!("lifeguide")
        .env("LIFEGUIDE_HOME", dir.path())
        .args(["theme", "get"])
        .assert()
        .success()
        .stdout(predicate::str::diff("dark\n"));
}

#[test]
fn test_theme_rejects_unknown_mode() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("lifeguide")
        .env("LIFEGUIDE_HOME", dir.path())
        .args(["theme", "set", "sepia"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown theme mode"));
}
