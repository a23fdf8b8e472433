//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("brandreg").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("seed"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("brandreg").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--cors-permissive"));
}

#[test]
fn test_seed_help() {
    let mut cmd = Command::cargo_bin("brandreg").unwrap();
    cmd.arg("seed").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--reset"));
}

#[test]
fn test_seed_without_store_config_fails() {
    let mut cmd = Command::cargo_bin("brandreg").unwrap();
    cmd.arg("seed")
        .env_remove("DATABASE_URL")
        .env_remove("DATABASE_AUTH_TOKEN")
        .env("HOME", env!("CARGO_TARGET_TMPDIR"))
        .current_dir(env!("CARGO_TARGET_TMPDIR"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("missing DATABASE_URL"));
}
