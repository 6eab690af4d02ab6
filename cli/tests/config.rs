//! # newprogram Config Command Integration Tests
//!
//! File: cli/tests/config.rs
//!
//! ## Overview
//!
//! Integration tests for `newprogram config install|status|remove`.
//!

mod common;

use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_install_and_status() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is incomplete"));

    sandbox
        .cmd()
        .args(["config", "install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed mainC"));

    sandbox
        .cmd()
        .args(["config", "status"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Configuration is complete")
                .and(predicate::str::contains("Programs")),
        );
}

#[test]
fn test_install_keeps_existing_unless_forced() {
    let sandbox = Sandbox::new();
    sandbox.configure();
    let settings = sandbox.config_dir().join("config.toml");
    let edited = fs::read_to_string(&settings).unwrap();

    sandbox
        .cmd()
        .args(["config", "install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kept existing config.toml"));
    assert_eq!(fs::read_to_string(&settings).unwrap(), edited);

    sandbox
        .cmd()
        .args(["config", "install", "--force"])
        .assert()
        .success();
    assert_ne!(fs::read_to_string(&settings).unwrap(), edited);
}

#[test]
fn test_install_from_missing_share_dir_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("NEWPROGRAM_SHARE_DIR", sandbox.root.path().join("nowhere"))
        .args(["config", "install"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such file or directory"));
}

#[test]
fn test_config_dir_flag_overrides_environment() {
    let sandbox = Sandbox::new();
    let other = sandbox.root.path().join("other");
    sandbox
        .cmd()
        .arg("--config-dir")
        .arg(&other)
        .args(["config", "install"])
        .assert()
        .success();
    assert!(other.join("mainC").is_file());
    assert!(!sandbox.config_dir().exists());
}

#[test]
fn test_legacy_settings_file_is_read() {
    let sandbox = Sandbox::new();
    sandbox.configure();
    fs::remove_file(sandbox.config_dir().join("config.toml")).unwrap();
    fs::write(
        sandbox.config_dir().join("prdata.cfg"),
        format!(
            "progdir={}\nstubdir=stubs\ncompdir=library\nauthor=Old Timer\nemail=old@example.org\n",
            sandbox.progdir().display()
        ),
    )
    .unwrap();

    sandbox
        .cmd()
        .args(["new", "legacy", "--skip-autotools"])
        .assert()
        .success();
    assert!(sandbox.progdir().join("Legacy/legacy.c").is_file());
}

#[test]
fn test_remove_with_keep() {
    let sandbox = Sandbox::new();
    sandbox.configure();
    let kept = sandbox.config_dir().join("mine");
    fs::create_dir_all(&kept).unwrap();
    fs::write(kept.join("notes.txt"), "keep me\n").unwrap();

    sandbox
        .cmd()
        .args(["config", "remove", "--keep", "mine"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 5 files"));

    assert!(kept.join("notes.txt").is_file());
    assert!(!sandbox.config_dir().join("mainC").exists());

    sandbox
        .cmd()
        .args(["config", "remove"])
        .assert()
        .success();
    assert!(!sandbox.config_dir().exists());

    sandbox
        .cmd()
        .args(["config", "remove"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to remove"));
}
