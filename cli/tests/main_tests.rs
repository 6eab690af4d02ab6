//! # newprogram CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Top-level behaviour of the `newprogram` binary: standard flags, the
//! `help` subcommand and argument errors.
//!

mod common;

use common::*;
use predicates::prelude::*;

#[test]
fn test_version_flag() {
    newprogram_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_commands() {
    newprogram_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("new")
                .and(predicate::str::contains("config"))
                .and(predicate::str::contains("scan"))
                .and(predicate::str::contains("--config-dir")),
        );
}

#[test]
fn test_help_subcommand() {
    newprogram_cmd()
        .args(["help", "new"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--depends").and(predicate::str::contains("--options")));
}

#[test]
fn test_missing_subcommand_fails() {
    newprogram_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_subcommand_fails() {
    newprogram_cmd()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
