//! # newprogram CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every test runs
//! the real binary against throwaway directories: the configuration
//! directory lives in a temp dir and the stock files come from the
//! repository's `templates/` directory.
//!

// Allow potentially unused code in this common module, as different test files might use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The stock files shipped with the repository.
pub const SHARE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../templates");

/// # Get newprogram Command (`newprogram_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `newprogram` binary.
/// `RUST_LOG` is cleared so log output does not depend on the caller's
/// environment.
pub fn newprogram_cmd() -> Command {
    let mut cmd =
        Command::cargo_bin("newprogram").expect("Failed to find newprogram binary for testing");
    cmd.env_remove("RUST_LOG")
        .env_remove("NEWPROGRAM_CONFIG_DIR")
        .env_remove("NEWPROGRAM_SHARE_DIR");
    cmd
}

/// Temp directories for one test run.
pub struct Sandbox {
    pub root: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("Failed to create sandbox"),
        }
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.path().join("config")
    }

    pub fn progdir(&self) -> PathBuf {
        self.root.path().join("Programs")
    }

    pub fn stubdir(&self) -> PathBuf {
        self.progdir().join("stubs")
    }

    pub fn compdir(&self) -> PathBuf {
        self.progdir().join("library")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.root.path().join("bin")
    }

    /// `newprogram` with the sandbox's configuration and share directories.
    pub fn cmd(&self) -> Command {
        let mut cmd = newprogram_cmd();
        cmd.env("HOME", self.root.path())
            .env("NEWPROGRAM_CONFIG_DIR", self.config_dir())
            .env("NEWPROGRAM_SHARE_DIR", SHARE_DIR)
            .current_dir(self.root.path());
        cmd
    }

    /// Like [`Sandbox::cmd`], with the fake autotools first on `PATH`.
    pub fn cmd_with_fake_autotools(&self) -> Command {
        self.install_fake_autotools();
        let path = format!(
            "{}:{}",
            self.bin_dir().display(),
            std::env::var("PATH").unwrap_or_default()
        );
        let mut cmd = self.cmd();
        cmd.env("PATH", path);
        cmd
    }

    /// Installs the stock files and a `config.toml` pointing at the sandbox.
    pub fn configure(&self) {
        self.cmd().args(["config", "install"]).assert().success();
        fs::create_dir_all(self.stubdir()).unwrap();
        fs::create_dir_all(self.compdir()).unwrap();
        fs::write(
            self.config_dir().join("config.toml"),
            format!(
                "progdir = \"{}\"\nstubdir = \"stubs\"\ncompdir = \"library\"\n\
                 author = \"A. Hacker\"\nemail = \"hacker@example.org\"\n",
                self.progdir().display()
            ),
        )
        .unwrap();
    }

    fn install_fake_autotools(&self) {
        let bin = self.bin_dir();
        fs::create_dir_all(&bin).unwrap();
        write_script(
            &bin.join("autoscan"),
            "printf 'AC_PREREQ([2.71])\\nAC_INIT([FULL-PACKAGE-NAME], [VERSION], [BUG-REPORT-ADDRESS])\\nAC_CONFIG_SRCDIR([main.c])\\n' > configure.scan\n",
        );
        for tool in ["autoheader", "aclocal", "automake", "autoconf"] {
            write_script(
                &bin.join(tool),
                &format!("echo \"$@\" > .ran-{}\n", tool),
            );
        }
    }
}

pub fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{}", body)).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}
