//! # newprogram Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Runs the external autotools programs (`autoscan`, `autoheader`, `aclocal`,
//! `automake`, `autoconf`) on behalf of `newprogram new`.
//!
//! ## Architecture
//!
//! - Commands run with `std::process::Command`, inheriting stdio so the
//!   user sees the tools' own output.
//! - The working directory is passed to the child with `current_dir`; the
//!   process-wide cwd is never changed.
//! - A command that cannot be started, or that exits unsuccessfully, is an
//!   error. Every bootstrap step depends on the one before it.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process::run_command;
//!
//! run_command("automake", &["--add-missing", "--copy"], &project_dir)?;
//! ```
//!
use crate::core::error::{NewProgramError, Result};
use anyhow::Context;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Runs `program` with `args` inside `cwd`.
///
/// # Errors
///
/// Returns an `Err` if the command cannot be started, or an
/// `ExternalCommand` error if it exits unsuccessfully.
pub fn run_command(program: &str, args: &[&str], cwd: &Path) -> Result<()> {
    let cmdline = command_line(program, args);
    info!("Running `{}` in {}", cmdline, cwd.display());

    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .status()
        .with_context(|| format!("Failed to execute `{}`", cmdline))?;

    debug!("`{}` exited with {}", cmdline, status);
    if !status.success() {
        anyhow::bail!(NewProgramError::ExternalCommand {
            cmd: cmdline,
            status: status.to_string(),
            output: String::new(),
        });
    }
    Ok(())
}

fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
