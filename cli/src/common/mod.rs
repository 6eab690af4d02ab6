//! # newprogram Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared helpers used by the command handlers. They keep command-specific
//! logic (`commands::`) apart from the core engine (`core::`).
//!
//! ## Architecture
//!
//! - **`fs`**: Filesystem operations around the buffer engine (I/O, copy, links).
//! - **`process`**: Running external programs with a fatal or warn-only failure policy.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//! use crate::common::process::run_command;
//!
//! io::ensure_dir_exists(&project_dir)?;
//! run_command("autoconf", &[], &project_dir)?;
//! ```
//!

/// Utilities for filesystem operations (I/O, copying, links).
pub mod fs;
/// Utilities for executing external processes.
pub mod process;
