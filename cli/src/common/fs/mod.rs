//! # newprogram Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Groups the filesystem helpers used by the command handlers. They sit on
//! top of the buffer engine in `core::buffer` and add the policy decisions
//! (stdout target, no-clobber links, skip-existing installs).
//!
//! ## Architecture
//!
//! - **`copy`**: Buffer-backed single-file copy and stock-file installation via `fs_extra`.
//! - **`io`**: Directory creation, buffer writes (including `-` for stdout), line files, `touch`.
//! - **`links`**: Hard links from the shared source library into projects.
//!
//! Import from the specific submodule, e.g. `crate::common::fs::io::ensure_dir_exists`.
//!

/// Single-file and stock-file copying.
pub mod copy;
/// Basic file I/O around `Buffer`.
pub mod io;
/// Hard link creation.
pub mod links;
