//! # newprogram Filesystem Link Operations
//!
//! File: cli/src/common/fs/links.rs
//!
//! ## Overview
//!
//! Hard links shared library sources from the configured `compdir` into a
//! new project, so that every program built against the same sources sees
//! edits to them immediately.
//!
//! ## Architecture
//!
//! `create_hard_link` checks the source before calling `std::fs::hard_link`:
//! - the source must be an existing regular file
//! - the parent directory of the link is created if needed
//! - an existing item at the link location is an error, never replaced
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::links;
//!
//! links::create_hard_link(&compdir.join("str.c"), &project_dir.join("str.c"))?;
//! ```
//!
use crate::common::fs::io::{ensure_dir_exists, is_regular_file}; // Helpers from sibling io module
use crate::core::error::{NewProgramError, Result};
use anyhow::{bail, Context};
use std::fs;
use std::path::Path;
use tracing::info;

/// Creates a hard link at `target` to the regular file at `source`.
///
/// # Arguments
///
/// * `source` - The existing file to link to.
/// * `target` - Where the new directory entry is created.
///
/// # Errors
///
/// Returns an `Err` if:
/// - `source` is not an existing regular file (`NotFound`).
/// - Something already exists at `target` (`FileSystem`).
/// - The link itself cannot be made, e.g. across filesystems.
pub fn create_hard_link(source: &Path, target: &Path) -> Result<()> {
    info!("Hard linking {:?} to {:?}", target, source);

    // 1. The source must be a plain file; directories cannot be hard linked.
    if !is_regular_file(source) {
        bail!(NewProgramError::NotFound {
            path: source.to_path_buf()
        });
    }

    // 2. Ensure the parent directory of the link exists.
    if let Some(parent) = target.parent() {
        ensure_dir_exists(parent)
            .with_context(|| format!("Failed to create parent directory for link {:?}", target))?;
    }

    // 3. Refuse to clobber whatever is already there, links included.
    if target.symlink_metadata().is_ok() {
        bail!(NewProgramError::FileSystem(format!(
            "Cannot link {:?}: target already exists",
            target
        )));
    }

    fs::hard_link(source, target)
        .map_err(|e| NewProgramError::from_io(target, e))
        .with_context(|| format!("Failed to link {:?} to {:?}", target, source))?;
    Ok(())
}
