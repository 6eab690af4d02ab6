//! # newprogram Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module centralizes the small filesystem input/output operations that
//! the command handlers need around the buffer engine: making sure a
//! directory exists, writing a buffer out (to a file or to stdout), writing
//! small documentation files, touching files and probing for regular files.
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: Creates a directory and its parents, failing if
//!   the path exists as something other than a directory.
//! - **`write_buffer`**: Writes the used region of a [`Buffer`]. The target
//!   `-` means standard output, and an empty buffer writes nothing at all.
//! - **`write_lines`**: Writes newline-terminated lines, built as buffer
//!   records and converted to line mode.
//! - **`touch`**: Creates a file if missing without truncating an existing one.
//! - **`is_regular_file`**: True only for an existing regular file.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! io::ensure_dir_exists(&project_dir)?;
//! io::write_lines(&project_dir.join("README"), &["README for hello"])?;
//! io::write_buffer(Path::new("-"), &paths)?; // to stdout
//! ```
//!
use crate::core::buffer::Buffer;
use crate::core::error::{NewProgramError, Result};
use anyhow::Context; // For adding context to errors
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, trace};

/// Target name that stands for standard output.
pub const STDOUT_TARGET: &str = "-";

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, this function creates the directory including
/// any necessary parents (like `mkdir -p`).
///
/// # Arguments
///
/// * `path` - The directory path to ensure exists.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory (`NewProgramError::FileSystem`).
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        // Path does not exist, create it recursively.
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        // It exists but is something else, e.g. a file.
        anyhow::bail!(NewProgramError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Writes the used bytes of `buffer` to `target`, replacing any previous
/// content.
///
/// `target` of `-` writes to standard output. An empty buffer is not written
/// at all, so no file is created for it.
///
/// # Errors
///
/// Returns `NotFound`/`PermissionDenied`/`Io` if the file cannot be created or
/// the write (or flush of stdout) fails.
pub fn write_buffer(target: &Path, buffer: &Buffer) -> Result<()> {
    let bytes = buffer.as_bytes();
    // Nothing to write: leave the filesystem untouched.
    if bytes.is_empty() {
        trace!("Skipping empty write to {:?}", target);
        return Ok(());
    }

    if target.as_os_str() == STDOUT_TARGET {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(bytes)
            .and_then(|_| handle.flush())
            .map_err(|e| NewProgramError::from_io(target, e))?;
        return Ok(());
    }

    fs::write(target, bytes).map_err(|e| NewProgramError::from_io(target, e))?;
    debug!("Wrote {} bytes to {:?}", bytes.len(), target);
    Ok(())
}

/// Writes each of `lines` plus a terminating newline to `path`.
///
/// Every line goes in as one record and the buffer is then switched to line
/// mode, so a line must not contain a NUL byte.
pub fn write_lines(path: &Path, lines: &[&str]) -> Result<()> {
    let size: usize = lines.iter().map(|l| l.len() + 1).sum();
    let mut buffer = Buffer::new();
    for line in lines {
        buffer
            .append_record(line.as_bytes(), size)
            .with_context(|| format!("Invalid content for {:?}", path))?;
    }
    buffer.strings_to_lines();
    write_buffer(path, &buffer)
}

/// Creates `path` if it does not exist. Existing content is left alone.
pub fn touch(path: &Path) -> Result<()> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| NewProgramError::from_io(path, e))?;
    trace!("Touched {:?}", path);
    Ok(())
}

/// True if `path` can be stat'ed and is a regular file.
pub fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
