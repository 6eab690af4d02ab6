//! # newprogram Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error taxonomy used throughout newprogram. Every
//! failure is returned as an error value to the caller; nothing below `main`
//! terminates the process.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `NewProgramError`: A custom error enum using `thiserror` for the specific kinds
//! - `Result<T>`: A type alias for `anyhow::Result<T>` so call sites can attach context
//!
//! The kinds mirror the failure modes of the buffer engine, the walker and the
//! scaffolding flow:
//! - `NotFound`, `PermissionDenied`, `Io` for filesystem syscalls
//! - `OutOfMemory` and `CapacityExceeded` for buffer sizing
//! - `MalformedInput` when a required marker or delimiter is absent
//! - `Config`, `Template`, `ExternalCommand` for the outer layers
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error kind
//! anyhow::bail!(NewProgramError::MalformedInput(
//!     "no _DATA= line in Makefile.am".to_string()
//! ));
//!
//! // Inspect the kind later
//! match result {
//!     Err(e) if matches!(e.downcast_ref::<NewProgramError>(), Some(NewProgramError::NotFound { .. })) => {
//!         println!("File not found");
//!     }
//!     other => other?,
//! }
//! ```
//!
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Custom error type for the newprogram application.
#[derive(Error, Debug)]
pub enum NewProgramError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("No such file or directory: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Out of memory while reserving {requested} bytes")]
    OutOfMemory { requested: usize },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("External command failed: {cmd}, Status: {status}, Output:\n{output}")]
    ExternalCommand {
        cmd: String,
        status: String,
        output: String,
    },

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

impl NewProgramError {
    /// Maps an `io::Error` raised while touching `path` onto the taxonomy,
    /// keeping `NotFound` and `PermissionDenied` distinguishable.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => NewProgramError::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => NewProgramError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => NewProgramError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
