//! # newprogram Filesystem Copy Operations
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! This module provides the two copy operations the scaffolding flow needs:
//! a single-file copy done through the buffer engine, and installation of the
//! stock template files into the configuration directory.
//!
//! ## Architecture
//!
//! - `copy_file` loads the source into a [`Buffer`] and writes it back out,
//!   so the same load/write rules apply as everywhere else (a missing
//!   source is `NotFound` and an empty source creates no file).
//! - `install_stock_files` uses the `fs_extra` crate to copy a named set of
//!   files in one call. Files that already exist are skipped unless `force`
//!   is set.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::copy;
//!
//! copy::copy_file(&locations.stock_file("mainC"), &project_dir.join("hello.c"))?;
//! let report = copy::install_stock_files(&share_dir, &config_dir, &STOCK_FILES, false)?;
//! ```
//!
use crate::common::fs::io::{ensure_dir_exists, write_buffer};
use crate::core::buffer::Buffer;
use crate::core::error::{NewProgramError, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of [`install_stock_files`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// File names copied into the target directory.
    pub copied: Vec<String>,
    /// File names left alone because they already existed.
    pub skipped: Vec<String>,
}

/// Copies the file at `from` to `to` through a buffer.
///
/// # Errors
///
/// Returns `NotFound` if `from` is not a regular file, or the I/O error of
/// the failing read or write.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    let buffer = Buffer::read_file(from, 0)
        .with_context(|| format!("Failed to read {:?} for copying", from))?;
    write_buffer(to, &buffer).with_context(|| format!("Failed to copy {:?} to {:?}", from, to))?;
    debug!("Copied {:?} -> {:?}", from, to);
    Ok(())
}

/// Copies the named files from `source_dir` into `target_dir`.
///
/// The target directory is created if needed. Every named file must exist
/// in `source_dir`; otherwise nothing is copied.
///
/// # Arguments
///
/// * `source_dir` - Directory holding the pristine stock files.
/// * `target_dir` - Configuration directory to populate.
/// * `names` - File names to copy.
/// * `force` - Overwrite files that already exist in `target_dir`.
///
/// # Returns
///
/// * `Result<InstallReport>` - Which files were copied and which were skipped.
pub fn install_stock_files(
    source_dir: &Path,
    target_dir: &Path,
    names: &[&str],
    force: bool,
) -> Result<InstallReport> {
    info!(
        "Installing stock files from {:?} to {:?}",
        source_dir, target_dir
    );

    // Every source has to be present before anything is copied.
    for name in names {
        let source = source_dir.join(name);
        if !source.is_file() {
            anyhow::bail!(NewProgramError::NotFound { path: source });
        }
    }
    ensure_dir_exists(target_dir)?;

    let mut report = InstallReport::default();
    let mut sources: Vec<PathBuf> = Vec::new();
    for name in names {
        if !force && target_dir.join(name).exists() {
            report.skipped.push(name.to_string());
        } else {
            sources.push(source_dir.join(name));
            report.copied.push(name.to_string());
        }
    }

    if !sources.is_empty() {
        // Configure copy options provided by the `fs_extra` crate.
        let mut options = fs_extra::dir::CopyOptions::new();
        options.overwrite = force;
        options.skip_exist = !force;

        fs_extra::copy_items(&sources, target_dir, &options).map_err(|e| {
            anyhow::anyhow!(e).context(format!(
                "Failed to copy stock files from {:?} to {:?}",
                source_dir, target_dir
            ))
        })?;
    }

    info!(
        "Stock files installed: {} copied, {} skipped",
        report.copied.len(),
        report.skipped.len()
    );
    Ok(report)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_copy_file() -> Result<()> {
        let dir = tempdir()?;
        let from = dir.path().join("mainC");
        let to = dir.path().join("hello.c");
        fs::write(&from, "int main(void) { return 0; }\n")?;

        copy_file(&from, &to)?;
        assert_eq!(fs::read(&from)?, fs::read(&to)?);
        Ok(())
    }

    #[test]
    fn test_copy_missing_file() -> Result<()> {
        let dir = tempdir()?;
        let err = copy_file(&dir.path().join("absent"), &dir.path().join("out")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<NewProgramError>(),
            Some(NewProgramError::NotFound { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_install_skips_existing_unless_forced() -> Result<()> {
        let share = tempdir()?;
        let config = tempdir()?;
        let target = config.path().join("newprogram");
        fs::write(share.path().join("am.mak"), "stock am")?;
        fs::write(share.path().join("mainC"), "stock main")?;

        let report = install_stock_files(share.path(), &target, &["am.mak", "mainC"], false)?;
        assert_eq!(report.copied, vec!["am.mak", "mainC"]);
        assert!(report.skipped.is_empty());
        assert_eq!(fs::read_to_string(target.join("mainC"))?, "stock main");

        fs::write(target.join("mainC"), "edited main")?;
        let report = install_stock_files(share.path(), &target, &["am.mak", "mainC"], false)?;
        assert_eq!(report.skipped, vec!["am.mak", "mainC"]);
        assert_eq!(fs::read_to_string(target.join("mainC"))?, "edited main");

        let report = install_stock_files(share.path(), &target, &["mainC"], true)?;
        assert_eq!(report.copied, vec!["mainC"]);
        assert_eq!(fs::read_to_string(target.join("mainC"))?, "stock main");
        Ok(())
    }

    #[test]
    fn test_install_requires_every_source() -> Result<()> {
        let share = tempdir()?;
        let config = tempdir()?;
        fs::write(share.path().join("am.mak"), "stock am")?;

        let err = install_stock_files(share.path(), config.path(), &["am.mak", "goptC"], false)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<NewProgramError>(),
            Some(NewProgramError::NotFound { .. })
        ));
        assert!(!config.path().join("am.mak").exists());
        Ok(())
    }
}
