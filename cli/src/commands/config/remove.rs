//! # newprogram Config Remove Command
//!
//! File: cli/src/commands/config/remove.rs
//!
//! ## Overview
//!
//! Deletes the configuration directory, optionally keeping some of its
//! subdirectories.
//!
//! ## Architecture
//!
//! 1. The [`Walker`] collects every entry of every kind below the
//!    configuration directory, skipping the kept directories entirely.
//! 2. Everything that is not a directory is deleted.
//! 3. Directories are deleted deepest first. A directory still holding a kept
//!    subtree is not empty, so it is left in place with a warning.
//! 4. The configuration directory itself goes last, if it is empty.
//!
//! A relative `--keep` path is taken relative to the configuration directory.
//!
use crate::core::buffer::Buffer;
use crate::core::config::Locations;
use crate::core::error::{NewProgramError, Result};
use crate::core::walker::{EntryKind, WalkConfig, Walker};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Parser, Debug, Default)]
pub struct RemoveArgs {
    /// Directory inside the configuration directory to leave untouched. Repeatable.
    #[arg(long, short = 'k', action = clap::ArgAction::Append)]
    keep: Vec<PathBuf>,
}

/// Counts from a [`remove_config_dir`] sweep.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RemovalReport {
    pub files: usize,
    pub dirs: usize,
    pub left: Vec<PathBuf>,
}

/// Removes `config_dir` except for the `keep` subtrees.
pub fn remove_config_dir(config_dir: &Path, keep: &[PathBuf]) -> Result<RemovalReport> {
    let keep: Vec<PathBuf> = keep
        .iter()
        .map(|dir| {
            if dir.is_relative() {
                config_dir.join(dir)
            } else {
                dir.clone()
            }
        })
        .collect();

    let walker = Walker::new(WalkConfig::new(EntryKind::ALL).excludes(&keep));
    let mut paths = Buffer::new();
    walker.walk(config_dir, &mut paths)?;

    let mut report = RemovalReport::default();
    let mut dirs = Vec::new();
    for path in paths.to_string_list().into_iter().map(PathBuf::from) {
        let metadata = fs::symlink_metadata(&path).map_err(|e| NewProgramError::from_io(&path, e))?;
        if metadata.is_dir() {
            dirs.push(path);
        } else {
            fs::remove_file(&path).map_err(|e| NewProgramError::from_io(&path, e))?;
            debug!("Removed {}", path.display());
            report.files += 1;
        }
    }

    dirs.sort_by_key(|dir| std::cmp::Reverse(dir.components().count()));
    dirs.push(config_dir.to_path_buf());
    for dir in dirs {
        if is_empty_dir(&dir)? {
            fs::remove_dir(&dir).map_err(|e| NewProgramError::from_io(&dir, e))?;
            debug!("Removed directory {}", dir.display());
            report.dirs += 1;
        } else {
            warn!("Directory not empty, leaving it: {}", dir.display());
            report.left.push(dir);
        }
    }
    Ok(report)
}

fn is_empty_dir(dir: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(dir).map_err(|e| NewProgramError::from_io(dir, e))?;
    Ok(entries.next().is_none())
}

pub async fn handle_remove(args: RemoveArgs, locations: &Locations) -> Result<()> {
    let config_dir = &locations.config_dir;
    if !config_dir.exists() {
        println!("Nothing to remove at {}", config_dir.display());
        return Ok(());
    }
    info!("Removing configuration directory {}", config_dir.display());

    let report = remove_config_dir(config_dir, &args.keep)?;
    println!(
        "Removed {} files and {} directories from {}",
        report.files,
        report.dirs,
        config_dir.display()
    );
    for dir in &report.left {
        println!("  kept {}", dir.display());
    }
    Ok(())
}
