//! # Software Dependencies
//!
//! File: cli/src/commands/new/depends.rs
//!
//! ## Overview
//!
//! Expands the `--depends` lists and brings each named file into the new
//! project from the user's source library.
//!
//! ## Architecture
//!
//! - `expand_depends`: `name.h+c` is shorthand for `name.h name.c`.
//! - `link_or_copy`: a file found in `stubdir` is copied (stubs are meant to
//!   be edited per project); otherwise a file found in `compdir` is hard
//!   linked (shared sources stay shared); otherwise it is reported as unknown
//!   and skipped.
//!
use crate::common::fs::{copy::copy_file, io::is_regular_file, links::create_hard_link};
use crate::core::error::{NewProgramError, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Where each dependency came from.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DependencyReport {
    pub copied: Vec<String>,
    pub linked: Vec<String>,
    pub unknown: Vec<String>,
}

/// Splits the given lists into file names, expanding `+` shorthand.
pub fn expand_depends(lists: &[String]) -> Vec<String> {
    let mut names = Vec::new();
    for word in lists.iter().flat_map(|list| list.split_whitespace()) {
        match word.split_once('+') {
            Some((first, other_ext)) => {
                names.push(first.to_string());
                match first.rsplit_once('.') {
                    Some((stem, _)) if !other_ext.is_empty() => {
                        names.push(format!("{}.{}", stem, other_ext));
                    }
                    _ => warn!("Cannot expand '{}', using '{}' only", word, first),
                }
            }
            None => names.push(word.to_string()),
        }
    }
    debug!("Expanded dependencies: {:?}", names);
    names
}

/// Copies or links each of `names` into `project_dir`.
///
/// With `force`, a file already present in the project is replaced.
pub fn link_or_copy(
    stubdir: &Path,
    compdir: &Path,
    project_dir: &Path,
    names: &[String],
    force: bool,
) -> Result<DependencyReport> {
    let mut report = DependencyReport::default();
    for name in names {
        let target = project_dir.join(name);
        if force && target.symlink_metadata().is_ok() {
            fs::remove_file(&target).map_err(|e| NewProgramError::from_io(&target, e))?;
        }

        let stub = stubdir.join(name);
        let shared = compdir.join(name);
        if is_regular_file(&stub) {
            copy_file(&stub, &target)?;
            report.copied.push(name.clone());
        } else if is_regular_file(&shared) {
            create_hard_link(&shared, &target)?;
            report.linked.push(name.clone());
        } else {
            warn!("Software file unknown: {}", name);
            report.unknown.push(name.clone());
        }
    }
    Ok(report)
}
