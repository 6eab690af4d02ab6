//! # newprogram Directory Walker
//!
//! File: cli/src/core/walker.rs
//!
//! ## Overview
//!
//! Recursively collects the paths below a root directory into a [`Buffer`],
//! one NUL-terminated record per accepted entry. It is used by
//! `newprogram scan` and by the configuration cleanup sweep.
//!
//! ## Architecture
//!
//! - [`EntryKind`]: the closed set of filesystem entry kinds.
//! - [`WalkConfig`]: accepted kinds, canonical exclude list and growth increment.
//! - [`Walker`]: drives `walkdir` with symlinks left unfollowed. The kind filter
//!   and the exclude list both live in `filter_entry`, so a directory that is
//!   rejected is never descended.
//!
//! Rules:
//! - An entry whose kind is not accepted is skipped. Without `Directory` in the
//!   accepted set the walk never leaves the root.
//! - A directory whose canonical path is in the exclude list is skipped along
//!   with everything beneath it. Its own path is not recorded either.
//! - Any directory that cannot be read aborts the whole walk.
//!
//! ## Examples
//!
//! ```rust
//! let config = WalkConfig::new([EntryKind::Regular, EntryKind::Directory])
//!     .exclude("/home/me/.config/newprogram/keep");
//! let mut paths = Buffer::new();
//! let count = Walker::new(config).walk(Path::new("/home/me/.config/newprogram"), &mut paths)?;
//! ```
//!
use crate::core::buffer::{Buffer, DEFAULT_INCREMENT};
use crate::core::error::{NewProgramError, Result};
use anyhow::{bail, Context};
use std::collections::BTreeSet;
use std::fs::{self, FileType};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// Kind of a directory entry, as reported without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum EntryKind {
    #[value(name = "file")]
    Regular,
    #[value(name = "dir")]
    Directory,
    #[value(name = "symlink")]
    Symlink,
    #[value(name = "block")]
    BlockDevice,
    #[value(name = "char")]
    CharDevice,
    Fifo,
    Socket,
}

impl EntryKind {
    /// Every kind, for sweeps that must see the whole tree.
    pub const ALL: [EntryKind; 7] = [
        EntryKind::Regular,
        EntryKind::Directory,
        EntryKind::Symlink,
        EntryKind::BlockDevice,
        EntryKind::CharDevice,
        EntryKind::Fifo,
        EntryKind::Socket,
    ];

    /// Classifies a `FileType`. Returns `None` for kinds the platform
    /// reports but this enum does not name.
    pub fn from_file_type(file_type: FileType) -> Option<Self> {
        if file_type.is_symlink() {
            Some(EntryKind::Symlink)
        } else if file_type.is_dir() {
            Some(EntryKind::Directory)
        } else if file_type.is_file() {
            Some(EntryKind::Regular)
        } else if file_type.is_block_device() {
            Some(EntryKind::BlockDevice)
        } else if file_type.is_char_device() {
            Some(EntryKind::CharDevice)
        } else if file_type.is_fifo() {
            Some(EntryKind::Fifo)
        } else if file_type.is_socket() {
            Some(EntryKind::Socket)
        } else {
            None
        }
    }
}

/// What a [`Walker`] records and where it refuses to go.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    kinds: BTreeSet<EntryKind>,
    excludes: Vec<PathBuf>,
    increment: usize,
}

impl WalkConfig {
    pub fn new<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = EntryKind>,
    {
        Self {
            kinds: kinds.into_iter().collect(),
            excludes: Vec::new(),
            increment: DEFAULT_INCREMENT,
        }
    }

    /// Adds a directory to skip. The path is canonicalized now; if that fails
    /// (e.g. it does not exist) it is kept as given and can still match a
    /// path spelled the same way.
    pub fn exclude(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        trace!("Excluding {}", canonical.display());
        self.excludes.push(canonical);
        self
    }

    pub fn excludes<I, P>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths.into_iter().fold(self, |config, p| config.exclude(p))
    }

    /// Growth increment handed to the buffer for each record.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn increment(mut self, increment: usize) -> Self {
        self.increment = increment;
        self
    }

    pub fn accepts(&self, kind: EntryKind) -> bool {
        self.kinds.contains(&kind)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        if self.excludes.is_empty() {
            return false;
        }
        let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        self.excludes.iter().any(|e| *e == canonical)
    }
}

/// Recursive path collector.
pub struct Walker {
    config: WalkConfig,
}

impl Walker {
    pub fn new(config: WalkConfig) -> Self {
        if !config.accepts(EntryKind::Directory) {
            debug!("Walk without directories accepted stays at depth 1");
        }
        Self { config }
    }

    /// Appends the path of every accepted entry below `root` to `buffer`.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory to traverse. The root itself is never recorded.
    /// * `buffer` - Destination; existing records are left untouched.
    ///
    /// # Returns
    ///
    /// * `Result<usize>` - Number of records appended by this walk.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `PermissionDenied` or `Io` for the first directory
    /// that cannot be read (including `root`), and `FileSystem` when `root`
    /// is not a directory.
    pub fn walk(&self, root: &Path, buffer: &mut Buffer) -> Result<usize> {
        let metadata = fs::metadata(root).map_err(|e| NewProgramError::from_io(root, e))?;
        if !metadata.is_dir() {
            bail!(NewProgramError::FileSystem(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let entries = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| self.admits(entry));

        let mut count = 0;
        for entry in entries {
            let entry = entry.map_err(|e| walk_error(root, e))?;
            buffer
                .append_record(entry.path().as_os_str().as_bytes(), self.config.increment)
                .with_context(|| format!("Failed to record {}", entry.path().display()))?;
            count += 1;
        }

        debug!("Walked {}: {} entries recorded", root.display(), count);
        Ok(count)
    }

    fn admits(&self, entry: &DirEntry) -> bool {
        let Some(kind) = EntryKind::from_file_type(entry.file_type()) else {
            trace!("Skipping unclassified entry {}", entry.path().display());
            return false;
        };
        if !self.config.accepts(kind) {
            return false;
        }
        if kind == EntryKind::Directory && self.config.is_excluded(entry.path()) {
            debug!("Skipping excluded directory {}", entry.path().display());
            return false;
        }
        true
    }
}

fn walk_error(root: &Path, err: walkdir::Error) -> anyhow::Error {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    match err.into_io_error() {
        Some(io) => NewProgramError::from_io(&path, io).into(),
        None => NewProgramError::FileSystem(format!(
            "filesystem loop detected at {}",
            path.display()
        ))
        .into(),
    }
}
