//! # newprogram Scan Command
//!
//! File: cli/src/commands/scan/mod.rs
//!
//! ## Overview
//!
//! `newprogram scan` lists the paths below a directory, filtered by entry
//! kind and with whole subtrees excluded, in the same way the walker is used
//! internally.
//!
//! ## Examples
//!
//! ```bash
//! # Files and directories (the default)
//! newprogram scan ~/Projects/Hello
//!
//! # Only symlinks and fifos, skipping .git
//! newprogram scan . --kind symlink --kind fifo --exclude .git
//!
//! # NUL separated, for xargs -0
//! newprogram scan src --kind file --print0 | xargs -0 wc -l
//! ```
//!
use crate::common::fs::io::{write_buffer, STDOUT_TARGET};
use crate::core::buffer::Buffer;
use crate::core::error::Result;
use crate::core::walker::{EntryKind, WalkConfig, Walker};
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

/// # Scan Arguments (`ScanArgs`)
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Directory to scan. The directory itself is not listed.
    root: PathBuf,

    /// Entry kinds to list. Repeatable; directories must be included for
    /// the scan to descend.
    #[arg(
        long,
        short = 'k',
        value_enum,
        action = clap::ArgAction::Append,
        default_values_t = [EntryKind::Regular, EntryKind::Directory]
    )]
    kind: Vec<EntryKind>,

    /// Directory to skip together with everything below it. Repeatable.
    #[arg(long, short = 'e', action = clap::ArgAction::Append)]
    exclude: Vec<PathBuf>,

    /// Terminate each path with NUL instead of a newline.
    #[arg(long, short = '0')]
    print0: bool,
}

pub async fn handle_scan(args: ScanArgs) -> Result<()> {
    info!("Scanning {} for {:?}", args.root.display(), args.kind);
    let paths = scan(&args.root, &args.kind, &args.exclude, args.print0)?;
    write_buffer(Path::new(STDOUT_TARGET), &paths)
}

/// Collects the matching paths into a buffer ready to be written out.
fn scan(root: &Path, kinds: &[EntryKind], exclude: &[PathBuf], print0: bool) -> Result<Buffer> {
    let config = WalkConfig::new(kinds.iter().copied()).excludes(exclude);
    let mut paths = Buffer::new();
    let count = Walker::new(config)
        .walk(root, &mut paths)
        .with_context(|| format!("Failed to scan {}", root.display()))?;
    if paths.is_empty() {
        info!("Nothing below {} matched", root.display());
    } else {
        info!("Found {} entries", count);
    }

    if !print0 {
        paths.strings_to_lines();
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_kinds() {
        let args = ScanArgs::try_parse_from(["scan", "/tmp"]).unwrap();
        assert_eq!(args.kind, vec![EntryKind::Regular, EntryKind::Directory]);
        assert!(!args.print0);

        let args = ScanArgs::try_parse_from(["scan", "/tmp", "--kind", "symlink", "-k", "fifo"])
            .unwrap();
        assert_eq!(args.kind, vec![EntryKind::Symlink, EntryKind::Fifo]);
        assert!(ScanArgs::try_parse_from(["scan", "/tmp", "--kind", "bogus"]).is_err());
    }

    #[test]
    fn test_scan_lines_and_nul() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("sub"))?;
        fs::write(dir.path().join("sub/a.c"), "a")?;

        let kinds = [EntryKind::Regular, EntryKind::Directory];
        let lines = scan(dir.path(), &kinds, &[], false)?;
        let text = String::from_utf8_lossy(lines.as_bytes()).into_owned();
        assert_eq!(text.lines().count(), 2);
        assert!(!lines.as_bytes().contains(&0));

        let records = scan(dir.path(), &kinds, &[dir.path().join("sub")], true)?;
        assert!(records.is_empty());
        Ok(())
    }
}
