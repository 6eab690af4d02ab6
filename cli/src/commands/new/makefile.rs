//! # Makefile.am Generation
//!
//! File: cli/src/commands/new/makefile.rs
//!
//! ## Overview
//!
//! Builds the project's `Makefile.am` from the `am.mak` stock file and then
//! extends it in place as sources and distribution data are added.
//!
//! ## Architecture
//!
//! - `write_makefile_am` replaces the `exe%s`, `src%s`, `man%s` and `thr%s`
//!   markers with the program identity.
//! - `add_sources` appends file names to the `<exe>_SOURCES=<exe>.c` line.
//! - `add_extra_dist` appends file names to both the `_DATA=` and the
//!   `EXTRA_DIST=` lines.
//!
//! Every appended name gets a single leading space. The stub is expected to
//! contain each line it is asked to extend; a missing line is
//! `MalformedInput`.
//!
use super::identity::ProgramId;
use crate::common::fs::io::write_buffer;
use crate::core::buffer::Buffer;
use crate::core::error::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the generated automake input.
pub const MAKEFILE_AM: &str = "Makefile.am";

const MAKEFILE_INCREMENT: usize = 512;

fn makefile_path(project_dir: &Path) -> PathBuf {
    project_dir.join(MAKEFILE_AM)
}

fn joined(items: &[String]) -> String {
    items.iter().map(|item| format!(" {}", item)).collect()
}

/// Writes `Makefile.am` into `project_dir` from the `stock` stub.
pub fn write_makefile_am(stock: &Path, project_dir: &Path, id: &ProgramId) -> Result<()> {
    let mut buffer = Buffer::read_file(stock, 0)
        .with_context(|| format!("Failed to load Makefile.am stub {:?}", stock))?;

    for (marker, value) in [
        ("exe%s", &id.exe),
        ("src%s", &id.src),
        ("man%s", &id.man),
        ("thr%s", &id.thr),
    ] {
        let count = buffer.replace_all(marker.as_bytes(), value.as_bytes(), MAKEFILE_INCREMENT)?;
        debug!("Replaced {} occurrences of {} with {}", count, marker, value);
    }

    write_buffer(&makefile_path(project_dir), &buffer)
}

/// Appends `items` to the program's `_SOURCES` line.
pub fn add_sources(project_dir: &Path, id: &ProgramId, items: &[String]) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    let path = makefile_path(project_dir);
    let text = joined(items);
    let mut buffer = Buffer::read_file(&path, text.len())?;

    let marker = format!("{}_SOURCES={}", id.exe, id.src);
    buffer
        .insert_at_line_end(marker.as_bytes(), text.as_bytes(), MAKEFILE_INCREMENT)
        .with_context(|| format!("Could not find {} in {}", marker, MAKEFILE_AM))?;

    debug!("Added{} to {}", text, marker);
    write_buffer(&path, &buffer)
}

/// Appends `items` to both the `_DATA=` and the `EXTRA_DIST=` lines.
pub fn add_extra_dist(project_dir: &Path, items: &[String]) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    let path = makefile_path(project_dir);
    let text = joined(items);
    let mut buffer = Buffer::read_file(&path, 2 * text.len())?;

    for marker in ["_DATA=", "EXTRA_DIST="] {
        buffer
            .insert_at_line_end(marker.as_bytes(), text.as_bytes(), MAKEFILE_INCREMENT)
            .with_context(|| format!("Corrupted {}, no {}", MAKEFILE_AM, marker))?;
    }
    write_buffer(&path, &buffer)
}
