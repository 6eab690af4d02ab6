//! # Source File Generation
//!
//! File: cli/src/commands/new/sources.rs
//!
//! ## Overview
//!
//! Copies the main source stub into the project and, for programs with
//! options, the `gopt.c`/`gopt.h` option parser stubs. When an option list
//! is given, the generated option code is patched into all three files.
//!
//! ## Architecture
//!
//! With options, the commented-out `HAVE_GOPT` switch in the main source is
//! turned on so it includes `gopt.h` and calls `process_options`.
//!
//! The stubs carry marker comments containing the word `target`. Each marker
//! is replaced with its fragment from [`OptionCode`] through
//! [`Buffer::replace_all`]. Without an option list the markers are left in
//! place for hand editing.
//!
use super::identity::ProgramId;
use crate::common::fs::{copy::copy_file, io::write_buffer};
use crate::core::buffer::Buffer;
use crate::core::config::Locations;
use crate::core::error::Result;
use crate::core::templating::{OptionCode, OptionSpec};
use anyhow::Context;
use std::path::Path;
use tracing::{debug, info, warn};

/// Option parser source written into projects with options.
pub const GOPT_C: &str = "gopt.c";
/// Option parser header written into projects with options.
pub const GOPT_H: &str = "gopt.h";

const GOPT_SWITCH: &str = "/* #define HAVE_GOPT */";
const MAIN_MARKER: &str = "/* dummy opts target */";
const HEADER_MARKER: &str = "/* header target */";
const SHORT_OPTIONS_MARKER: &str = "/* short options target */";
const LONG_OPTIONS_MARKER: &str = "/* long options target */\n";
const OPTION_CASES_MARKER: &str = "/* option proc target */\n";
const HELP_MARKER: &str = "/* help target */\n";
const SYNOPSIS_MARKER: &str = "/* syn target */\n";

/// Writes the project's C sources.
///
/// # Arguments
///
/// * `locations` - Where the `mainC`, `goptC` and `goptH` stubs live.
/// * `project_dir` - The new project's directory.
/// * `id` - Program identity; the main source is written as `id.src`.
/// * `with_options` - Also write `gopt.c` and `gopt.h`.
/// * `options` - Option list to generate code for; ignored without
///   `with_options`.
pub fn generate_sources(
    locations: &Locations,
    project_dir: &Path,
    id: &ProgramId,
    with_options: bool,
    options: Option<&[OptionSpec]>,
) -> Result<()> {
    copy_file(&locations.stock_file("mainC"), &project_dir.join(&id.src))?;
    if !with_options {
        return Ok(());
    }
    copy_file(&locations.stock_file("goptC"), &project_dir.join(GOPT_C))?;
    copy_file(&locations.stock_file("goptH"), &project_dir.join(GOPT_H))?;
    patch_file(
        &project_dir.join(&id.src),
        &[(GOPT_SWITCH, "#define HAVE_GOPT")],
        64,
    )?;

    if let Some(options) = options {
        info!("Generating code for {} options", options.len());
        let code = OptionCode::render(options, &id.display_name)?;
        patch_file(
            &project_dir.join(&id.src),
            &[(MAIN_MARKER, code.main_printout.as_str())],
            1024,
        )?;
        patch_file(
            &project_dir.join(GOPT_H),
            &[(HEADER_MARKER, code.header_members.as_str())],
            256,
        )?;
        patch_file(
            &project_dir.join(GOPT_C),
            &[
                (SHORT_OPTIONS_MARKER, code.short_options.as_str()),
                (LONG_OPTIONS_MARKER, code.long_options.as_str()),
                (OPTION_CASES_MARKER, code.option_cases.as_str()),
                (HELP_MARKER, code.help_lines.as_str()),
                (SYNOPSIS_MARKER, code.synopsis.as_str()),
            ],
            1024,
        )?;
    }
    Ok(())
}

fn patch_file(path: &Path, patches: &[(&str, &str)], increment: usize) -> Result<()> {
    let mut buffer = Buffer::read_file(path, 1)
        .with_context(|| format!("Failed to load generated source {:?}", path))?;
    for (marker, fragment) in patches {
        let count = buffer.replace_all(marker.as_bytes(), fragment.as_bytes(), increment)?;
        if count == 0 {
            warn!("No {:?} marker in {:?}", marker.trim_end(), path);
        }
        debug!("Patched {} occurrence(s) of {:?}", count, marker.trim_end());
    }
    write_buffer(path, &buffer)
}
