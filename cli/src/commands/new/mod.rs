//! # newprogram New Command
//!
//! File: cli/src/commands/new/mod.rs
//!
//! ## Overview
//!
//! This module implements `newprogram new`, which lays out a complete
//! autotools-based C project: `Makefile.am`, the main source, optional
//! option-parsing sources, reused library sources and the configured
//! autotools build.
//!
//! ## Architecture
//!
//! The command flow follows these steps:
//! 1. On first run (incomplete configuration) install the stock files, ask
//!    the user to edit `config.toml` and stop.
//! 2. Derive the program identity from the project name (`identity`).
//! 3. Load, resolve and validate the configuration.
//! 4. Create `progdir/<Dir>`; an existing project needs `--force`.
//! 5. Write `Makefile.am` and list the sources in it (`makefile`).
//! 6. Copy or link the dependency files (`depends`).
//! 7. Write the C sources, generating option code if asked (`sources`).
//! 8. Bootstrap autotools unless `--skip-autotools` (`autotools`).
//! 9. Print a completion message.
//!
//! ## Examples
//!
//! ```bash
//! # Plain program
//! newprogram new hello
//!
//! # Reuse str.h/str.c and files.c, with generated option parsing
//! newprogram new hello --depends "str.h+c files.c" --options "vverbose ooutput:"
//!
//! # Ship extra data, skip the autotools run
//! newprogram new hello --extra-dist "hello.conf" --skip-autotools
//! ```
//!
use crate::commands::config::{configuration_complete, install_configuration};
use crate::common::fs::io::ensure_dir_exists;
use crate::core::config::{self, Locations, CONFIG_FILENAME};
use crate::core::error::{NewProgramError, Result};
use crate::core::templating;
use anyhow::Context;
use clap::Parser;
use std::{env, path::Path};
use tracing::{debug, info};

mod autotools;
mod depends;
mod identity;
mod makefile;
mod sources;

use identity::ProgramId;

/// # New Project Arguments (`NewArgs`)
///
/// Defines the command-line arguments accepted by `newprogram new`.
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Name of the program. The project directory is the lower-cased name
    /// with its first letter capitalised.
    name: String,

    /// Space separated source files to bring in from the stub or library
    /// directory. `name.h+c` is shorthand for `name.h name.c`. Repeatable.
    #[arg(long, short = 'd', action = clap::ArgAction::Append)]
    depends: Vec<String>,

    /// Add the `gopt.c`/`gopt.h` option parser stubs.
    #[arg(long, short = 'w')]
    with_options: bool,

    /// Option list to generate parsing code for, e.g. "vverbose ooutput:".
    /// Implies `--with-options`.
    #[arg(long, short = 'o')]
    options: Option<String>,

    /// Space separated data files to install and distribute. Repeatable.
    #[arg(long, short = 'x', action = clap::ArgAction::Append)]
    extra_dist: Vec<String>,

    /// Write the project files but do not run the autotools.
    #[arg(long)]
    skip_autotools: bool,

    /// Reuse an existing project directory, replacing generated files.
    #[arg(long, short = 'f')]
    force: bool,
}

/// # Handle New Command (`handle_new`)
///
/// ## Arguments
/// * `args` - The parsed `NewArgs`.
/// * `locations` - Configuration and share directories.
///
/// ## Returns
/// * `Result<()>` - `Ok(())` once the project is written (or the first-run
///   setup is done), `Err` on the first failing step.
pub async fn handle_new(args: NewArgs, locations: &Locations) -> Result<()> {
    info!("Handling new command for '{}'", args.name);

    if !configuration_complete(locations) {
        install_configuration(locations, false)
            .context("Failed to set up the configuration directory")?;
        println!(
            "Please edit {} in {} to meet your needs.",
            CONFIG_FILENAME,
            locations.config_dir.display()
        );
        return Ok(());
    }

    let id = ProgramId::from_name(&args.name)?;
    let options = args
        .options
        .as_deref()
        .map(templating::parse_option_list)
        .transpose()?;
    let with_options = args.with_options || options.is_some();
    info!(
        "Program identity: dir={} exe={} src={} man={} thr={}",
        id.dir, id.exe, id.src, id.man, id.thr
    );

    let cfg = config::load_config(locations)?;
    let paths = cfg.resolve_paths()?;
    config::validate_paths(&paths)?;

    let project_dir = paths.progdir.join(&id.dir);
    if project_dir.exists() && !args.force {
        anyhow::bail!(NewProgramError::FileSystem(format!(
            "Project directory '{}' already exists. Use --force to reuse it.",
            project_dir.display()
        )));
    }
    ensure_dir_exists(&project_dir)?;
    info!(
        "Project {}, library {}, stubs {}",
        project_dir.display(),
        paths.compdir.display(),
        paths.stubdir.display()
    );

    makefile::write_makefile_am(&locations.stock_file("am.mak"), &project_dir, &id)
        .context("Failed to write Makefile.am")?;

    let deps = depends::expand_depends(&args.depends);
    makefile::add_sources(&project_dir, &id, &deps)?;
    let report =
        depends::link_or_copy(&paths.stubdir, &paths.compdir, &project_dir, &deps, args.force)?;
    debug!("Dependencies: {:?}", report);

    if with_options {
        let gopt = [sources::GOPT_C.to_string(), sources::GOPT_H.to_string()];
        makefile::add_sources(&project_dir, &id, &gopt)?;
    }

    let extras: Vec<String> = args
        .extra_dist
        .iter()
        .flat_map(|list| list.split_whitespace())
        .map(str::to_string)
        .collect();
    makefile::add_extra_dist(&project_dir, &extras)?;

    sources::generate_sources(
        locations,
        &project_dir,
        &id,
        with_options,
        options.as_deref(),
    )?;

    if args.skip_autotools {
        info!("Skipping autotools bootstrap");
    } else {
        autotools::bootstrap(&project_dir, &id, &cfg).context("Autotools bootstrap failed")?;
    }

    print_completion_message(&project_dir, &id, args.skip_autotools);
    Ok(())
}

fn print_completion_message(project_dir: &Path, id: &ProgramId, skipped_autotools: bool) {
    println!("\nProject '{}' created successfully!", id.display_name);
    println!("   Location: {}", project_dir.display());

    let display_path = match env::current_dir() {
        Ok(cwd) => pathdiff::diff_paths(project_dir, &cwd)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| project_dir.display().to_string()),
        Err(_) => project_dir.display().to_string(),
    };

    println!("\nNext steps:");
    println!("  1. Navigate to your project: cd {}", display_path);
    if skipped_autotools {
        println!("  2. Bootstrap the build: autoreconf --install");
        println!("  3. Configure and build: ./configure && make");
    } else {
        println!("  2. Configure and build: ./configure && make");
    }
    println!("  Edit {} to get started.", id.src);
}
