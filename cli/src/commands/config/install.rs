//! # newprogram Config Install Command
//!
//! File: cli/src/commands/config/install.rs
//!
//! ## Overview
//!
//! First-run setup: copies the stock templates and a starter `config.toml`
//! from the share directory into the configuration directory. `newprogram
//! new` calls [`install_configuration`] itself when the configuration is
//! incomplete, so running this command explicitly is only needed to
//! refresh the stock files (`--force`).
//!
use crate::common::fs::copy::{install_stock_files, InstallReport};
use crate::common::fs::io::is_regular_file;
use crate::core::config::{Locations, STOCK_FILES, TEMPLATE_FILES};
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

/// # Config Install Arguments (`InstallArgs`)
#[derive(Parser, Debug, Default)]
pub struct InstallArgs {
    /// Overwrite stock files (including config.toml) that already exist.
    #[arg(long, short = 'f')]
    force: bool,
}

/// True when the configuration directory holds every template and a
/// settings file, either `config.toml` or the legacy `prdata.cfg`.
pub fn configuration_complete(locations: &Locations) -> bool {
    if !locations.config_dir.is_dir() {
        debug!("No configuration directory at {:?}", locations.config_dir);
        return false;
    }
    let templates = TEMPLATE_FILES
        .iter()
        .all(|name| is_regular_file(&locations.stock_file(name)));
    let settings = is_regular_file(&locations.config_file())
        || is_regular_file(&locations.legacy_config_file());
    debug!("Templates present: {}, settings present: {}", templates, settings);
    templates && settings
}

/// Copies the stock files into the configuration directory.
///
/// # Errors
///
/// Returns `NotFound` if a stock file is missing from the share directory.
pub fn install_configuration(locations: &Locations, force: bool) -> Result<InstallReport> {
    info!(
        "Installing configuration into {}",
        locations.config_dir.display()
    );
    install_stock_files(&locations.share_dir, &locations.config_dir, &STOCK_FILES, force)
        .with_context(|| {
            format!(
                "Failed to install stock files from {}",
                locations.share_dir.display()
            )
        })
}

pub async fn handle_install(args: InstallArgs, locations: &Locations) -> Result<()> {
    let report = install_configuration(locations, args.force)?;
    for name in &report.copied {
        println!("Installed {}", name);
    }
    for name in &report.skipped {
        println!("Kept existing {} (use --force to replace)", name);
    }
    println!(
        "Configuration directory: {}",
        locations.config_dir.display()
    );
    Ok(())
}
