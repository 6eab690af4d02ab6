//! # newprogram Config Status Command
//!
//! File: cli/src/commands/config/status.rs
//!
//! Reports where configuration is read from, which stock files are present,
//! and, when the settings can be loaded, the resolved project directories.
//!
use super::install::configuration_complete;
use crate::common::fs::io::is_regular_file;
use crate::core::config::{self, Locations, STOCK_FILES};
use crate::core::error::Result;
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser, Debug, Default)]
pub struct StatusArgs {}

pub async fn handle_status(_args: StatusArgs, locations: &Locations) -> Result<()> {
    info!("Handling config status command...");
    println!("Configuration directory: {}", locations.config_dir.display());
    println!("Share directory:         {}", locations.share_dir.display());

    println!("\nStock files:");
    for name in STOCK_FILES {
        let state = if is_regular_file(&locations.stock_file(name)) {
            "present"
        } else {
            "missing"
        };
        println!("  {:<12} {}", name, state);
    }
    if is_regular_file(&locations.legacy_config_file()) {
        println!("  {:<12} present", config::LEGACY_CONFIG_FILENAME);
    }

    if !configuration_complete(locations) {
        println!("\nConfiguration is incomplete. Run `newprogram config install`.");
        return Ok(());
    }

    println!("\nConfiguration is complete.");
    // A settings error is printed, never returned.
    match config::load_config(locations).and_then(|cfg| Ok((cfg.resolve_paths()?, cfg))) {
        Ok((paths, cfg)) => {
            println!("  progdir: {}", paths.progdir.display());
            println!("  stubdir: {}", paths.stubdir.display());
            println!("  compdir: {}", paths.compdir.display());
            println!("  author:  {} {}", cfg.author, cfg.email);
        }
        Err(e) => {
            warn!("Could not load settings: {:?}", e);
            println!("  Settings could not be loaded: {:#}", e);
        }
    }
    Ok(())
}
