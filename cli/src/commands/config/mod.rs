//! # newprogram Config Command Group
//!
//! File: cli/src/commands/config/mod.rs
//!
//! ## Overview
//!
//! Entry point and router for `newprogram config`, which manages the
//! configuration directory holding the stock templates and `config.toml`.
//!
//! ## Architecture
//!
//! - `ConfigArgs`: top-level arguments for the group.
//! - `ConfigCommand`: `install`, `status` and `remove`.
//! - `handle_config`: dispatches to the subcommand handler.
//!
//! The first-run helpers from `install` are re-exported for `newprogram new`.
//!
//! ## Examples
//!
//! ```bash
//! newprogram config install
//! newprogram config status
//! newprogram config remove --keep stubs
//! ```
//!
use crate::core::config::Locations;
use crate::core::error::Result;
use clap::{Parser, Subcommand};

mod install;
mod remove;
mod status;

pub use install::{configuration_complete, install_configuration};

/// # Config Command Group Arguments (`ConfigArgs`)
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Copy the stock templates and a starter config.toml into the configuration directory.
    Install(install::InstallArgs),
    /// Show where configuration is read from and whether it is complete.
    Status(status::StatusArgs),
    /// Delete the configuration directory, optionally keeping subdirectories.
    Remove(remove::RemoveArgs),
}

/// # Handle Config Command (`handle_config`)
///
/// ## Arguments
///
/// * `args`: The parsed `ConfigArgs` holding the chosen subcommand.
/// * `locations`: Configuration and share directories.
///
/// ## Returns
///
/// * `Result<()>`: Propagates the result of the subcommand handler.
pub async fn handle_config(args: ConfigArgs, locations: &Locations) -> Result<()> {
    match args.command {
        ConfigCommand::Install(args) => install::handle_install(args, locations).await?,
        ConfigCommand::Status(args) => status::handle_status(args, locations).await?,
        ConfigCommand::Remove(args) => remove::handle_remove(args, locations).await?,
    }
    Ok(())
}
