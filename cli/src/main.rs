//! # newprogram Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the newprogram CLI.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Resolving the configuration and share directories
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! - Each top-level command (`new`, `config`, `scan`) is a variant of the
//!   `Commands` enum, handled by a function in its own module.
//! - All errors are propagated to this level, logged with their full chain
//!   and turned into exit status 1.
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! newprogram --help
//!
//! # Create a project with verbose logging
//! newprogram -vv new hello --depends "str.h+c"
//!
//! # Use a throwaway configuration directory
//! NEWPROGRAM_CONFIG_DIR=/tmp/np newprogram config status
//! ```
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (new, config, scan)
mod common; // Shared utilities (fs, process)
mod core; // Core engine (buffer, walker, config, templating, errors)

use crate::core::config::Locations;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "newprogram",
    about = "Scaffold a new autotools-based C program",
    long_about = "Creates a project directory with Makefile.am, C sources, reused library files\n\
                  and a bootstrapped autotools build, from templates kept in the configuration directory.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Configuration directory holding config.toml and the stock templates.
    #[arg(long, global = true, env = "NEWPROGRAM_CONFIG_DIR")]
    config_dir: Option<PathBuf>,
    /// Directory the stock files are installed from on first run.
    #[arg(long, global = true, env = "NEWPROGRAM_SHARE_DIR")]
    share_dir: Option<PathBuf>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Create a new program project.
    #[command(alias = "n")]
    New(commands::new::NewArgs),
    /// Manage the configuration directory.
    #[command(alias = "c")]
    Config(commands::config::ConfigArgs),
    /// List the paths below a directory.
    #[command(alias = "s")]
    Scan(commands::scan::ScanArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match Locations::resolve(cli.config_dir, cli.share_dir) {
        Ok(locations) => match cli.command {
            Commands::New(args) => commands::new::handle_new(args, &locations).await,
            Commands::Config(args) => commands::config::handle_config(args, &locations).await,
            Commands::Scan(args) => commands::scan::handle_scan(args).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
