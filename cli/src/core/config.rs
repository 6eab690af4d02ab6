//! # newprogram Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module locates, loads, resolves and validates the user configuration
//! that tells newprogram where projects live and where reusable sources can
//! be found.
//!
//! ## Architecture
//!
//! Two directories matter:
//! - The **configuration directory** (`--config-dir`, `NEWPROGRAM_CONFIG_DIR`,
//!   else `~/.config/newprogram` via `directories`). It holds the stock
//!   templates and the user's settings.
//! - The **share directory** (`--share-dir`, `NEWPROGRAM_SHARE_DIR`, else
//!   `/usr/local/share/newprogram`). It holds the pristine stock files that
//!   first run copies into the configuration directory.
//!
//! Settings are read from `config.toml`. When it is absent, the older
//! `prdata.cfg` format (`key=value` lines) is read through the buffer engine
//! instead.
//!
//! Path resolution:
//! - `~` is expanded in every configured directory
//! - a relative `progdir` is taken relative to the home directory
//! - relative `stubdir` and `compdir` are taken relative to `progdir`
//!
//! ## Examples
//!
//! ```rust
//! let locations = Locations::resolve(cli.config_dir.clone(), cli.share_dir.clone())?;
//! let cfg = config::load_config(&locations)?;
//! let paths = cfg.resolve_paths()?;
//! config::validate_paths(&paths)?;
//! ```
//!
use crate::core::buffer::Buffer;
use crate::core::error::{NewProgramError, Result};
use anyhow::{anyhow, bail, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Settings file written by first run and edited by the user.
pub const CONFIG_FILENAME: &str = "config.toml";
/// Older `key=value` settings file, still honoured when `config.toml` is absent.
pub const LEGACY_CONFIG_FILENAME: &str = "prdata.cfg";
/// Installed location of the pristine stock files.
pub const DEFAULT_SHARE_DIR: &str = "/usr/local/share/newprogram";

/// Template files that must be present in the configuration directory.
pub const TEMPLATE_FILES: [&str; 4] = ["am.mak", "goptC", "goptH", "mainC"];
/// Everything first run copies from the share directory.
pub const STOCK_FILES: [&str; 5] = ["am.mak", CONFIG_FILENAME, "goptC", "goptH", "mainC"];

/// Longest value accepted from a legacy `key=value` line.
const LEGACY_VALUE_MAX: usize = 255;

/// The user's settings.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding all projects (can use ~).
    pub progdir: String,
    /// Stub sources copied into new projects (relative to `progdir` unless absolute).
    #[serde(default)]
    pub stubdir: String,
    /// Shared library sources hard-linked into new projects.
    #[serde(default)]
    pub compdir: String,
    /// Written to AUTHORS.
    #[serde(default)]
    pub author: String,
    /// Used as the bug report address in configure.ac.
    #[serde(default)]
    pub email: String,
}

/// Absolute directories derived from a [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub progdir: PathBuf,
    pub stubdir: PathBuf,
    pub compdir: PathBuf,
}

/// Where configuration and stock files are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    pub config_dir: PathBuf,
    pub share_dir: PathBuf,
}

impl Locations {
    /// Resolves both directories from explicit overrides or the defaults.
    pub fn resolve(config_dir: Option<PathBuf>, share_dir: Option<PathBuf>) -> Result<Self> {
        let config_dir = match config_dir {
            Some(dir) => expand_path(&dir),
            None => ProjectDirs::from("", "", "newprogram")
                .map(|d| d.config_dir().to_path_buf())
                .ok_or_else(|| {
                    anyhow!(NewProgramError::Config(
                        "Could not determine user config directory.".to_string()
                    ))
                })?,
        };
        let share_dir = share_dir
            .map(|dir| expand_path(&dir))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SHARE_DIR));
        debug!(
            "Config directory: {}, share directory: {}",
            config_dir.display(),
            share_dir.display()
        );
        Ok(Self {
            config_dir,
            share_dir,
        })
    }

    /// Path of a stock file inside the configuration directory.
    pub fn stock_file(&self, name: &str) -> PathBuf {
        self.config_dir.join(name)
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILENAME)
    }

    pub fn legacy_config_file(&self) -> PathBuf {
        self.config_dir.join(LEGACY_CONFIG_FILENAME)
    }
}

/// Loads the settings from `config.toml`, or from `prdata.cfg` when the
/// former is absent.
///
/// # Errors
///
/// Returns a `Config` error when neither file exists, and the parse error
/// of whichever file was read otherwise.
pub fn load_config(locations: &Locations) -> Result<Config> {
    let toml_path = locations.config_file();
    if toml_path.is_file() {
        info!("Loading configuration from: {}", toml_path.display());
        return load_config_from_path(&toml_path);
    }

    let legacy_path = locations.legacy_config_file();
    match Buffer::read_file_if_exists(&legacy_path, 1)? {
        Some(buffer) => {
            info!("Loading legacy configuration from: {}", legacy_path.display());
            config_from_legacy(&buffer)
                .with_context(|| format!("Failed to parse {}", legacy_path.display()))
        }
        None => bail!(NewProgramError::Config(format!(
            "No {} or {} found in {}",
            CONFIG_FILENAME,
            LEGACY_CONFIG_FILENAME,
            locations.config_dir.display()
        ))),
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn config_from_legacy(buffer: &Buffer) -> Result<Config> {
    let optional = |key: &str| -> Result<String> {
        if buffer.find(key.as_bytes(), 0).is_some() {
            legacy_value(buffer, key)
        } else {
            debug!("Legacy configuration has no '{}'", key);
            Ok(String::new())
        }
    };
    Ok(Config {
        progdir: legacy_value(buffer, "progdir")?,
        stubdir: legacy_value(buffer, "stubdir")?,
        compdir: legacy_value(buffer, "compdir")?,
        author: optional("author")?,
        email: optional("email")?,
    })
}

/// Looks up `key` in a `key=value` buffer.
///
/// The first occurrence of the key bytes wins; the value starts after the
/// next `=` and runs to the next newline, or to the end of the buffer when
/// the last line is unterminated.
///
/// # Errors
///
/// * `MalformedInput` if the key or the `=` after it is missing.
/// * `CapacityExceeded` if the value is longer than a file name may be.
pub fn legacy_value(buffer: &Buffer, key: &str) -> Result<String> {
    let at = buffer.find(key.as_bytes(), 0).ok_or_else(|| {
        anyhow!(NewProgramError::MalformedInput(format!(
            "No such parameter in config: {}",
            key
        )))
    })?;
    let eq = buffer.find_byte(b'=', at + key.len()).ok_or_else(|| {
        anyhow!(NewProgramError::MalformedInput(format!(
            "Malformed line in config: {}",
            key
        )))
    })?;
    let start = eq + 1;
    let stop = buffer.find_byte(b'\n', start).unwrap_or(buffer.len());
    if stop - start > LEGACY_VALUE_MAX {
        bail!(NewProgramError::CapacityExceeded(format!(
            "value of '{}' is {} bytes, the limit is {}",
            key,
            stop - start,
            LEGACY_VALUE_MAX
        )));
    }
    Ok(String::from_utf8_lossy(&buffer.as_bytes()[start..stop]).into_owned())
}

impl Config {
    /// Turns the configured directory strings into absolute paths.
    pub fn resolve_paths(&self) -> Result<ResolvedPaths> {
        if self.progdir.trim().is_empty() {
            bail!(NewProgramError::Config(
                "Setting 'progdir' must not be empty.".to_string()
            ));
        }
        let progdir = expand_path(Path::new(&self.progdir));
        let progdir = if progdir.is_relative() {
            let home = dirs::home_dir().ok_or_else(|| {
                anyhow!(NewProgramError::Config(
                    "Could not determine home directory.".to_string()
                ))
            })?;
            home.join(progdir)
        } else {
            progdir
        };
        let stubdir = progdir.join(expand_path(Path::new(&self.stubdir)));
        let compdir = progdir.join(expand_path(Path::new(&self.compdir)));

        debug!(
            "Resolved progdir={}, stubdir={}, compdir={}",
            progdir.display(),
            stubdir.display(),
            compdir.display()
        );
        Ok(ResolvedPaths {
            progdir,
            stubdir,
            compdir,
        })
    }
}

/// Checks the resolved directories before any project is written.
///
/// A missing `stubdir` or `compdir` only means that no dependency can be
/// found there, so it is reported as a warning.
pub fn validate_paths(paths: &ResolvedPaths) -> Result<()> {
    info!("Validating configured directories...");
    if paths.progdir.exists() && !paths.progdir.is_dir() {
        bail!(NewProgramError::Config(format!(
            "Configured progdir '{}' exists but is not a directory.",
            paths.progdir.display()
        )));
    }
    for (name, dir) in [("stubdir", &paths.stubdir), ("compdir", &paths.compdir)] {
        if !dir.is_dir() {
            warn!("Configured {} '{}' is not a directory.", name, dir.display());
        }
    }
    Ok(())
}

fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
