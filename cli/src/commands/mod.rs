//! # newprogram Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Aggregates the top-level commands of the newprogram CLI so `main.rs` can
//! route to them.
//!
//! ## Command Groups
//!
//! - `new`: Create a project (Makefile.am, sources, dependencies, autotools)
//! - `config`: Install, inspect and remove the configuration directory
//! - `scan`: List paths below a directory with the walker
//!
//! Each module defines its own arguments structure and an async handler.
//!

/// Command group for the configuration directory. Includes `install`, `status`, `remove`.
pub mod config;
/// The `new` command that scaffolds a project.
pub mod new;
/// The `scan` command that lists paths below a directory.
pub mod scan;
