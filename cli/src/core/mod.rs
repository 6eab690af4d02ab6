//! # newprogram Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core components that the command handlers are
//! built on. Nothing in here prints to the user or exits the process.
//!
//! ## Architecture
//!
//! - `buffer`: The growable byte buffer and its find/replace/insert engine
//! - `walker`: Recursive directory walker that records paths into a buffer
//! - `config`: Configuration location, loading, path resolution and validation
//! - `error`: Error types and the crate-wide `Result` alias
//! - `templating`: Option-list parsing and generated C option code
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::buffer::{Buffer, DEFAULT_INCREMENT};
//! use crate::core::error::{NewProgramError, Result};
//! use crate::core::walker::{EntryKind, WalkConfig, Walker};
//! ```
//!
pub mod buffer;
pub mod config;
pub mod error;
pub mod templating;
pub mod walker;
