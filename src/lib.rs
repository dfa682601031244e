//! Declarative Homebrew package installer.
//!
//! Reads a YAML manifest of taps, casks, formulae, pip packages and gems,
//! asks the package manager what is already installed, and installs the
//! rest. Failures are collected per category and per entry, so one bad
//! entry never stops the others.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: parse the manifest, classify records, inject implicit dependencies
//! - **[`resources`]**: the package store and per-category command profiles
//! - **[`tasks`]**: named reconciliation steps run in a fixed order
//! - **[`commands`]**: top-level subcommand orchestration (`install`, `check`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod resources;
pub mod tasks;
