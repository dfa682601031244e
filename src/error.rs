//! Domain-specific error types for brewsync.
//!
//! Internal modules return typed errors while command handlers at the CLI
//! boundary convert them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ConfigError  fatal, manifest unreadable or malformed, nothing installed
//! QueryError   per category, installed set could not be listed
//! EntryError   per manifest entry, missing name or failed install
//! ```

use thiserror::Error;

use crate::config::Category;

/// Errors that arise while loading the manifest. Always fatal for the run.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The manifest file could not be read.
    #[error("could not open YAML file {path}: {source}")]
    Read {
        /// Path to the manifest.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The manifest is not a well-formed sequence of mappings.
    #[error("could not parse YAML file {path}: {source}")]
    Parse {
        /// Path to the manifest.
        path: String,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
}

/// Failure to determine what is already installed for a category.
///
/// Aborts reconciliation of that category only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The list command could not be run or exited non-zero.
    #[error("{category}: state=error failed to list installed items: {reason}")]
    List {
        /// Category being queried.
        category: Category,
        /// Spawn error or the command's diagnostic output.
        reason: String,
    },

    /// The pip bridge did not report its version.
    #[error("pip: state=error failed to probe bridge version: {reason}")]
    BridgeProbe {
        /// Spawn error or the command's diagnostic output.
        reason: String,
    },
}

/// Non-fatal failure tied to a single manifest entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// The entry has no string `name` field.
    #[error("{category}: state=name-error {record}")]
    MissingName {
        /// Category the entry was classified into.
        category: Category,
        /// Rendering of the offending record.
        record: String,
    },

    /// The install command exited non-zero.
    #[error("{category}: name={name} state=install-error {output}")]
    Install {
        /// Category of the entry.
        category: Category,
        /// Name passed to the install command.
        name: String,
        /// Combined output of the install command.
        output: String,
    },
}
