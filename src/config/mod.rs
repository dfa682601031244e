//! Manifest loading: parse, classify, inject implicit dependencies.
pub mod category;
pub mod classify;
pub mod inject;
pub mod manifest;
pub mod validation;

use std::path::{Path, PathBuf};

pub use category::Category;
pub use classify::{Entry, Manifest, Origin};
pub use validation::ValidationWarning;

use crate::error::ConfigError;

/// Default manifest path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "brew.yaml";

/// Fully loaded manifest, ready for reconciliation.
#[derive(Debug)]
pub struct Config {
    /// Path the manifest was read from.
    pub path: PathBuf,
    /// Typed buckets, including injected entries.
    pub manifest: Manifest,
    /// Records that were dropped during classification.
    pub warnings: Vec<ValidationWarning>,
    /// Entries added by the injection rules.
    pub injected: Vec<inject::Injected>,
}

impl Config {
    /// Read and parse the manifest at `path`, classify its records and
    /// apply the injection rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a YAML sequence of mappings.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_content(path, &content)
    }

    /// Build a config from manifest text already in memory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a YAML sequence of
    /// mappings.
    pub fn from_content(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let records = manifest::parse(content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        let (mut manifest, warnings) = classify::classify(&records);
        let injected = inject::inject(&mut manifest);
        Ok(Self {
            path: path.to_path_buf(),
            manifest,
            warnings,
            injected,
        })
    }
}

/// Shared helpers for config unit tests.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub mod test_helpers {
    use std::path::PathBuf;

    /// Write `content` to a temp manifest file and return the directory
    /// guard together with the file path.
    pub fn write_temp_manifest(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("brew.yaml");
        std::fs::write(&path, content).expect("write manifest");
        (dir, path)
    }
}
