// Shared helpers for integration tests.
//
// Provides a temporary manifest file and an in-memory package store that
// records every command it would have run, so each integration test can
// drive a full install without a real package manager.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use brewsync::config::{Category, Config};
use brewsync::error::{EntryError, QueryError};
use brewsync::logging::Logger;
use brewsync::resources::profile::CategoryProfile;
use brewsync::resources::store::PackageStore;

/// A manifest written to a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct TempManifest {
    dir: tempfile::TempDir,
    path: PathBuf,
}

impl TempManifest {
    /// Write `content` as `brew.yaml` in a fresh temp directory.
    pub fn new(content: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("brew.yaml");
        std::fs::write(&path, content).expect("write manifest");
        Self { dir, path }
    }

    /// Path to the manifest file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the manifest through [`Config::load`].
    pub fn load(&self) -> Config {
        Config::load(&self.path).expect("load manifest")
    }
}

/// An in-memory [`PackageStore`] that records each call as the command
/// line `brew` would have been given.
#[derive(Debug, Default)]
pub struct FakeStore {
    installed: HashMap<Category, Vec<String>>,
    failing: HashSet<String>,
    unlistable: HashSet<Category>,
    bridge_version: Option<String>,
    calls: Mutex<Vec<String>>,
    installs: Mutex<Vec<String>>,
}

impl FakeStore {
    /// A store with nothing installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines the list command prints for `category`.
    pub fn with_installed(mut self, category: Category, lines: &[&str]) -> Self {
        self.installed
            .insert(category, lines.iter().map(|s| (*s).to_string()).collect());
        self
    }

    /// Make installing `name` fail.
    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    /// Make listing `category` fail.
    pub fn unlistable(mut self, category: Category) -> Self {
        self.unlistable.insert(category);
        self
    }

    /// Version string the pip bridge reports.
    pub fn with_bridge_version(mut self, version: &str) -> Self {
        self.bridge_version = Some(version.to_string());
        self
    }

    /// Every command issued so far, e.g. `brew cask install firefox`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Only the install commands issued so far.
    pub fn installs(&self) -> Vec<String> {
        self.installs.lock().expect("installs lock").clone()
    }

    fn record(&self, args: &[&str]) -> String {
        let line = format!("brew {}", args.join(" "));
        self.calls.lock().expect("calls lock").push(line.clone());
        line
    }
}

impl PackageStore for FakeStore {
    fn list(&self, profile: &CategoryProfile) -> Result<HashSet<String>, QueryError> {
        self.record(profile.list_args);
        if self.unlistable.contains(&profile.category) {
            return Err(QueryError::List {
                category: profile.category,
                reason: "exit 1: Error: simulated".to_string(),
            });
        }
        let output = self
            .installed
            .get(&profile.category)
            .map(|lines| lines.join("\n"))
            .unwrap_or_default();
        Ok(profile.filter.apply(&output))
    }

    fn install(&self, profile: &CategoryProfile, name: &str) -> Result<(), EntryError> {
        let line = self.record(&profile.install_command(name));
        self.installs.lock().expect("installs lock").push(line);
        if self.failing.contains(name) {
            return Err(EntryError::Install {
                category: profile.category,
                name: name.to_string(),
                output: format!("Error: No available formula with the name \"{name}\""),
            });
        }
        Ok(())
    }

    fn update(&self) -> anyhow::Result<()> {
        self.record(&["update"]);
        Ok(())
    }

    fn pip_bridge_version(&self) -> Result<String, QueryError> {
        self.record(&["pip", "--version"]);
        Ok(self
            .bridge_version
            .clone()
            .unwrap_or_else(|| "brew pip v1.0.0".to_string()))
    }
}

/// Run every install task for `manifest` against `store`.
pub fn run_install(
    manifest: &str,
    store: &Arc<FakeStore>,
    dry_run: bool,
) -> (anyhow::Result<()>, Arc<Logger>) {
    let config = TempManifest::new(manifest).load();
    let log = Arc::new(Logger::new("integration"));
    let result = brewsync::commands::install::reconcile_manifest(
        config,
        Arc::clone(store) as Arc<dyn PackageStore>,
        dry_run,
        &log,
    );
    (result, log)
}
