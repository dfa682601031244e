//! The package store: the external package manager seen as a capability.
//!
//! Reconciliation only needs four things from the package manager: list
//! what a category has installed, install one item, refresh the package
//! database, and report the pip bridge version. [`PackageStore`] names those
//! operations so tests can substitute a fake; [`BrewStore`] implements them
//! by running the `brew` binary through an [`Executor`].
use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;

use super::profile::{CategoryProfile, PIP_VERSION_ARGS};
use crate::error::{EntryError, QueryError};
use crate::exec::Executor;

/// Operations reconciliation needs from the package manager.
#[cfg_attr(test, mockall::automock)]
pub trait PackageStore: Send + Sync {
    /// Installed identifiers for the profile's category, already normalised
    /// by the profile's filter.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::List`] if the list command cannot be run or
    /// exits non-zero.
    fn list(&self, profile: &CategoryProfile) -> Result<HashSet<String>, QueryError>;

    /// Install a single item.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::Install`] carrying the command's combined
    /// output if it cannot be run or exits non-zero.
    fn install(&self, profile: &CategoryProfile, name: &str) -> Result<(), EntryError>;

    /// Refresh the package database.
    ///
    /// # Errors
    ///
    /// Returns an error if the update command cannot be run or exits
    /// non-zero.
    fn update(&self) -> Result<()>;

    /// Version string reported by the pip bridge.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::BridgeProbe`] if the version command cannot be
    /// run or exits non-zero.
    fn pip_bridge_version(&self) -> Result<String, QueryError>;
}

/// Default package manager binary.
pub const DEFAULT_BREW: &str = "brew";

/// [`PackageStore`] backed by the `brew` command-line tool.
#[derive(Debug, Clone)]
pub struct BrewStore {
    program: String,
    executor: Arc<dyn Executor>,
}

impl BrewStore {
    /// Create a store that runs `program` through `executor`.
    #[must_use]
    pub fn new(program: impl Into<String>, executor: Arc<dyn Executor>) -> Self {
        Self {
            program: program.into(),
            executor,
        }
    }

    /// The package manager binary this store invokes.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether the package manager binary can be found.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.executor.which(&self.program)
    }
}

/// Describe a failed command for diagnostics.
fn failure_reason(code: Option<i32>, output: &str) -> String {
    let code = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
    if output.is_empty() {
        format!("exit {code}")
    } else {
        format!("exit {code}: {output}")
    }
}

impl PackageStore for BrewStore {
    fn list(&self, profile: &CategoryProfile) -> Result<HashSet<String>, QueryError> {
        let query_error = |reason: String| QueryError::List {
            category: profile.category,
            reason,
        };
        let result = self
            .executor
            .run_unchecked(&self.program, profile.list_args)
            .map_err(|e| query_error(format!("{e:#}")))?;
        if !result.success {
            return Err(query_error(failure_reason(result.code, &result.combined())));
        }
        Ok(profile.filter.apply(&result.stdout))
    }

    fn install(&self, profile: &CategoryProfile, name: &str) -> Result<(), EntryError> {
        let install_error = |output: String| EntryError::Install {
            category: profile.category,
            name: name.to_string(),
            output,
        };
        let args = profile.install_command(name);
        let result = self
            .executor
            .run_unchecked(&self.program, &args)
            .map_err(|e| install_error(format!("{e:#}")))?;
        if result.success {
            Ok(())
        } else {
            Err(install_error(result.combined()))
        }
    }

    fn update(&self) -> Result<()> {
        let result = self.executor.run_unchecked(&self.program, &["update"])?;
        if !result.success {
            anyhow::bail!(
                "{} update failed ({})",
                self.program,
                failure_reason(result.code, &result.combined())
            );
        }
        Ok(())
    }

    fn pip_bridge_version(&self) -> Result<String, QueryError> {
        let probe_error = |reason: String| QueryError::BridgeProbe { reason };
        let result = self
            .executor
            .run_unchecked(&self.program, PIP_VERSION_ARGS)
            .map_err(|e| probe_error(format!("{e:#}")))?;
        if !result.success {
            return Err(probe_error(failure_reason(result.code, &result.combined())));
        }
        Ok(result.stdout)
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::config::Category;
    use crate::resources::profile::PipBridge;
    use crate::resources::test_helpers::{MockExecutor, RecordingExecutor};

    fn store(executor: Arc<dyn Executor>) -> BrewStore {
        BrewStore::new(DEFAULT_BREW, executor)
    }

    #[test]
    fn list_runs_profile_list_args() {
        let executor = Arc::new(RecordingExecutor::with_stdout("wget\njq\n"));
        let installed = store(executor.clone())
            .list(&CategoryProfile::for_category(Category::Formula))
            .unwrap();
        assert_eq!(installed.len(), 2);
        assert_eq!(
            executor.recorded_calls(),
            vec![("brew".to_string(), vec!["list".to_string()])]
        );
    }

    #[test]
    fn list_applies_profile_filter() {
        let executor = Arc::new(MockExecutor::ok("python\npip-requests\nbrew-pip\n"));
        let installed = store(executor)
            .list(&PipBridge::Legacy.profile())
            .unwrap();
        assert_eq!(installed, HashSet::from(["requests".to_string()]));
    }

    #[test]
    fn list_failure_is_query_error_for_category() {
        let executor = Arc::new(MockExecutor::fail());
        let err = store(executor)
            .list(&CategoryProfile::for_category(Category::Cask))
            .unwrap_err();
        assert!(matches!(
            err,
            QueryError::List {
                category: Category::Cask,
                ..
            }
        ));
    }

    #[test]
    fn list_spawn_failure_is_query_error() {
        let executor = Arc::new(MockExecutor::with_responses(vec![]).spawn_error());
        let err = store(executor)
            .list(&CategoryProfile::for_category(Category::Tap))
            .unwrap_err();
        assert!(err.to_string().contains("tap: state=error"));
    }

    #[test]
    fn install_appends_name_to_install_args() {
        let executor = Arc::new(RecordingExecutor::with_stdout(""));
        store(executor.clone())
            .install(&CategoryProfile::for_category(Category::Cask), "firefox")
            .unwrap();
        let calls = executor.recorded_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "brew");
        assert_eq!(calls[0].1, vec!["cask", "install", "firefox"]);
    }

    #[test]
    fn install_failure_carries_combined_output() {
        let executor = Arc::new(MockExecutor::with_output(
            false,
            "==> Searching\n",
            "Error: No available formula with the name \"nope\"\n",
        ));
        let err = store(executor)
            .install(&CategoryProfile::for_category(Category::Formula), "nope")
            .unwrap_err();
        let EntryError::Install {
            category,
            name,
            output,
        } = err
        else {
            panic!("expected install error");
        };
        assert_eq!(category, Category::Formula);
        assert_eq!(name, "nope");
        assert!(output.contains("==> Searching"));
        assert!(output.contains("No available formula"));
    }

    #[test]
    fn update_runs_brew_update() {
        let executor = Arc::new(RecordingExecutor::with_stdout("Already up-to-date.\n"));
        store(executor.clone()).update().unwrap();
        assert_eq!(
            executor.recorded_calls(),
            vec![("brew".to_string(), vec!["update".to_string()])]
        );
    }

    #[test]
    fn update_failure_is_error() {
        let executor = Arc::new(MockExecutor::fail());
        assert!(store(executor).update().is_err());
    }

    #[test]
    fn pip_bridge_version_returns_stdout() {
        let executor = Arc::new(MockExecutor::ok("brew pip v0.4.3\n"));
        let version = store(executor).pip_bridge_version().unwrap();
        assert_eq!(PipBridge::from_version(&version), PipBridge::Legacy);
    }

    #[test]
    fn pip_bridge_probe_failure_is_query_error() {
        let executor = Arc::new(MockExecutor::fail());
        let err = store(executor).pip_bridge_version().unwrap_err();
        assert!(matches!(err, QueryError::BridgeProbe { .. }));
    }

    #[test]
    fn custom_program_is_used() {
        let executor = Arc::new(RecordingExecutor::with_stdout(""));
        let store = BrewStore::new("/opt/homebrew/bin/brew", executor.clone());
        store.update().unwrap();
        assert_eq!(store.program(), "/opt/homebrew/bin/brew");
        assert_eq!(executor.recorded_calls()[0].0, "/opt/homebrew/bin/brew");
    }

    #[test]
    fn is_available_delegates_to_which() {
        let executor = Arc::new(MockExecutor::ok("").with_which(true));
        assert!(store(executor).is_available());
        let executor = Arc::new(MockExecutor::ok(""));
        assert!(!store(executor).is_available());
    }
}
