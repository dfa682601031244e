//! Shared state handed to every task.
use std::sync::Arc;

use crate::config::Config;
use crate::logging::Log;
use crate::resources::store::PackageStore;

/// Shared context for task execution.
pub struct Context {
    /// Loaded manifest with injected entries.
    pub config: Arc<Config>,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Package manager the tasks reconcile against.
    pub store: Arc<dyn PackageStore>,
    /// Whether to perform a dry run (query only, install nothing).
    pub dry_run: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config.path)
            .field("log", &"<dyn Log>")
            .field("store", &"<dyn PackageStore>")
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Context {
    /// Creates a new context for task execution.
    #[must_use]
    pub const fn new(
        config: Arc<Config>,
        log: Arc<dyn Log>,
        store: Arc<dyn PackageStore>,
        dry_run: bool,
    ) -> Self {
        Self {
            config,
            log,
            store,
            dry_run,
        }
    }

    /// Return a copy of this context with dry-run mode set to `dry_run`.
    #[must_use]
    pub fn with_dry_run(&self, dry_run: bool) -> Self {
        Self {
            config: Arc::clone(&self.config),
            log: Arc::clone(&self.log),
            store: Arc::clone(&self.store),
            dry_run,
        }
    }
}
