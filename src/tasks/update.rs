//! Package database refresh around the tap step.
use anyhow::Result;

use super::{Context, Task, TaskResult};

/// Refresh the package manager's database.
///
/// Runs once before taps are reconciled and once after, so formulae from
/// newly added taps are visible to the later categories.
#[derive(Debug, Clone, Copy)]
pub struct UpdateDatabase {
    after_taps: bool,
}

impl UpdateDatabase {
    /// The update that runs before any tap is added.
    #[must_use]
    pub const fn before_taps() -> Self {
        Self { after_taps: false }
    }

    /// The update that runs once taps are in place.
    #[must_use]
    pub const fn after_taps() -> Self {
        Self { after_taps: true }
    }
}

impl Task for UpdateDatabase {
    fn name(&self) -> &'static str {
        if self.after_taps {
            "Update package database (after taps)"
        } else {
            "Update package database"
        }
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if ctx.dry_run {
            ctx.log.dry_run("update package database");
            return Ok(TaskResult::DryRun);
        }

        match ctx.store.update() {
            Ok(()) => {
                ctx.log.debug("package database updated");
                Ok(TaskResult::Ok)
            }
            Err(e) => {
                ctx.log.warn(&format!("update failed: {e:#}"));
                Ok(TaskResult::Skipped("update failed".to_string()))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::resources::store::MockPackageStore;
    use crate::tasks::test_helpers::{empty_config, make_context};

    #[test]
    fn names_distinguish_the_two_updates() {
        assert_eq!(UpdateDatabase::before_taps().name(), "Update package database");
        assert_eq!(
            UpdateDatabase::after_taps().name(),
            "Update package database (after taps)"
        );
    }

    #[test]
    fn runs_update_once() {
        let mut store = MockPackageStore::new();
        store.expect_update().times(1).returning(|| Ok(()));
        let (ctx, _log) = make_context(empty_config(), Arc::new(store));
        let result = UpdateDatabase::before_taps().run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::Ok));
    }

    #[test]
    fn update_failure_is_not_fatal() {
        let mut store = MockPackageStore::new();
        store
            .expect_update()
            .times(1)
            .returning(|| Err(anyhow::anyhow!("brew update failed (exit 1)")));
        let (ctx, _log) = make_context(empty_config(), Arc::new(store));
        let result = UpdateDatabase::after_taps().run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::Skipped(ref reason) if reason == "update failed"));
    }

    #[test]
    fn dry_run_does_not_update() {
        let mut store = MockPackageStore::new();
        store.expect_update().never();
        let (ctx, _log) = make_context(empty_config(), Arc::new(store));
        let result = UpdateDatabase::before_taps()
            .run(&ctx.with_dry_run(true))
            .unwrap();
        assert!(matches!(result, TaskResult::DryRun));
    }
}
