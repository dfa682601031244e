//! Named tasks that reconcile the manifest, run in a fixed order.
mod context;
pub mod packages;
pub mod reconcile;
pub mod update;

pub use context::Context;
pub use reconcile::{CategoryReport, reconcile};

use anyhow::Result;

use crate::config::Category;
use crate::logging::TaskStatus;

/// Result of a single task execution.
///
/// # Examples
///
/// ```
/// use brewsync::tasks::TaskResult;
///
/// let ok = TaskResult::Ok;
/// let skipped = TaskResult::Skipped("update failed".into());
/// let dry = TaskResult::DryRun;
///
/// assert!(matches!(ok, TaskResult::Ok));
/// assert!(matches!(skipped, TaskResult::Skipped(_)));
/// assert!(matches!(dry, TaskResult::DryRun));
/// ```
#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task was skipped, with the reason.
    Skipped(String),
    /// Task ran in dry-run mode.
    DryRun,
}

/// A named, executable task.
pub trait Task: Send + Sync {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task has anything to do for the loaded manifest.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task recorded any failure, such as a
    /// category whose installed set could not be listed or an entry that
    /// failed to install.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// The complete set of tasks run by the install command, in run order.
#[must_use]
pub fn all_install_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(update::UpdateDatabase::before_taps()),
        Box::new(packages::InstallCategory::new(Category::Tap)),
        Box::new(update::UpdateDatabase::after_taps()),
        Box::new(packages::InstallCategory::new(Category::Cask)),
        Box::new(packages::InstallCategory::new(Category::Formula)),
        Box::new(packages::InstallCategory::new(Category::Pip)),
        Box::new(packages::InstallCategory::new(Category::Gem)),
    ]
}

/// Execute a task, recording the result in the logger.
pub fn execute(task: &dyn Task, ctx: &Context) {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return;
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
        }
    }
}

/// Shared helpers for task unit tests.
///
/// Provides factory functions so each task test module does not have to
/// duplicate boilerplate.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub mod test_helpers {
    use std::path::Path;
    use std::sync::Arc;

    use crate::config::Config;
    use crate::logging::{Log, Logger};
    use crate::resources::store::PackageStore;

    use super::Context;

    /// Build a [`Config`] with every bucket empty.
    #[must_use]
    pub fn empty_config() -> Config {
        config_from("")
    }

    /// Build a [`Config`] from manifest text.
    #[must_use]
    pub fn config_from(content: &str) -> Config {
        Config::from_content(Path::new("brew.yaml"), content).expect("valid test manifest")
    }

    /// Build a [`Context`] over `store`, also returning the [`Logger`] so
    /// tests can inspect recorded task state.
    #[must_use]
    pub fn make_context(config: Config, store: Arc<dyn PackageStore>) -> (Context, Arc<Logger>) {
        let log = Arc::new(Logger::new("test"));
        let ctx = Context::new(
            Arc::new(config),
            Arc::clone(&log) as Arc<dyn Log>,
            store,
            false,
        );
        (ctx, log)
    }
}
