//! Per-category install tasks.
use anyhow::Result;

use super::reconcile::{CategoryReport, reconcile};
use super::{Context, Task, TaskResult};
use crate::config::Category;
use crate::resources::profile::{CategoryProfile, PipBridge};

/// Select the command profile for `category`.
///
/// Pip asks the store which bridge release is installed first; every
/// other category has a fixed profile.
fn select_profile(ctx: &Context, category: Category) -> Result<CategoryProfile, CategoryReport> {
    if category != Category::Pip {
        return Ok(CategoryProfile::for_category(category));
    }
    match ctx.store.pip_bridge_version() {
        Ok(version) => {
            let bridge = PipBridge::from_version(&version);
            ctx.log
                .debug(&format!("pip bridge {} selects {bridge} profile", version.trim()));
            Ok(bridge.profile())
        }
        Err(err) => {
            ctx.log.error(&err.to_string());
            let mut report = CategoryReport::new(category);
            report.query_error = Some(err);
            Err(report)
        }
    }
}

/// Log the report and turn it into a task result.
fn finish(ctx: &Context, report: &CategoryReport) -> Result<TaskResult> {
    if report.query_error.is_none() {
        ctx.log.info(&report.summary(ctx.dry_run));
    }
    if let Some(message) = report.failure_message() {
        anyhow::bail!("{message}");
    }
    if ctx.dry_run {
        Ok(TaskResult::DryRun)
    } else {
        Ok(TaskResult::Ok)
    }
}

/// Install every missing entry of one manifest bucket.
#[derive(Debug, Clone, Copy)]
pub struct InstallCategory {
    category: Category,
}

impl InstallCategory {
    /// Create the install task for `category`.
    #[must_use]
    pub const fn new(category: Category) -> Self {
        Self { category }
    }
}

impl Task for InstallCategory {
    fn name(&self) -> &'static str {
        match self.category {
            Category::Tap => "Install taps",
            Category::Cask => "Install casks",
            Category::Formula => "Install formulae",
            Category::Pip => "Install pip packages",
            Category::Gem => "Install gem packages",
        }
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.manifest.bucket(self.category).is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let entries = ctx.config.manifest.bucket(self.category);
        let profile = match select_profile(ctx, self.category) {
            Ok(profile) => profile,
            Err(report) => return finish(ctx, &report),
        };
        let report = reconcile(
            ctx.store.as_ref(),
            ctx.log.as_ref(),
            entries,
            &profile,
            ctx.dry_run,
        );
        finish(ctx, &report)
    }
}
