//! The [`Logger`]: emits every message as a [`tracing`] event and keeps
//! the task outcomes and per-category entry tallies for the run summary.
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use super::paths::log_file_path;
use super::subscriber::{DRY_RUN, ENTRY, STAGE, SUMMARY};
use super::types::{EntryState, EntryTally, Log, TaskEntry, TaskStatus};
use crate::config::Category;

/// Run logger for one command.
///
/// Output goes through [`tracing`]; [`init_subscriber`](super::init_subscriber)
/// decides how it is rendered. What the summary needs is kept here: one
/// [`TaskEntry`] per executed task and an [`EntryTally`] per category that
/// reported entries.
#[derive(Debug)]
pub struct Logger {
    tasks: Mutex<Vec<TaskEntry>>,
    tallies: Mutex<BTreeMap<Category, EntryTally>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Logger for `command`, remembering where the file layer writes so
    /// the summary can point at it.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            tallies: Mutex::new(BTreeMap::new()),
            log_file: log_file_path(command),
        }
    }

    /// Path of this command's log file, when one could be created.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Tasks recorded so far, in execution order.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.tasks.lock().map_or_else(|_| Vec::new(), |g| g.clone())
    }

    /// Entry counts reported for `category`; all zero if it reported none.
    #[must_use]
    pub fn tally(&self, category: Category) -> EntryTally {
        self.tallies
            .lock()
            .ok()
            .and_then(|g| g.get(&category).copied())
            .unwrap_or_default()
    }

    /// Number of tasks recorded as [`TaskStatus::Failed`].
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.task_entries()
            .iter()
            .filter(|t| t.status == TaskStatus::Failed)
            .count()
    }

    /// Log the run summary: one line per task, entry counts per category,
    /// totals by status and the log file location.
    pub fn print_summary(&self) {
        let tasks = self.task_entries();
        if tasks.is_empty() {
            return;
        }

        self.stage("Summary");

        let statuses = [
            TaskStatus::Ok,
            TaskStatus::NotApplicable,
            TaskStatus::Skipped,
            TaskStatus::DryRun,
            TaskStatus::Failed,
        ];
        let mut counts = [0usize; 5];
        for task in &tasks {
            if let Some(slot) = statuses
                .iter()
                .position(|s| *s == task.status)
                .and_then(|i| counts.get_mut(i))
            {
                *slot += 1;
            }
            let line = task
                .message
                .as_ref()
                .map_or_else(|| task.name.clone(), |msg| format!("{} ({msg})", task.name));
            tracing::info!(
                target: SUMMARY,
                icon = task.status.icon(),
                status = task.status.label(),
                "{line}"
            );
        }

        let tallies = self
            .tallies
            .lock()
            .map_or_else(|_| BTreeMap::new(), |g| g.clone());
        for (category, tally) in &tallies {
            self.info(&format!("{category}: {tally}"));
        }

        let totals = statuses
            .iter()
            .zip(counts)
            .map(|(status, n)| format!("{n} {}", status.label()))
            .collect::<Vec<_>>()
            .join(", ");
        self.info(&format!("{} tasks: {totals}", tasks.len()));

        if let Some(path) = &self.log_file {
            self.info(&format!("log: {}", path.display()));
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN, "{msg}");
    }

    fn entry(&self, category: Category, name: Option<&str>, state: EntryState, detail: &str) {
        if let Ok(mut tallies) = self.tallies.lock() {
            tallies.entry(category).or_default().add(state);
        }
        let name = name.unwrap_or_default();
        let label = state.as_str();
        match state {
            EntryState::NameError | EntryState::InstallError => {
                tracing::error!(target: ENTRY, %category, name, state = label, detail);
            }
            EntryState::Present | EntryState::Injected => {
                tracing::debug!(target: ENTRY, %category, name, state = label, detail);
            }
            EntryState::Installed | EntryState::WouldInstall => {
                tracing::info!(target: ENTRY, %category, name, state = label, detail);
            }
        }
    }

    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.tasks.lock() {
            guard.push(TaskEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }
}
