//! What the logger records: task outcomes, per-entry reconcile states and
//! the [`Log`] trait tasks write through.
use std::fmt;

use crate::config::Category;

/// How a task ended, as shown in the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Every entry was present or got installed.
    Ok,
    /// The task's manifest bucket is empty.
    NotApplicable,
    /// The task gave up without failing the run (e.g. `brew update`).
    Skipped,
    /// Dry run: the task only queried.
    DryRun,
    /// A query, name or install error was recorded.
    Failed,
}

impl TaskStatus {
    /// Word used for this status in the summary totals line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::NotApplicable => "n/a",
            Self::Skipped => "skipped",
            Self::DryRun => "dry-run",
            Self::Failed => "failed",
        }
    }

    pub(super) const fn icon(self) -> &'static str {
        match self {
            Self::Ok => "✓",
            Self::NotApplicable => "·",
            Self::Skipped => "○",
            Self::DryRun => "~",
            Self::Failed => "✗",
        }
    }
}

/// One finished task, kept for the summary.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Task name, e.g. `Install casks`.
    pub name: String,
    /// How the task ended.
    pub status: TaskStatus,
    /// Skip reason or failure description.
    pub message: Option<String>,
}

/// What happened to a single manifest entry.
///
/// # Examples
///
/// ```
/// use brewsync::logging::EntryState;
///
/// assert_eq!(EntryState::InstallError.to_string(), "install-error");
/// assert!(EntryState::NameError.is_failure());
/// assert!(!EntryState::Present.is_failure());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Already in the installed set.
    Present,
    /// Installed during this run.
    Installed,
    /// Missing, and left alone because of `--dry-run`.
    WouldInstall,
    /// Appended to the manifest as an implicit dependency.
    Injected,
    /// The record has no usable `name`.
    NameError,
    /// The install command failed.
    InstallError,
}

impl EntryState {
    /// The `state=` value written in log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Installed => "installed",
            Self::WouldInstall => "would-install",
            Self::Injected => "injected",
            Self::NameError => "name-error",
            Self::InstallError => "install-error",
        }
    }

    /// Return `true` for the states that fail their category.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::NameError | Self::InstallError)
    }
}

impl fmt::Display for EntryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry states seen for one category during a run.
///
/// # Examples
///
/// ```
/// use brewsync::logging::{EntryState, EntryTally};
///
/// let mut tally = EntryTally::default();
/// tally.add(EntryState::Present);
/// tally.add(EntryState::Installed);
/// tally.add(EntryState::InstallError);
/// assert_eq!(tally.to_string(), "1 installed, 1 present, 1 failed");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryTally {
    /// Entries already installed.
    pub present: u32,
    /// Entries installed this run.
    pub installed: u32,
    /// Entries a dry run skipped.
    pub would_install: u32,
    /// Entries appended by dependency injection.
    pub injected: u32,
    /// Name and install errors.
    pub failed: u32,
}

impl EntryTally {
    /// Count one entry in `state`.
    pub const fn add(&mut self, state: EntryState) {
        let slot = match state {
            EntryState::Present => &mut self.present,
            EntryState::Installed => &mut self.installed,
            EntryState::WouldInstall => &mut self.would_install,
            EntryState::Injected => &mut self.injected,
            EntryState::NameError | EntryState::InstallError => &mut self.failed,
        };
        *slot += 1;
    }
}

impl fmt::Display for EntryTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            (self.installed, "installed"),
            (self.would_install, "would install"),
            (self.present, "present"),
            (self.failed, "failed"),
        ];
        let mut first = true;
        for (count, what) in parts {
            if count == 0 {
                continue;
            }
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{count} {what}")?;
            first = false;
        }
        if first {
            f.write_str("nothing reconciled")?;
        }
        if self.injected > 0 {
            write!(f, " ({} injected)", self.injected)?;
        }
        Ok(())
    }
}

/// Sink for everything a task reports, so tasks never depend on where
/// output ends up.
pub trait Log: Send + Sync {
    /// Start a major section.
    fn stage(&self, msg: &str);
    /// Progress visible on the console.
    fn info(&self, msg: &str);
    /// Detail shown on the console only with `--verbose`.
    fn debug(&self, msg: &str);
    /// Something the user should fix that does not fail the run.
    fn warn(&self, msg: &str);
    /// A failure.
    fn error(&self, msg: &str);
    /// An action skipped because of `--dry-run`.
    fn dry_run(&self, msg: &str);
    /// Report the state of one manifest entry. `name` is `None` for
    /// records without one; `detail` carries the record or the install
    /// output and may be empty.
    fn entry(&self, category: Category, name: Option<&str>, state: EntryState, detail: &str);
    /// Remember how a task ended for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}
