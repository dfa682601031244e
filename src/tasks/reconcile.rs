//! The per-category reconciliation loop.
//!
//! One pass lists what the package manager already has for a category,
//! then walks the manifest entries in declaration order and installs
//! whatever is missing. Failures are collected per entry; nothing here
//! aborts the run.
use crate::config::{Category, Entry};
use crate::error::{EntryError, QueryError};
use crate::logging::{EntryState, Log};
use crate::resources::ResourceState;
use crate::resources::package::PackageResource;
use crate::resources::profile::CategoryProfile;
use crate::resources::store::PackageStore;

/// Outcome of reconciling one category.
///
/// # Examples
///
/// ```
/// use brewsync::config::Category;
/// use brewsync::tasks::CategoryReport;
///
/// let mut report = CategoryReport::new(Category::Formula);
/// report.present = 4;
/// report.installed = 1;
///
/// assert!(!report.has_errors());
/// assert_eq!(report.summary(false), "1 installed, 4 already present");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    /// Category this report covers.
    pub category: Category,
    /// Entries already in the installed set.
    pub present: u32,
    /// Entries installed during this run.
    pub installed: u32,
    /// Entries a dry run would have installed.
    pub would_install: u32,
    /// Set when the installed set could not be determined.
    pub query_error: Option<QueryError>,
    /// Per-entry failures, in manifest order.
    pub errors: Vec<EntryError>,
}

impl CategoryReport {
    /// Create an empty report for `category`.
    #[must_use]
    pub const fn new(category: Category) -> Self {
        Self {
            category,
            present: 0,
            installed: 0,
            would_install: 0,
            query_error: None,
            errors: Vec::new(),
        }
    }

    /// Return `true` if the query failed or any entry failed.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.query_error.is_some() || !self.errors.is_empty()
    }

    /// Format the counters, e.g. `2 installed, 10 already present, 1 failed`.
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let mut out = if dry_run {
            format!(
                "{} would install, {} already present",
                self.would_install, self.present
            )
        } else {
            format!("{} installed, {} already present", self.installed, self.present)
        };
        if !self.errors.is_empty() {
            out.push_str(&format!(", {} failed", self.errors.len()));
        }
        out
    }

    /// Short description of what went wrong, for the run summary.
    #[must_use]
    pub fn failure_message(&self) -> Option<String> {
        if let Some(err) = &self.query_error {
            return Some(err.to_string());
        }
        let names = self
            .errors
            .iter()
            .filter(|e| matches!(e, EntryError::MissingName { .. }))
            .count();
        let installs = self.errors.len() - names;
        match (names, installs) {
            (0, 0) => None,
            (0, n) => Some(format!("{n} install error(s)")),
            (n, 0) => Some(format!("{n} entry name error(s)")),
            (n, m) => Some(format!("{n} entry name error(s), {m} install error(s)")),
        }
    }
}

/// Reconcile `entries` against the installed set reported by `store`.
///
/// An empty `entries` slice returns immediately without touching the
/// store. A failed listing aborts this category only and is returned in
/// [`CategoryReport::query_error`]. Each entry is then handled in order:
/// a missing name is recorded as [`EntryError::MissingName`], a name in
/// the installed set is left alone, and any other name gets exactly one
/// install call (none when `dry_run`).
pub fn reconcile(
    store: &dyn PackageStore,
    log: &dyn Log,
    entries: &[Entry],
    profile: &CategoryProfile,
    dry_run: bool,
) -> CategoryReport {
    let category = profile.category;
    let mut report = CategoryReport::new(category);

    if entries.is_empty() {
        return report;
    }

    log.debug(&format!(
        "{category}: listing installed items ({} entries to check)",
        entries.len()
    ));
    let installed = match store.list(profile) {
        Ok(installed) => installed,
        Err(err) => {
            log.error(&err.to_string());
            report.query_error = Some(err);
            return report;
        }
    };
    log.debug(&format!("{category}: {} items installed", installed.len()));

    for entry in entries {
        let Some(name) = entry.name.as_deref() else {
            let record = entry.describe();
            log.entry(category, None, EntryState::NameError, &record);
            report.errors.push(EntryError::MissingName { category, record });
            continue;
        };

        let resource = PackageResource::new(name, profile, store);
        if resource.state_from_installed(&installed) == ResourceState::Correct {
            log.entry(category, Some(name), EntryState::Present, "");
            report.present += 1;
            continue;
        }

        if dry_run {
            log.entry(category, Some(name), EntryState::WouldInstall, "");
            report.would_install += 1;
            continue;
        }

        match resource.apply() {
            Ok(()) => {
                log.entry(category, Some(name), EntryState::Installed, "");
                report.installed += 1;
            }
            Err(err) => {
                let output = match &err {
                    EntryError::Install { output, .. } => output.as_str(),
                    EntryError::MissingName { .. } => "",
                };
                log.entry(category, Some(name), EntryState::InstallError, output);
                report.errors.push(err);
            }
        }
    }

    report
}
