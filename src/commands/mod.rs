//! Top-level subcommand orchestration.
pub mod check;
pub mod install;
pub mod version;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::{Category, Config};
use crate::logging::{EntryState, Log, Logger};
use crate::tasks::{self, Context, Task};

/// Shared state produced by the common command setup sequence.
///
/// Loads the manifest and reports what classification and injection did,
/// so each command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// The loaded manifest.
    pub config: Config,
}

impl CommandSetup {
    /// Load the manifest named by `--config` and log its warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read or parsed.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        log.stage("Loading manifest");
        let config = Config::load(&global.config)?;

        for category in Category::ALL {
            log.debug(&format!(
                "{} {category} entries",
                config.manifest.bucket(category).len()
            ));
        }
        for injected in &config.injected {
            log.entry(
                injected.category,
                Some(&injected.name),
                EntryState::Injected,
                &format!("(required by {})", injected.required_by),
            );
        }
        log.info(&format!(
            "loaded {} entries from {} ({} injected)",
            config.manifest.len(),
            config.path.display(),
            config.injected.len()
        ));

        if !config.warnings.is_empty() {
            log.warn(&format!(
                "found {} manifest warning(s):",
                config.warnings.len()
            ));
            for warning in &config.warnings {
                log.warn(&format!("  {warning}"));
            }
        }

        Ok(Self { config })
    }
}

/// Execute every task in order, print the summary, and bail if any task failed.
///
/// # Errors
///
/// Returns an error if one or more tasks recorded a failure.
pub fn run_tasks_to_completion<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
    log: &Logger,
) -> Result<()> {
    for task in tasks {
        tasks::execute(task, ctx);
    }

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} task(s) failed");
    }
    Ok(())
}

/// Version string baked in at build time.
#[must_use]
pub const fn version() -> &'static str {
    match option_env!("BREWSYNC_VERSION") {
        Some(version) => version,
        None => env!("CARGO_PKG_VERSION"),
    }
}
