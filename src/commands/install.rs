//! The `install` command: load the manifest and reconcile it with Homebrew.
use std::sync::Arc;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::exec::SystemExecutor;
use crate::logging::{Log, Logger};
use crate::resources::store::{BrewStore, PackageStore};
use crate::tasks::{self, Context, Task};

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded, the package manager
/// is not on `PATH`, or any task fails.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    log.info(&format!("brewsync {}", super::version()));

    let setup = super::CommandSetup::init(global, log)?;

    let store = BrewStore::new(global.brew.clone(), Arc::new(SystemExecutor));
    if !store.is_available() {
        anyhow::bail!(
            "package manager `{}` not found on PATH (set --brew or BREWSYNC_BREW)",
            store.program()
        );
    }
    log.debug(&format!("using package manager: {}", store.program()));

    reconcile_manifest(setup.config, Arc::new(store), global.dry_run, log)
}

/// Run every install task for `config` against `store`.
///
/// Tasks run in the fixed order of [`tasks::all_install_tasks`]; a failed
/// task never stops the ones after it.
///
/// # Errors
///
/// Returns an error if one or more tasks recorded a failure.
pub fn reconcile_manifest(
    config: Config,
    store: Arc<dyn PackageStore>,
    dry_run: bool,
    log: &Arc<Logger>,
) -> Result<()> {
    let ctx = Context::new(
        Arc::new(config),
        Arc::clone(log) as Arc<dyn Log>,
        store,
        dry_run,
    );

    let all_tasks = tasks::all_install_tasks();
    super::run_tasks_to_completion(all_tasks.iter().map(AsRef::<dyn Task>::as_ref), &ctx, log)
}
