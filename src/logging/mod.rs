//! Console and log-file output, plus the task and entry bookkeeping behind
//! the run summary.

mod logger;
mod paths;
mod subscriber;
mod types;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{EntryState, EntryTally, Log, TaskEntry, TaskStatus};

/// Held by tests that change `XDG_CACHE_HOME`.
#[cfg(test)]
pub(crate) static TEST_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// A [`Logger`] whose events land in a log file under a private cache
/// directory, through a subscriber that is the default for the current
/// thread only.
#[cfg(test)]
pub(crate) struct CapturedLog {
    pub(crate) log: Logger,
    _cache: tempfile::TempDir,
    _dispatch: tracing::dispatcher::DefaultGuard,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl CapturedLog {
    pub(crate) fn new() -> Self {
        use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};

        let cache = tempfile::tempdir().expect("temp cache dir");
        let (layer, log) = {
            let _env = TEST_ENV_MUTEX
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            // SAFETY: Protected by TEST_ENV_MUTEX; restored before lock is released.
            #[allow(unsafe_code)]
            unsafe {
                std::env::set_var("XDG_CACHE_HOME", cache.path());
            }
            let pair = (subscriber::FileLayer::new("test"), Logger::new("test"));
            // SAFETY: Protected by TEST_ENV_MUTEX.
            #[allow(unsafe_code)]
            unsafe {
                std::env::remove_var("XDG_CACHE_HOME");
            }
            pair
        };
        let layer = layer.expect("file layer in temp cache dir");
        let dispatch = tracing::Dispatch::new(
            tracing_subscriber::registry().with(layer.with_filter(LevelFilter::DEBUG)),
        );
        Self {
            log,
            _dispatch: tracing::dispatcher::set_default(&dispatch),
            _cache: cache,
        }
    }

    /// Everything written to the log file so far.
    pub(crate) fn contents(&self) -> String {
        let path = self.log.log_path().expect("log path in temp cache dir");
        std::fs::read_to_string(path).expect("read log file")
    }
}
