//! Location of the per-command log file.
use std::fs;
use std::path::PathBuf;

/// `$XDG_CACHE_HOME/brewsync/<command>.log`, falling back to
/// `$HOME/.cache`. The directory is created on demand; `None` means no
/// usable cache directory exists and file logging is off.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let cache_home = std::env::var_os("XDG_CACHE_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))?;
    let dir = cache_home.join("brewsync");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}
