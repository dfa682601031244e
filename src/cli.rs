//! Command-line parsing.
use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;
use crate::resources::store::DEFAULT_BREW;

/// Top-level CLI entry point for brewsync.
#[derive(Parser, Debug)]
#[command(
    name = "brewsync",
    about = "Install the packages listed in a YAML manifest with Homebrew",
    version
)]
pub struct Cli {
    /// Subcommand to run (default: install)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

impl Cli {
    /// The subcommand to run, defaulting to [`Command::Install`].
    #[must_use]
    pub fn subcommand(&self) -> Command {
        self.command.unwrap_or(Command::Install)
    }
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Path to the package manifest
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Report what would be installed without installing or updating
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Package manager binary
    #[arg(long, global = true, env = "BREWSYNC_BREW", default_value = DEFAULT_BREW)]
    pub brew: String,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Install every missing manifest entry
    Install,
    /// Validate the manifest without running the package manager
    Check,
    /// Print version information
    Version,
}

impl Command {
    /// Name used for this command's log file.
    #[must_use]
    pub const fn log_name(self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Check => "check",
            Self::Version => "version",
        }
    }
}

/// Rewrite the single-dash `-config <path>` and `-config=<path>` spellings
/// to `--config`.
///
/// Without this, clap would read `-config` as `-c onfig`.
pub fn normalize_legacy_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if arg == "-config" {
                return OsString::from("--config");
            }
            match arg.to_str().and_then(|s| s.strip_prefix("-config=")) {
                Some(path) => OsString::from(format!("--config={path}")),
                None => arg,
            }
        })
        .collect()
}

/// Parse the process arguments, accepting the legacy `-config` spelling.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse_from(normalize_legacy_args(std::env::args_os()))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse_args(args: &[&str]) -> Cli {
        Cli::parse_from(normalize_legacy_args(args.iter().copied()))
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_install_with_brew_yaml() {
        let cli = parse_args(&["brewsync"]);
        assert_eq!(cli.subcommand(), Command::Install);
        assert_eq!(cli.global.config, PathBuf::from("brew.yaml"));
        assert!(!cli.global.dry_run);
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_config_long_and_short() {
        let cli = parse_args(&["brewsync", "--config", "a.yaml"]);
        assert_eq!(cli.global.config, PathBuf::from("a.yaml"));
        let cli = parse_args(&["brewsync", "-c", "b.yaml", "check"]);
        assert_eq!(cli.global.config, PathBuf::from("b.yaml"));
        assert_eq!(cli.subcommand(), Command::Check);
    }

    #[test]
    fn parse_legacy_single_dash_config() {
        let cli = parse_args(&["brewsync", "-config", "legacy.yaml"]);
        assert_eq!(cli.global.config, PathBuf::from("legacy.yaml"));
        let cli = parse_args(&["brewsync", "-config=other.yaml"]);
        assert_eq!(cli.global.config, PathBuf::from("other.yaml"));
    }

    #[test]
    fn normalize_leaves_other_args_alone() {
        let args = normalize_legacy_args(["brewsync", "-d", "--config", "x.yaml", "-configure"]);
        assert_eq!(args, ["brewsync", "-d", "--config", "x.yaml", "-configure"]);
    }

    #[test]
    fn parse_dry_run_short() {
        let cli = parse_args(&["brewsync", "-d", "install"]);
        assert!(cli.global.dry_run);
        assert_eq!(cli.subcommand(), Command::Install);
    }

    #[test]
    fn parse_verbose_after_subcommand() {
        let cli = parse_args(&["brewsync", "check", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_brew_override() {
        let cli = parse_args(&["brewsync", "--brew", "/opt/homebrew/bin/brew"]);
        assert_eq!(cli.global.brew, "/opt/homebrew/bin/brew");
    }

    #[test]
    fn parse_version() {
        let cli = parse_args(&["brewsync", "version"]);
        assert_eq!(cli.subcommand(), Command::Version);
    }

    #[test]
    fn log_names_are_distinct() {
        assert_eq!(Command::Install.log_name(), "install");
        assert_eq!(Command::Check.log_name(), "check");
    }
}
