//! External command execution.
//!
//! Every command runs with the caller's environment plus
//! [`NO_AUTO_UPDATE_ENV`], so the package manager never decides to update
//! itself in the middle of a run.
use anyhow::{Context, Result};
use std::process::{Command, Output};

/// Environment override applied to every spawned command.
pub const NO_AUTO_UPDATE_ENV: (&str, &str) = ("HOMEBREW_NO_AUTO_UPDATE", "1");

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, if the process was not terminated by a signal.
    pub code: Option<i32>,
}

impl ExecResult {
    /// Standard output followed by standard error, for diagnostics.
    #[must_use]
    pub fn combined(&self) -> String {
        match (self.stdout.trim(), self.stderr.trim()) {
            ("", err) => err.to_string(),
            (out, "") => out.to_string(),
            (out, err) => format!("{out}\n{err}"),
        }
    }
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Abstraction over process execution so that callers can be tested
/// without spawning real subprocesses.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run a command to completion and capture its output.
    ///
    /// A non-zero exit is reported through [`ExecResult::success`], not as
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process could not be spawned.
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Check if a program is available on PATH.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let (key, value) = NO_AUTO_UPDATE_ENV;
        // Command inherits the parent environment; env() only layers on top.
        let output = Command::new(program)
            .args(args)
            .env(key, value)
            .output()
            .with_context(|| format!("failed to execute: {program} {}", args.join(" ")))?;
        Ok(ExecResult::from(output))
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn run_unchecked_captures_stdout() {
        let result = SystemExecutor.run_unchecked("echo", &["hello"]).unwrap();
        assert!(result.success, "echo command should succeed");
        assert_eq!(result.stdout.trim(), "hello");
        assert_eq!(result.code, Some(0));
    }

    #[cfg(unix)]
    #[test]
    fn run_unchecked_reports_failure_without_error() {
        let result = SystemExecutor.run_unchecked("false", &[]).unwrap();
        assert!(!result.success, "non-zero exit should set success=false");
    }

    #[cfg(unix)]
    #[test]
    fn run_unchecked_sets_no_auto_update() {
        let result = SystemExecutor
            .run_unchecked("sh", &["-c", "printf %s \"$HOMEBREW_NO_AUTO_UPDATE\""])
            .unwrap();
        assert_eq!(result.stdout, "1");
    }

    #[cfg(unix)]
    #[test]
    fn run_unchecked_forwards_parent_environment() {
        let result = SystemExecutor
            .run_unchecked("sh", &["-c", "printf %s \"$PATH\""])
            .unwrap();
        assert!(!result.stdout.is_empty(), "PATH should be inherited");
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let result = SystemExecutor.run_unchecked("this-program-does-not-exist-12345", &[]);
        assert!(result.is_err());
    }

    #[test]
    fn which_missing_program() {
        assert!(
            !SystemExecutor.which("this-program-does-not-exist-12345"),
            "non-existent program should not be found"
        );
    }

    #[test]
    fn combined_joins_both_streams() {
        let result = ExecResult {
            stdout: "==> Downloading\n".to_string(),
            stderr: "Error: No available formula\n".to_string(),
            success: false,
            code: Some(1),
        };
        assert_eq!(
            result.combined(),
            "==> Downloading\nError: No available formula"
        );
    }

    #[test]
    fn combined_skips_empty_stream() {
        let result = ExecResult {
            stdout: String::new(),
            stderr: "Error: boom\n".to_string(),
            success: false,
            code: Some(1),
        };
        assert_eq!(result.combined(), "Error: boom");
    }
}
