//! Running commands through the host shell.

use std::process::Stdio;

use tokio::process::Command;
use tomcs_common::error::{Result, TomcsError};

#[cfg(unix)]
const SHELL: &str = "sh";
#[cfg(unix)]
const SHELL_FLAG: &str = "-c";
#[cfg(windows)]
const SHELL: &str = "cmd";
#[cfg(windows)]
const SHELL_FLAG: &str = "/C";

/// Output from a shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    /// Standard output from the command.
    pub stdout: String,
    /// Standard error from the command.
    pub stderr: String,
    /// Exit code, or -1 when the process was killed by a signal.
    pub exit_code: i32,
}

impl ExecOutput {
    /// Whether the command exited with status zero.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs `command` with the host shell and collects its output.
///
/// The child gets a null stdin so it can never read keystrokes meant for
/// the canvas, and it is killed if the returned future is dropped.
///
/// # Errors
///
/// Returns an error if the command is empty or the shell cannot be spawned.
pub async fn run_shell(command: &str) -> Result<ExecOutput> {
    if command.trim().is_empty() {
        return Err(TomcsError::Config {
            message: "shell command is empty".into(),
        });
    }
    tracing::trace!(cmd = command, "running shell command");

    let output = Command::new(SHELL)
        .arg(SHELL_FLAG)
        .arg(command)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| TomcsError::Io {
            path: SHELL.into(),
            source: e,
        })?;

    Ok(ExecOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code().unwrap_or(-1),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout_and_exit_code() {
        let output = run_shell("echo hello").await.expect("run");
        assert_eq!(output.stdout, "hello\n");
        assert!(output.success());
    }

    #[tokio::test]
    async fn nonzero_exit_is_not_success() {
        let output = run_shell("echo oops >&2; exit 3").await.expect("run");
        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stderr.trim(), "oops");
        assert!(!output.success());
    }

    #[tokio::test]
    async fn empty_command_is_rejected() {
        assert!(matches!(
            run_shell("   ").await,
            Err(TomcsError::Config { .. })
        ));
    }

    #[tokio::test]
    async fn child_does_not_inherit_stdin() {
        let output = run_shell("cat").await.expect("run");
        assert!(output.success());
        assert!(output.stdout.is_empty());
    }
}
