//! Running external build commands with captured output

use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// Outcome of a command that was started
///
/// A failed exit is a normal result here; only a command that could not be
/// started at all is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandResult {
    pub fn succeeded(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    pub fn failed(stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            success: false,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

/// Capability of running one external command to completion
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run `command` in `cwd` and wait for it. `Err` means it never started.
    async fn run(&self, command: &str, cwd: &Path) -> io::Result<CommandResult>;
}

/// Runs command strings through the platform shell
///
/// No timeout is applied: a command that hangs blocks the caller.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: PathBuf,
    flag: &'static str,
}

impl Default for ShellRunner {
    fn default() -> Self {
        if cfg!(windows) {
            Self::with_shell("cmd", "/C")
        } else {
            Self::with_shell("sh", "-c")
        }
    }
}

impl ShellRunner {
    /// Use a specific shell binary and its "run this string" flag
    pub fn with_shell(shell: impl Into<PathBuf>, flag: &'static str) -> Self {
        Self {
            shell: shell.into(),
            flag,
        }
    }
}

impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str, cwd: &Path) -> io::Result<CommandResult> {
        tracing::debug!(command, cwd = %cwd.display(), "running command");

        let output = TokioCommand::new(&self.shell)
            .arg(self.flag)
            .arg(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        tracing::debug!(command, status = %output.status, "command finished");

        Ok(CommandResult {
            success: output.status.success(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_captures_separate_streams() {
        let dir = tempfile::tempdir().unwrap();
        let result = ShellRunner::default()
            .run("echo out; echo err 1>&2", dir.path())
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.stdout, b"out\n");
        assert_eq!(result.stderr, b"err\n");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ShellRunner::default()
            .run("echo 'disk full' 1>&2; exit 3", dir.path())
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.stderr, b"disk full\n");
    }

    #[tokio::test]
    async fn test_runs_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "here").unwrap();

        let result = ShellRunner::default()
            .run("cat marker.txt", dir.path())
            .await
            .unwrap();

        assert_eq!(result.stdout, b"here");
    }

    #[tokio::test]
    async fn test_missing_shell_is_a_launch_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShellRunner::with_shell("/nonexistent/shell", "-c")
            .run("true", dir.path())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
