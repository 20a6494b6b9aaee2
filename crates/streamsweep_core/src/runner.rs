//! Execution of rendered command strings.

use std::process::Command;

use crate::error::RunError;

/// Exit information for one finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
}

impl RunOutcome {
    pub fn success() -> Self {
        Self { exit_code: Some(0) }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Something that can run a shell command line to completion.
pub trait CommandRunner {
    /// Run `command` and block until it exits.
    fn execute(&mut self, command: &str) -> Result<RunOutcome, RunError>;
}

/// Runs commands through `sh -c`, inheriting stdio.
///
/// Output redirection embedded in the command string is handled by the shell.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self { shell: "sh".into() }
    }
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different POSIX shell, e.g. `bash`
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl CommandRunner for ShellRunner {
    fn execute(&mut self, command: &str) -> Result<RunOutcome, RunError> {
        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .status()
            .map_err(RunError::Spawn)?;
        Ok(RunOutcome {
            exit_code: status.code(),
        })
    }
}
