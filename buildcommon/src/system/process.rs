use crate::prelude::*;

use std::ffi::{OsStr, OsString};
use std::process::{ExitStatus, Stdio};

use super::Error;

/// Convenience wrapper around `Command` for
/// building a child process
pub struct Command {
    executable: OsString,
    command: std::process::Command,
}

impl Command {
    pub fn new(executable: impl AsRef<OsStr>) -> Self {
        Self {
            executable: executable.as_ref().to_os_string(),
            command: std::process::Command::new(executable),
        }
    }

    /// Set args as in `Command`
    #[inline]
    pub fn args(mut self, args: impl IntoIterator<Item = impl AsRef<OsStr>>) -> Self {
        self.command.args(args);
        self
    }

    /// Set stdout to pipe
    #[inline]
    pub fn pipe_stdout(mut self) -> Self {
        self.command.stdout(Stdio::piped());
        self
    }

    /// Set stderr to pipe
    #[inline]
    pub fn pipe_stderr(mut self) -> Self {
        self.command.stderr(Stdio::piped());
        self
    }

    /// Set stdout and stderr to pipe
    #[inline]
    pub fn piped(self) -> Self {
        self.pipe_stdout().pipe_stderr()
    }

    pub fn spawn(mut self) -> Result<Spawned, Error> {
        verboseln!("running {}", self.get_command_string());
        let child = self
            .command
            .stdin(Stdio::null())
            .spawn()
            .change_context_lazy(|| Error::Spawn(self.executable.to_string_lossy().to_string()))?;

        Ok(Spawned {
            command: self,
            child,
        })
    }

    /// Get a string representation of the command for debugging purposes
    pub fn get_command_string(&self) -> String {
        get_command_string(&self.executable, &self.command)
    }
}

/// Handle for a spawned child command
pub struct Spawned {
    command: Command,
    child: std::process::Child,
}

impl Spawned {
    /// Get a string representation of the command for debugging purposes
    pub fn get_command_string(&self) -> String {
        self.command.get_command_string()
    }

    /// Wait for the child process to exit, collecting whatever
    /// was piped from stdout and stderr
    ///
    /// Both streams are drained concurrently, so a chatty stderr
    /// cannot block the child
    pub fn wait(self) -> Result<Finished, Error> {
        let command_string = self.get_command_string();
        let output = self
            .child
            .wait_with_output()
            .change_context_lazy(|| {
                Error::Subcommand(self.command.executable.to_string_lossy().to_string())
            })
            .attach_printable_lazy(|| format!("running {}", command_string))?;

        Ok(Finished {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Get a string representation of a command for debugging purposes
fn get_command_string(executable: &OsStr, command: &std::process::Command) -> String {
    let args_str = command
        .get_args()
        .map(|s| s.to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join(" ");
    format!("{} {}", executable.to_string_lossy(), args_str)
}

/// A finished process
pub struct Finished {
    pub status: ExitStatus,
    /// Captured stdout, empty if not piped
    pub stdout: String,
    /// Captured stderr, empty if not piped
    pub stderr: String,
}
