//! Running the eclim executable.
//!
//! Calls are synchronous: the caller blocks until eclim exits. There is no timeout, so a
//! hung Eclipse instance blocks the calling thread.

use crate::command::CommandLine;
use crate::error::ProcessError;
use std::path::{Path, PathBuf};
use std::process::{Command as ProcessCommand, Stdio};
use tracing::{debug, warn};

/// Something that can execute an eclim command and return its stdout.
///
/// [`ProcessInvoker`] is the real implementation; tests substitute a scripted one.
pub trait Invoker {
    /// Execute `command` and return everything eclim printed on stdout.
    fn invoke(&mut self, command: &CommandLine) -> Result<String, ProcessError>;
}

impl<T: Invoker + ?Sized> Invoker for &mut T {
    fn invoke(&mut self, command: &CommandLine) -> Result<String, ProcessError> {
        (**self).invoke(command)
    }
}

#[derive(Debug, Clone)]
/// Spawns the configured eclim executable once per command.
pub struct ProcessInvoker {
    executable: PathBuf,
}

impl ProcessInvoker {
    /// Create an invoker for the eclim executable at `executable`.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Path of the eclim executable.
    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl Invoker for ProcessInvoker {
    fn invoke(&mut self, command: &CommandLine) -> Result<String, ProcessError> {
        debug!(program = %self.executable.display(), args = %command, "invoking eclim");

        let output = ProcessCommand::new(&self.executable)
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ProcessError::Spawn {
                program: self.executable.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stdout.trim().is_empty() {
                return Err(ProcessError::Failed {
                    status: output.status,
                    stderr,
                });
            }
            warn!(
                command = command.command_name(),
                status = %output.status,
                stderr = %stderr,
                "eclim exited unsuccessfully, using its output anyway"
            );
        }

        Ok(stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::EclimCommand;

    #[test]
    fn test_missing_executable_is_a_spawn_error() {
        let mut invoker = ProcessInvoker::new("/definitely/not/an/eclim/binary");
        let line = EclimCommand::ImportSearch {
            project: "demo".to_string(),
            identifier: "List".to_string(),
        }
        .build()
        .unwrap();

        match invoker.invoke(&line) {
            Err(ProcessError::Spawn { program, .. }) => {
                assert_eq!(program, PathBuf::from("/definitely/not/an/eclim/binary"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_is_captured() {
        // `echo` stands in for eclim: it prints its arguments back.
        let mut invoker = ProcessInvoker::new("echo");
        let line = EclimCommand::RunClass {
            project: "demo".to_string(),
            class_name: "a.Main".to_string(),
        }
        .build()
        .unwrap();

        let out = invoker.invoke(&line).unwrap();
        assert_eq!(out.trim_end(), "-command java -p demo -c a.Main");
    }
}
