//! Error types of the eclim client.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while running the eclim executable.
pub enum ProcessError {
    #[error("failed to spawn eclim at '{program}': {source}")]
    /// The executable could not be started.
    Spawn {
        /// The executable that was spawned.
        program: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    #[error("eclim exited with {status}: {stderr}")]
    /// The executable exited unsuccessfully without printing anything on stdout.
    Failed {
        /// Exit status of the process.
        status: ExitStatus,
        /// Captured stderr (lossy UTF-8, trimmed).
        stderr: String,
    },
}

#[derive(Debug, Error)]
/// Errors produced by the eclim client layer.
pub enum ClientError {
    #[error("eclim executable path is not set")]
    /// No executable has been configured.
    NotConfigured,

    #[error("invalid eclim request: missing {field}")]
    /// A required command parameter was missing or empty.
    InvalidRequest {
        /// Name of the offending parameter.
        field: &'static str,
    },

    #[error("no eclipse project found for '{0}'")]
    /// The file does not live below a directory with a `.project` descriptor.
    NoProject(PathBuf),

    #[error("I/O error: {0}")]
    /// Filesystem I/O failed.
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// The eclim process failed.
    Process(#[from] ProcessError),
}
