//! Transfer tool adapters.
//!
//! Each adapter wraps one external transfer client behind the [`Tool`] trait.
//! Operations block until the client exits and report the wall-clock time
//! spanning process start to process exit, so client start-up overhead is
//! part of every measurement.

use std::ffi::OsString;
use std::fmt;
use std::time::{Duration, Instant};

use camino::Utf8Path;
use thiserror::Error;
use tracing::debug;

use crate::runner::{CommandError, CommandRunner};

mod aws;
mod gocommands;
mod icommands;

pub use aws::{AwsCli, DEFAULT_READ_TIMEOUT_SECS};
pub use gocommands::GoCommands;
pub use icommands::ICommands;

/// Direction of a transfer relative to the local machine.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    /// Local file to remote object.
    Upload,
    /// Remote object to local file.
    Download,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upload => f.write_str("upload"),
            Self::Download => f.write_str("download"),
        }
    }
}

/// Errors surfaced by a single transfer attempt.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TransferError {
    /// Raised when the client process cannot be started.
    #[error("{tool} {direction} could not start: {source}")]
    Spawn {
        /// Display name of the tool.
        tool: String,
        /// Direction of the attempted transfer.
        direction: Direction,
        /// Underlying runner error.
        #[source]
        source: CommandError,
    },
    /// Raised when the client exits with a non-zero or missing status.
    #[error("{tool} {direction} exited with status {status_text}: {stderr}")]
    Failure {
        /// Display name of the tool.
        tool: String,
        /// Direction of the attempted transfer.
        direction: Direction,
        /// Human readable representation of the exit status.
        status_text: String,
        /// Stderr captured from the client.
        stderr: String,
    },
}

/// A transfer client whose performance is being measured.
pub trait Tool {
    /// Display name used in labels and failure messages.
    fn name(&self) -> &str;

    /// Copies the local file at `local` to the remote object `remote`.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError`] when the client cannot be started or exits
    /// unsuccessfully.
    fn upload(&self, local: &Utf8Path, remote: &str) -> Result<Duration, TransferError>;

    /// Copies the remote object `remote` to the local file at `local`.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError`] when the client cannot be started or exits
    /// unsuccessfully.
    fn download(&self, remote: &str, local: &Utf8Path) -> Result<Duration, TransferError>;
}

/// Runs one client invocation and times it from spawn to exit.
pub(crate) fn timed_transfer<R: CommandRunner>(
    runner: &R,
    tool: &str,
    direction: Direction,
    program: &str,
    args: &[OsString],
) -> Result<Duration, TransferError> {
    let started = Instant::now();
    let output = runner
        .run(program, args)
        .map_err(|source| TransferError::Spawn {
            tool: tool.to_owned(),
            direction,
            source,
        })?;
    let elapsed = started.elapsed();
    debug!(tool, %direction, ?elapsed, code = ?output.code, "transfer finished");

    if output.is_success() {
        return Ok(elapsed);
    }

    Err(TransferError::Failure {
        tool: tool.to_owned(),
        direction,
        status_text: output.status_text(),
        stderr: output.stderr.trim_end().to_owned(),
    })
}

#[cfg(test)]
mod tests;
