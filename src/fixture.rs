//! Payload set-up and clean-up around a test unit.
//!
//! Upload scenarios need a local file of the right size; download scenarios
//! need a remote object of the right size. Uploads first remove any object a
//! previous invocation left behind. The fixture creates these once
//! before a unit's runs and removes them afterwards, leaving every run free to
//! overwrite the payload.

use std::ffi::OsString;

use cap_std::{ambient_authority, fs_utf8::Dir};
use thiserror::Error;
use tracing::debug;

use crate::runner::{CommandError, CommandRunner};
use crate::scenario::Scenario;
use crate::tool::Direction;

/// Errors raised while preparing or removing payloads.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum FixtureError {
    /// Raised when the working directory cannot be opened.
    #[error("failed to open working directory: {message}")]
    OpenDir {
        /// Operating system error string.
        message: String,
    },
    /// Raised when a local payload file operation fails.
    #[error("failed to {action} {path}: {message}")]
    Io {
        /// Operation that failed.
        action: &'static str,
        /// Payload path relative to the working directory.
        path: String,
        /// Operating system error string.
        message: String,
    },
    /// Raised when a staging command cannot be started.
    #[error(transparent)]
    Spawn(#[from] CommandError),
    /// Raised when a staging command exits unsuccessfully.
    #[error("{program} exited with status {status_text}: {stderr}")]
    Command {
        /// Command used for the attempted operation.
        program: String,
        /// Human readable representation of the exit status.
        status_text: String,
        /// Stderr captured from the process.
        stderr: String,
    },
}

/// Prepares and removes the payload a scenario transfers.
pub trait Fixture {
    /// Makes the payload named `data_name` available for `scenario`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the payload cannot be created.
    fn prepare(&self, scenario: Scenario, data_name: &str) -> Result<(), FixtureError>;

    /// Removes whatever [`Fixture::prepare`] and the transfers left behind.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when removal fails.
    fn clean_up(&self, scenario: Scenario, data_name: &str) -> Result<(), FixtureError>;
}

/// Fixture that leaves the environment untouched, for payloads managed
/// outside the harness.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unmanaged;

impl Fixture for Unmanaged {
    fn prepare(&self, _scenario: Scenario, _data_name: &str) -> Result<(), FixtureError> {
        Ok(())
    }

    fn clean_up(&self, _scenario: Scenario, _data_name: &str) -> Result<(), FixtureError> {
        Ok(())
    }
}

/// Creates sparse local payloads in a working directory and stages remote
/// objects with the iCommands clients.
#[derive(Debug)]
pub struct PayloadFixture<R: CommandRunner> {
    dir: Dir,
    runner: R,
    put_bin: String,
    remove_bin: String,
}

impl<R: CommandRunner> PayloadFixture<R> {
    /// Creates a fixture rooted at `dir`.
    #[must_use]
    pub fn new(
        dir: Dir,
        runner: R,
        put_bin: impl Into<String>,
        remove_bin: impl Into<String>,
    ) -> Self {
        Self {
            dir,
            runner,
            put_bin: put_bin.into(),
            remove_bin: remove_bin.into(),
        }
    }

    /// Creates a fixture rooted at the current working directory.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::OpenDir`] when the directory cannot be opened.
    pub fn in_current_dir(
        runner: R,
        put_bin: impl Into<String>,
        remove_bin: impl Into<String>,
    ) -> Result<Self, FixtureError> {
        let dir = Dir::open_ambient_dir(".", ambient_authority()).map_err(|err| {
            FixtureError::OpenDir {
                message: err.to_string(),
            }
        })?;
        Ok(Self::new(dir, runner, put_bin, remove_bin))
    }

    fn create_local(&self, data_name: &str, size: u64) -> Result<(), FixtureError> {
        debug!(data_name, size, "creating local payload");
        let file = self
            .dir
            .create(data_name)
            .map_err(|err| io_error("create", data_name, &err))?;
        file.set_len(size)
            .map_err(|err| io_error("size", data_name, &err))
    }

    fn remove_local(&self, data_name: &str) -> Result<(), FixtureError> {
        if !self.dir.exists(data_name) {
            return Ok(());
        }
        debug!(data_name, "removing local payload");
        self.dir
            .remove_file(data_name)
            .map_err(|err| io_error("remove", data_name, &err))
    }

    fn put_remote(&self, data_name: &str) -> Result<(), FixtureError> {
        debug!(data_name, "staging remote payload");
        self.stage(
            &self.put_bin,
            &[
                OsString::from("-f"),
                OsString::from(data_name),
                OsString::from(data_name),
            ],
        )
    }

    fn remove_remote(&self, data_name: &str) -> Result<(), FixtureError> {
        debug!(data_name, "removing remote payload");
        self.stage(
            &self.remove_bin,
            &[OsString::from("-f"), OsString::from(data_name)],
        )
    }

    fn stage(&self, program: &str, args: &[OsString]) -> Result<(), FixtureError> {
        let output = self.runner.run(program, args)?;
        if output.is_success() {
            return Ok(());
        }
        Err(FixtureError::Command {
            program: program.to_owned(),
            status_text: output.status_text(),
            stderr: output.stderr.trim_end().to_owned(),
        })
    }
}

impl<R: CommandRunner> Fixture for PayloadFixture<R> {
    fn prepare(&self, scenario: Scenario, data_name: &str) -> Result<(), FixtureError> {
        match scenario.direction {
            Direction::Upload => {
                // irm fails when nothing is left over
                if let Err(err) = self.remove_remote(data_name) {
                    debug!(data_name, error = %err, "no stale remote payload removed");
                }
                self.create_local(data_name, scenario.size)
            }
            Direction::Download => {
                self.create_local(data_name, scenario.size)?;
                self.put_remote(data_name)?;
                self.remove_local(data_name)
            }
        }
    }

    fn clean_up(&self, _scenario: Scenario, data_name: &str) -> Result<(), FixtureError> {
        let local = self.remove_local(data_name);
        let remote = self.remove_remote(data_name);
        local.and(remote)
    }
}

fn io_error(action: &'static str, path: &str, err: &std::io::Error) -> FixtureError {
    FixtureError::Io {
        action,
        path: path.to_owned(),
        message: err.to_string(),
    }
}
