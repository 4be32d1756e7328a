//! iCommands adapter (`iput` / `iget`).

use std::ffi::OsString;
use std::time::Duration;

use camino::Utf8Path;

use super::{Direction, Tool, TransferError, timed_transfer};
use crate::runner::CommandRunner;

const NAME: &str = "iCommands";

/// Transfers data objects with the native iCommands clients.
///
/// Remote paths are relative to the current working collection of the
/// session the clients were initialised with.
#[derive(Clone, Debug)]
pub struct ICommands<R: CommandRunner> {
    runner: R,
    put_bin: String,
    get_bin: String,
}

impl<R: CommandRunner> ICommands<R> {
    /// Creates an adapter using the given `iput` and `iget` executables.
    #[must_use]
    pub fn new(runner: R, put_bin: impl Into<String>, get_bin: impl Into<String>) -> Self {
        Self {
            runner,
            put_bin: put_bin.into(),
            get_bin: get_bin.into(),
        }
    }
}

impl<R: CommandRunner> Tool for ICommands<R> {
    fn name(&self) -> &str {
        NAME
    }

    fn upload(&self, local: &Utf8Path, remote: &str) -> Result<Duration, TransferError> {
        let args = [
            OsString::from("-f"),
            OsString::from(local.as_str()),
            OsString::from(remote),
        ];
        timed_transfer(&self.runner, NAME, Direction::Upload, &self.put_bin, &args)
    }

    fn download(&self, remote: &str, local: &Utf8Path) -> Result<Duration, TransferError> {
        let args = [
            OsString::from("-f"),
            OsString::from(remote),
            OsString::from(local.as_str()),
        ];
        timed_transfer(&self.runner, NAME, Direction::Download, &self.get_bin, &args)
    }
}
