//! GoCommands adapter (`gocmd put` / `gocmd get`).

use std::ffi::OsString;
use std::time::Duration;

use camino::Utf8Path;

use super::{Direction, Tool, TransferError, timed_transfer};
use crate::runner::CommandRunner;

const NAME: &str = "GoCommands";

/// Transfers data objects with the `gocmd` client.
#[derive(Clone, Debug)]
pub struct GoCommands<R: CommandRunner> {
    runner: R,
    bin: String,
}

impl<R: CommandRunner> GoCommands<R> {
    /// Creates an adapter using the given `gocmd` executable.
    #[must_use]
    pub fn new(runner: R, bin: impl Into<String>) -> Self {
        Self {
            runner,
            bin: bin.into(),
        }
    }

    fn transfer(
        &self,
        direction: Direction,
        src: &str,
        dest: &str,
    ) -> Result<Duration, TransferError> {
        let subcommand = match direction {
            Direction::Upload => "put",
            Direction::Download => "get",
        };
        let args = [
            OsString::from(subcommand),
            OsString::from("-f"),
            OsString::from(src),
            OsString::from(dest),
        ];
        timed_transfer(&self.runner, NAME, direction, &self.bin, &args)
    }
}

impl<R: CommandRunner> Tool for GoCommands<R> {
    fn name(&self) -> &str {
        NAME
    }

    fn upload(&self, local: &Utf8Path, remote: &str) -> Result<Duration, TransferError> {
        self.transfer(Direction::Upload, local.as_str(), remote)
    }

    fn download(&self, remote: &str, local: &Utf8Path) -> Result<Duration, TransferError> {
        self.transfer(Direction::Download, remote, local.as_str())
    }
}
