//! AWS CLI adapter exercising the object-protocol gateway.

use std::ffi::OsString;
use std::time::Duration;

use camino::Utf8Path;

use super::{Direction, Tool, TransferError, timed_transfer};
use crate::runner::CommandRunner;

/// Read timeout passed to the AWS CLI, in seconds.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 300;

const NAME: &str = "iRODS S3 API over AWS CLI";

/// Transfers objects through the S3 API using `aws s3 cp`.
///
/// The CLI must already be configured to reach the gateway under test by
/// default.
#[derive(Clone, Debug)]
pub struct AwsCli<R: CommandRunner> {
    runner: R,
    bin: String,
    bucket_uri: String,
    read_timeout_secs: u64,
}

impl<R: CommandRunner> AwsCli<R> {
    /// Creates an adapter that copies to and from `bucket`.
    ///
    /// Returns `None` when `bucket` is blank.
    #[must_use]
    pub fn new(runner: R, bin: impl Into<String>, bucket: &str) -> Option<Self> {
        let trimmed = bucket.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            runner,
            bin: bin.into(),
            bucket_uri: format!("s3://{trimmed}"),
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
        })
    }

    /// Overrides the read timeout passed to the CLI.
    #[must_use]
    pub const fn with_read_timeout(mut self, secs: u64) -> Self {
        self.read_timeout_secs = secs;
        self
    }

    /// Returns the `s3://` URI for an object in the configured bucket.
    #[must_use]
    pub fn object_uri(&self, remote: &str) -> String {
        format!("{}/{}", self.bucket_uri, remote.trim_start_matches('/'))
    }

    fn copy(
        &self,
        direction: Direction,
        src: OsString,
        dest: OsString,
    ) -> Result<Duration, TransferError> {
        let args = [
            OsString::from(format!("--cli-read-timeout={}", self.read_timeout_secs)),
            OsString::from("s3"),
            OsString::from("cp"),
            OsString::from("--only-show-errors"),
            src,
            dest,
        ];
        timed_transfer(&self.runner, NAME, direction, &self.bin, &args)
    }
}

impl<R: CommandRunner> Tool for AwsCli<R> {
    fn name(&self) -> &str {
        NAME
    }

    fn upload(&self, local: &Utf8Path, remote: &str) -> Result<Duration, TransferError> {
        self.copy(
            Direction::Upload,
            OsString::from(local.as_str()),
            OsString::from(self.object_uri(remote)),
        )
    }

    fn download(&self, remote: &str, local: &Utf8Path) -> Result<Duration, TransferError> {
        self.copy(
            Direction::Download,
            OsString::from(self.object_uri(remote)),
            OsString::from(local.as_str()),
        )
    }
}
