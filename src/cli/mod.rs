//! Command-line interface definitions for the `xferbench` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::Parser;

/// Top-level CLI for the `xferbench` binary.
#[derive(Debug, Parser)]
#[command(
    name = "xferbench",
    version,
    about = "Compare transfer times of the iRODS S3 API against iCommands and GoCommands",
    long_about = "Compare transfer times of the iRODS S3 API against iCommands and GoCommands.\n\n\
        Each tool uploads and downloads a small and a large payload several times. \
        Results (geometric mean and one-geometric-standard-deviation bounds, in \
        seconds) are written to stdout; progress is written to stderr. Tool paths, \
        payload sizes, and the run count are read from XFERBENCH_* environment \
        variables or xferbench.toml."
)]
pub(crate) struct Cli {
    /// Bucket the AWS CLI copies to and from for the S3 API tests.
    #[arg(value_name = "BUCKET")]
    pub(crate) bucket: String,
}
