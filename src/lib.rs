//! Core library for the xferbench transfer benchmark.
//!
//! The crate compares how long different transfer clients take to move the
//! same payload. A [`PerformanceSuite`] runs every [`TestFactory`] against
//! every [`Tool`] a fixed number of times, strictly one transfer at a time,
//! and reports the geometric mean and geometric standard deviation bounds of
//! the timings through a [`Recorder`].

pub mod config;
pub mod fixture;
pub mod recorder;
pub mod runner;
pub mod scenario;
pub mod stats;
pub mod suite;
pub mod test_support;
pub mod tool;

pub use config::{BenchConfig, ConfigError};
pub use fixture::{Fixture, FixtureError, PayloadFixture, Unmanaged};
pub use recorder::{Recorder, StreamRecorder};
pub use runner::{CommandError, CommandOutput, CommandRunner, ProcessCommandRunner};
pub use scenario::{Scenario, TestFactory, TestUnit};
pub use stats::{StatsError, Summary};
pub use suite::{PerformanceSuite, SuiteError, SuiteReport, UnitFailure, UnitReport};
pub use tool::{AwsCli, Direction, GoCommands, ICommands, Tool, TransferError};
