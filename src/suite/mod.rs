//! The performance suite: runs every test factory against every tool and
//! summarises the timings.
//!
//! Execution is strictly sequential. Concurrent transfers would contend for
//! the same link and local I/O and skew the comparison, so each run waits for
//! the previous one to finish.

use std::num::NonZeroUsize;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use crate::fixture::{Fixture, FixtureError};
use crate::recorder::Recorder;
use crate::scenario::{Scenario, TestFactory, TestUnit};
use crate::stats::{StatsError, Summary};
use crate::tool::{Tool, TransferError};

/// Decimal places used when formatting seconds.
pub const RESULT_PRECISION: usize = 3;

/// Errors raised when constructing a suite.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SuiteError {
    /// Raised when the run count is zero.
    #[error("runs per test must be at least 1")]
    ZeroRuns,
}

/// Reasons a single (factory, tool) pairing produced no result.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum UnitFailure {
    /// The payload could not be prepared, so no run was attempted.
    #[error("payload preparation failed: {0}")]
    Prepare(#[source] FixtureError),
    /// A run failed; the remaining runs were skipped.
    #[error("run {run} of {runs} failed: {source}")]
    Transfer {
        /// 1-based index of the failing run.
        run: usize,
        /// Configured number of runs.
        runs: usize,
        /// Error reported by the tool.
        #[source]
        source: TransferError,
    },
    /// The collected samples could not be summarised.
    #[error("cannot summarise timings: {0}")]
    Statistics(#[source] StatsError),
}

/// Outcome of one (factory, tool) pairing.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitReport {
    /// Label of the test unit.
    pub label: String,
    /// Scenario the unit performed.
    pub scenario: Scenario,
    /// Display name of the tool.
    pub tool: String,
    /// Summary on success, the failure otherwise.
    pub outcome: Result<Summary, UnitFailure>,
}

/// Outcomes of every pairing, in execution order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SuiteReport {
    /// One entry per (factory, tool) pairing.
    pub units: Vec<UnitReport>,
}

impl SuiteReport {
    /// Number of pairings that produced a result.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.units.iter().filter(|unit| unit.outcome.is_ok()).count()
    }

    /// Number of pairings that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.units.len() - self.completed()
    }
}

/// A set of tools compared across a set of transfer scenarios.
pub struct PerformanceSuite {
    runs_per_test: NonZeroUsize,
    tools: Vec<Box<dyn Tool>>,
    factories: Vec<TestFactory>,
}

impl PerformanceSuite {
    /// Creates a suite running each test `runs_per_test` times.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::ZeroRuns`] when `runs_per_test` is zero.
    pub fn new(
        runs_per_test: usize,
        tools: Vec<Box<dyn Tool>>,
        factories: Vec<TestFactory>,
    ) -> Result<Self, SuiteError> {
        let runs = NonZeroUsize::new(runs_per_test).ok_or(SuiteError::ZeroRuns)?;
        Ok(Self {
            runs_per_test: runs,
            tools,
            factories,
        })
    }

    /// Number of (factory, tool) pairings the suite will execute.
    #[must_use]
    pub fn matrix_size(&self) -> usize {
        self.factories.len() * self.tools.len()
    }

    /// Runs every pairing, factories outermost, reporting through `recorder`.
    ///
    /// A failing pairing is reported once and the suite moves on.
    pub fn run(&self, fixture: &dyn Fixture, recorder: &mut dyn Recorder) -> SuiteReport {
        recorder.notify("starting performance test suite");
        let mut report = SuiteReport {
            units: Vec::with_capacity(self.matrix_size()),
        };

        for factory in &self.factories {
            recorder.notify(&format!("performing {} tests", factory.scenario()));
            for tool in &self.tools {
                let unit = factory.make(tool.as_ref());
                recorder.notify(&format!("performing {} tests", unit.label()));
                let outcome = self.run_unit(&unit, factory.data_name(), fixture, recorder);
                match &outcome {
                    Ok(summary) => {
                        recorder.log(&format_result(unit.label(), summary));
                        recorder.notify(&format!("finished {}", unit.label()));
                    }
                    Err(failure) => {
                        recorder.notify(&format!("{} failed: {failure}", unit.label()));
                    }
                }
                report.units.push(UnitReport {
                    label: unit.label().to_owned(),
                    scenario: unit.scenario(),
                    tool: tool.name().to_owned(),
                    outcome,
                });
            }
        }

        recorder.notify(&format!(
            "finished performance test suite: {} completed, {} failed",
            report.completed(),
            report.failed()
        ));
        report
    }

    fn run_unit(
        &self,
        unit: &TestUnit<'_>,
        data_name: &str,
        fixture: &dyn Fixture,
        recorder: &mut dyn Recorder,
    ) -> Result<Summary, UnitFailure> {
        let sampled = fixture
            .prepare(unit.scenario(), data_name)
            .map_err(UnitFailure::Prepare)
            .and_then(|()| self.collect_samples(unit, recorder));
        if let Err(err) = fixture.clean_up(unit.scenario(), data_name) {
            warn!(label = unit.label(), error = %err, "payload clean-up failed");
        }
        Summary::from_durations(&sampled?).map_err(UnitFailure::Statistics)
    }

    fn collect_samples(
        &self,
        unit: &TestUnit<'_>,
        recorder: &mut dyn Recorder,
    ) -> Result<Vec<Duration>, UnitFailure> {
        let runs = self.runs_per_test.get();
        let mut samples = Vec::with_capacity(runs);
        for run in 1..=runs {
            recorder.notify(&format!("run {run} of {}", unit.label()));
            let elapsed = unit
                .run()
                .map_err(|source| UnitFailure::Transfer { run, runs, source })?;
            samples.push(elapsed);
        }
        Ok(samples)
    }
}

/// Formats a result line as `<label>: <mean> [<lower>, <upper>] s`.
#[must_use]
pub fn format_result(label: &str, summary: &Summary) -> String {
    format!(
        "{label}: {mean:.prec$} [{lower:.prec$}, {upper:.prec$}] s",
        mean = summary.geo_mean(),
        lower = summary.lower(),
        upper = summary.upper(),
        prec = RESULT_PRECISION,
    )
}
