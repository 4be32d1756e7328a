//! Test support utilities shared across unit and integration tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::rc::Rc;
use std::time::Duration;

use camino::Utf8Path;

use crate::fixture::{Fixture, FixtureError};
use crate::recorder::Recorder;
use crate::runner::{CommandError, CommandOutput, CommandRunner, render_command};
use crate::scenario::Scenario;
use crate::tool::{Direction, Tool, TransferError};

/// Scripted command runner that returns pre-seeded outputs in FIFO order.
///
/// Used to drive deterministic command outcomes without spawning processes.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRunner {
    responses: Rc<RefCell<VecDeque<CommandOutput>>>,
    invocations: Rc<RefCell<Vec<CommandInvocation>>>,
}

/// Records a single invocation made through [`ScriptedRunner`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommandInvocation {
    /// Program name as passed to the runner.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<OsString>,
}

impl CommandInvocation {
    /// Returns a shell-like command string for assertions.
    #[must_use]
    pub fn command_string(&self) -> String {
        render_command(&self.program, &self.args)
    }
}

impl ScriptedRunner {
    /// Creates a new runner with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all invocations recorded so far.
    #[must_use]
    pub fn invocations(&self) -> Vec<CommandInvocation> {
        self.invocations.borrow().clone()
    }

    /// Pushes a successful exit status.
    pub fn push_success(&self) {
        self.push_output(Some(0), "", "");
    }

    /// Pushes a failing exit code with stderr text.
    pub fn push_failure(&self, code: i32) {
        self.push_output(Some(code), "", "simulated failure");
    }

    /// Pushes an explicit command output response.
    pub fn push_output(
        &self,
        code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) {
        self.responses.borrow_mut().push_back(CommandOutput {
            code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        });
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput, CommandError> {
        self.invocations.borrow_mut().push(CommandInvocation {
            program: program.to_owned(),
            args: args.to_vec(),
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| CommandError::Spawn {
                program: program.to_owned(),
                message: String::from("no scripted response available"),
            })
    }
}

/// Tool double returning scripted durations without spawning processes.
///
/// Clones share their call log, so a test can keep one handle while the suite
/// owns another.
#[derive(Clone, Debug)]
pub struct ScriptedTool {
    name: String,
    steady: Duration,
    durations: Rc<RefCell<VecDeque<Duration>>>,
    failing_call: Option<usize>,
    calls: Rc<RefCell<Vec<Direction>>>,
}

impl ScriptedTool {
    /// Creates a tool that reports `steady` for every transfer.
    #[must_use]
    pub fn new(name: impl Into<String>, steady: Duration) -> Self {
        Self {
            name: name.into(),
            steady,
            durations: Rc::default(),
            failing_call: None,
            calls: Rc::default(),
        }
    }

    /// Makes the `call`-th transfer (1-based, across both directions) fail.
    #[must_use]
    pub const fn failing_on_call(mut self, call: usize) -> Self {
        self.failing_call = Some(call);
        self
    }

    /// Queues a duration to report before falling back to the steady value.
    pub fn push_duration(&self, duration: Duration) {
        self.durations.borrow_mut().push_back(duration);
    }

    /// Directions of every transfer attempted so far.
    #[must_use]
    pub fn calls(&self) -> Vec<Direction> {
        self.calls.borrow().clone()
    }

    fn transfer(&self, direction: Direction) -> Result<Duration, TransferError> {
        let call = {
            let mut calls = self.calls.borrow_mut();
            calls.push(direction);
            calls.len()
        };
        if self.failing_call == Some(call) {
            return Err(TransferError::Failure {
                tool: self.name.clone(),
                direction,
                status_text: String::from("1"),
                stderr: String::from("simulated failure"),
            });
        }
        Ok(self
            .durations
            .borrow_mut()
            .pop_front()
            .unwrap_or(self.steady))
    }
}

impl Tool for ScriptedTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn upload(&self, _local: &Utf8Path, _remote: &str) -> Result<Duration, TransferError> {
        self.transfer(Direction::Upload)
    }

    fn download(&self, _remote: &str, _local: &Utf8Path) -> Result<Duration, TransferError> {
        self.transfer(Direction::Download)
    }
}

/// Recorder that keeps every message in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryRecorder {
    notifications: Vec<String>,
    results: Vec<String>,
}

impl MemoryRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications in emission order.
    #[must_use]
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    /// Result lines in emission order.
    #[must_use]
    pub fn results(&self) -> &[String] {
        &self.results
    }

    /// Notifications reporting a failed test unit.
    #[must_use]
    pub fn failures(&self) -> Vec<&str> {
        self.notifications
            .iter()
            .map(String::as_str)
            .filter(|message| message.contains(" failed: "))
            .collect()
    }
}

impl Recorder for MemoryRecorder {
    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_owned());
    }

    fn log(&mut self, result: &str) {
        self.results.push(result.to_owned());
    }
}

/// Fixture double counting preparations and clean-ups.
#[derive(Clone, Debug, Default)]
pub struct RecordingFixture {
    prepared: Rc<RefCell<Vec<Scenario>>>,
    cleaned: Rc<RefCell<Vec<Scenario>>>,
    fail_prepare: Option<Direction>,
    fail_clean_up: bool,
}

impl RecordingFixture {
    /// Creates a fixture that always succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes preparation fail for scenarios in `direction`.
    #[must_use]
    pub const fn failing_prepare(mut self, direction: Direction) -> Self {
        self.fail_prepare = Some(direction);
        self
    }

    /// Makes every clean-up fail.
    #[must_use]
    pub const fn failing_clean_up(mut self) -> Self {
        self.fail_clean_up = true;
        self
    }

    /// Scenarios prepared so far.
    #[must_use]
    pub fn prepared(&self) -> Vec<Scenario> {
        self.prepared.borrow().clone()
    }

    /// Scenarios cleaned up so far.
    #[must_use]
    pub fn cleaned(&self) -> Vec<Scenario> {
        self.cleaned.borrow().clone()
    }
}

impl Fixture for RecordingFixture {
    fn prepare(&self, scenario: Scenario, data_name: &str) -> Result<(), FixtureError> {
        self.prepared.borrow_mut().push(scenario);
        if self.fail_prepare == Some(scenario.direction) {
            return Err(FixtureError::Command {
                program: String::from("iput"),
                status_text: String::from("1"),
                stderr: format!("cannot stage {data_name}"),
            });
        }
        Ok(())
    }

    fn clean_up(&self, scenario: Scenario, data_name: &str) -> Result<(), FixtureError> {
        self.cleaned.borrow_mut().push(scenario);
        if self.fail_clean_up {
            return Err(FixtureError::Command {
                program: String::from("irm"),
                status_text: String::from("1"),
                stderr: format!("cannot remove {data_name}"),
            });
        }
        Ok(())
    }
}
