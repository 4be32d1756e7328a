//! Transfer scenarios, the factories that describe them, and the test units
//! that bind a scenario to a concrete tool.

use std::fmt;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};

use crate::tool::{Direction, Tool, TransferError};

/// Payload name used when none is configured.
pub const DEFAULT_DATA_NAME: &str = "test";

/// A transfer direction paired with a fixed payload size.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Scenario {
    /// Direction of every transfer in the scenario.
    pub direction: Direction,
    /// Payload size in bytes.
    pub size: u64,
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} B {}", self.size, self.direction)
    }
}

/// Template producing a [`TestUnit`] for each tool under comparison.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TestFactory {
    scenario: Scenario,
    data_name: String,
}

impl TestFactory {
    /// Factory for uploads of `size` bytes.
    #[must_use]
    pub fn upload(size: u64) -> Self {
        Self::new(Direction::Upload, size)
    }

    /// Factory for downloads of `size` bytes.
    #[must_use]
    pub fn download(size: u64) -> Self {
        Self::new(Direction::Download, size)
    }

    fn new(direction: Direction, size: u64) -> Self {
        Self {
            scenario: Scenario { direction, size },
            data_name: DEFAULT_DATA_NAME.to_owned(),
        }
    }

    /// Overrides the name used for both the local file and the remote object.
    #[must_use]
    pub fn with_data_name(mut self, name: impl Into<String>) -> Self {
        self.data_name = name.into();
        self
    }

    /// Scenario this factory produces tests for.
    #[must_use]
    pub const fn scenario(&self) -> Scenario {
        self.scenario
    }

    /// Name of the payload transferred by every test.
    #[must_use]
    pub fn data_name(&self) -> &str {
        &self.data_name
    }

    /// Builds the test unit that uses `tool` to perform this scenario.
    #[must_use]
    pub fn make<'t>(&self, tool: &'t dyn Tool) -> TestUnit<'t> {
        TestUnit {
            label: format!("{} using {}", self.scenario, tool.name()),
            scenario: self.scenario,
            local: Utf8PathBuf::from(&self.data_name),
            remote: self.data_name.clone(),
            tool,
        }
    }
}

/// One scenario bound to one tool.
///
/// Every call to [`TestUnit::run`] performs a full transfer; nothing is cached
/// between calls.
pub struct TestUnit<'t> {
    label: String,
    scenario: Scenario,
    local: Utf8PathBuf,
    remote: String,
    tool: &'t dyn Tool,
}

impl TestUnit<'_> {
    /// Label of the form `<size> B <direction> using <tool>`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Scenario performed by this unit.
    #[must_use]
    pub const fn scenario(&self) -> Scenario {
        self.scenario
    }

    /// Local path of the payload.
    #[must_use]
    pub fn local_path(&self) -> &Utf8Path {
        &self.local
    }

    /// Performs one transfer and returns its elapsed time.
    ///
    /// # Errors
    ///
    /// Propagates the tool's [`TransferError`].
    pub fn run(&self) -> Result<Duration, TransferError> {
        match self.scenario.direction {
            Direction::Upload => self.tool.upload(&self.local, &self.remote),
            Direction::Download => self.tool.download(&self.remote, &self.local),
        }
    }
}

impl fmt::Debug for TestUnit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestUnit")
            .field("label", &self.label)
            .field("scenario", &self.scenario)
            .field("local", &self.local)
            .field("remote", &self.remote)
            .finish_non_exhaustive()
    }
}
