//! Shared fixtures for performance suite scenarios.

use std::time::Duration;

use rstest::fixture;
use xferbench::test_support::ScriptedTool;
use xferbench::{PerformanceSuite, TestFactory, Tool};

/// Duration every scripted tool reports unless told otherwise.
pub const STEADY: Duration = Duration::from_millis(40);

/// Tool names in the order the binary registers them.
pub const TOOL_NAMES: [&str; 3] = ["iRODS S3 API over AWS CLI", "iCommands", "GoCommands"];

#[derive(Clone, Debug)]
pub struct SuiteContext {
    pub tools: Vec<ScriptedTool>,
    pub factories: Vec<TestFactory>,
}

impl SuiteContext {
    /// Swaps the tool named `name` for `replacement`.
    pub fn replace_tool(&mut self, name: &str, replacement: ScriptedTool) {
        if let Some(slot) = self.tools.iter_mut().find(|tool| tool.name() == name) {
            *slot = replacement;
        }
    }

    /// Builds a suite performing each test `runs` times.
    pub fn suite(&self, runs: usize) -> PerformanceSuite {
        let tools = self
            .tools
            .iter()
            .cloned()
            .map(|tool| Box::new(tool) as Box<dyn Tool>)
            .collect();
        PerformanceSuite::new(runs, tools, self.factories.clone())
            .unwrap_or_else(|err| panic!("suite fixture should be valid: {err}"))
    }
}

#[fixture]
pub fn suite_context() -> SuiteContext {
    SuiteContext {
        tools: TOOL_NAMES
            .into_iter()
            .map(|name| ScriptedTool::new(name, STEADY))
            .collect(),
        factories: vec![TestFactory::upload(1024), TestFactory::download(1024)],
    }
}
