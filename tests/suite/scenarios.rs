//! Scenarios covering result reporting and failure isolation.

use rstest::rstest;
use xferbench::test_support::{MemoryRecorder, ScriptedTool};
use xferbench::{StreamRecorder, Unmanaged};

use super::test_helpers::{STEADY, SuiteContext, suite_context};

#[rstest]
fn three_tools_and_two_factories_yield_six_results(suite_context: SuiteContext) {
    let suite = suite_context.suite(5);
    let mut recorder = MemoryRecorder::new();

    suite.run(&Unmanaged, &mut recorder);

    assert_eq!(recorder.results().len(), 6);
    for line in recorder.results() {
        assert!(line.ends_with(": 0.040 [0.040, 0.040] s"), "line: {line}");
    }
}

#[rstest]
fn redirected_results_appear_verbatim_on_the_diagnostic_stream(suite_context: SuiteContext) {
    let suite = suite_context.suite(2);
    let mut recorder = StreamRecorder::new(Vec::new(), Vec::new(), true);

    suite.run(&Unmanaged, &mut recorder);

    let (primary_buf, diagnostic_buf) = recorder.into_inner();
    let primary = String::from_utf8(primary_buf).unwrap_or_else(|err| panic!("utf8: {err}"));
    let diagnostic =
        String::from_utf8(diagnostic_buf).unwrap_or_else(|err| panic!("utf8: {err}"));
    let diagnostic_lines: Vec<&str> = diagnostic.lines().collect();
    assert_eq!(primary.lines().count(), 6);
    for line in primary.lines() {
        assert!(diagnostic_lines.contains(&line), "missing mirror of {line}");
    }
}

#[rstest]
fn upload_failing_on_second_run_is_reported_once(mut suite_context: SuiteContext) {
    let failing = ScriptedTool::new("GoCommands", STEADY).failing_on_call(2);
    suite_context.replace_tool("GoCommands", failing.clone());
    let suite = suite_context.suite(5);
    let mut recorder = MemoryRecorder::new();

    let report = suite.run(&Unmanaged, &mut recorder);

    assert_eq!(recorder.failures().len(), 1);
    assert!(
        recorder
            .failures()
            .iter()
            .all(|line| line.starts_with("1024 B upload using GoCommands failed: run 2 of 5"))
    );
    assert_eq!(recorder.results().len(), 5);
    assert_eq!(report.units.len(), 6);
    assert_eq!(failing.calls().len(), 2 + 5);
}
