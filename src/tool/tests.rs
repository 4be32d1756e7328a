//! Unit tests for the transfer tool adapters.

use super::*;
use crate::test_support::ScriptedRunner;
use rstest::{fixture, rstest};

#[fixture]
fn runner() -> ScriptedRunner {
    ScriptedRunner::new()
}

fn only_command(runner: &ScriptedRunner) -> String {
    let invocations = runner.invocations();
    let [invocation] = invocations.as_slice() else {
        panic!("expected one invocation, got {invocations:?}");
    };
    invocation.command_string()
}

#[rstest]
fn aws_upload_copies_to_bucket_uri(runner: ScriptedRunner) {
    runner.push_success();
    let tool = AwsCli::new(runner.clone(), "aws", "bench").expect("bucket is set");

    tool.upload(Utf8Path::new("test"), "test").expect("upload succeeds");

    assert_eq!(
        only_command(&runner),
        "aws --cli-read-timeout=300 s3 cp --only-show-errors test 's3://bench/test'"
    );
    let invocations = runner.invocations();
    assert_eq!(
        invocations.first().and_then(|invocation| invocation.args.last()),
        Some(&OsString::from("s3://bench/test"))
    );
}

#[rstest]
fn aws_download_copies_from_bucket_uri(runner: ScriptedRunner) {
    runner.push_success();
    let tool = AwsCli::new(runner.clone(), "aws", "bench")
        .expect("bucket is set")
        .with_read_timeout(30);

    tool.download("test", Utf8Path::new("test"))
        .expect("download succeeds");

    assert_eq!(
        only_command(&runner),
        "aws --cli-read-timeout=30 s3 cp --only-show-errors 's3://bench/test' test"
    );
}

#[rstest]
#[case::empty("")]
#[case::blank("   ")]
fn aws_rejects_blank_bucket(runner: ScriptedRunner, #[case] bucket: &str) {
    assert!(AwsCli::new(runner, "aws", bucket).is_none());
}

#[rstest]
fn aws_object_uri_strips_leading_slash(runner: ScriptedRunner) {
    let tool = AwsCli::new(runner, "aws", "bench").expect("bucket is set");
    assert_eq!(tool.object_uri("/dir/test"), "s3://bench/dir/test");
}

#[rstest]
#[case::upload(Direction::Upload, "iput -f test test")]
#[case::download(Direction::Download, "iget -f test test")]
fn icommands_forces_overwrite(
    runner: ScriptedRunner,
    #[case] direction: Direction,
    #[case] expected: &str,
) {
    runner.push_success();
    let tool = ICommands::new(runner.clone(), "iput", "iget");

    let result = match direction {
        Direction::Upload => tool.upload(Utf8Path::new("test"), "test"),
        Direction::Download => tool.download("test", Utf8Path::new("test")),
    };

    assert!(result.is_ok());
    assert_eq!(only_command(&runner), expected);
}

#[rstest]
#[case::upload(Direction::Upload, "gocmd put -f test test")]
#[case::download(Direction::Download, "gocmd get -f test test")]
fn gocommands_forces_overwrite(
    runner: ScriptedRunner,
    #[case] direction: Direction,
    #[case] expected: &str,
) {
    runner.push_success();
    let tool = GoCommands::new(runner.clone(), "gocmd");

    let result = match direction {
        Direction::Upload => tool.upload(Utf8Path::new("test"), "test"),
        Direction::Download => tool.download("test", Utf8Path::new("test")),
    };

    assert!(result.is_ok());
    assert_eq!(only_command(&runner), expected);
}

#[rstest]
fn non_zero_exit_becomes_transfer_failure(runner: ScriptedRunner) {
    runner.push_output(Some(3), "", "USER_FILE_DOES_NOT_EXIST\n");
    let tool = GoCommands::new(runner, "gocmd");

    let err = tool
        .download("test", Utf8Path::new("test"))
        .expect_err("exit 3 should fail");

    assert_eq!(
        err,
        TransferError::Failure {
            tool: String::from("GoCommands"),
            direction: Direction::Download,
            status_text: String::from("3"),
            stderr: String::from("USER_FILE_DOES_NOT_EXIST"),
        }
    );
    assert_eq!(
        err.to_string(),
        "GoCommands download exited with status 3: USER_FILE_DOES_NOT_EXIST"
    );
}

#[rstest]
fn missing_exit_status_is_a_failure(runner: ScriptedRunner) {
    runner.push_output(None, "", "");
    let tool = ICommands::new(runner, "iput", "iget");

    let err = tool
        .upload(Utf8Path::new("test"), "test")
        .expect_err("signalled process should fail");

    assert!(
        matches!(err, TransferError::Failure { ref status_text, .. } if status_text == "unknown"),
        "unexpected error: {err}"
    );
}

#[rstest]
fn spawn_error_names_tool_and_direction(runner: ScriptedRunner) {
    let tool = ICommands::new(runner, "iput", "iget");

    let err = tool
        .upload(Utf8Path::new("test"), "test")
        .expect_err("no scripted response");

    let TransferError::Spawn {
        tool: ref name,
        direction,
        ..
    } = err
    else {
        panic!("expected spawn error, got {err:?}");
    };
    assert_eq!(name, "iCommands");
    assert_eq!(direction, Direction::Upload);
}

#[test]
fn direction_displays_lowercase() {
    assert_eq!(Direction::Upload.to_string(), "upload");
    assert_eq!(Direction::Download.to_string(), "download");
}
