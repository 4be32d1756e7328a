//! Behavioural smoke tests for the CLI entrypoint.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;

#[test]
fn cli_without_bucket_prints_usage_and_fails() {
    let mut cmd = cargo_bin_cmd!("xferbench");
    cmd.assert()
        .code(1)
        .stdout(contains("Usage: xferbench <BUCKET>"))
        .stderr("");
}

#[test]
fn cli_help_succeeds() {
    let mut cmd = cargo_bin_cmd!("xferbench");
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("iRODS S3 API"))
        .stdout(contains("<BUCKET>"));
}
