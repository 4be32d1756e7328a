//! Binary entry point for the xferbench CLI.

use std::io::{self, Write};
use std::process;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use xferbench::{
    BenchConfig, ConfigError, FixtureError, PayloadFixture, PerformanceSuite,
    ProcessCommandRunner, StreamRecorder, SuiteError, Unmanaged,
};

mod cli;

use cli::Cli;

/// Environment variable holding the `tracing` filter directive.
const LOG_ENV: &str = "XFERBENCH_LOG";

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid suite: {0}")]
    Suite(#[from] SuiteError),
    #[error("payload set-up failed: {0}")]
    Fixture(#[from] FixtureError),
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::MissingRequiredArgument => {
            write_usage(io::stdout());
            process::exit(1);
        }
        Err(err) => err.exit(),
    };

    init_tracing();
    let exit_code = match execute(&cli) {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

fn execute(cli: &Cli) -> Result<(), CliError> {
    let config = BenchConfig::load_without_cli_args()?;
    config.validate()?;

    let runner = ProcessCommandRunner;
    let tools = config.tools(&cli.bucket, &runner)?;
    let suite = PerformanceSuite::new(config.runs_per_test, tools, config.test_factories())?;
    let mut recorder = StreamRecorder::stdio();

    if config.manage_payloads {
        let fixture = PayloadFixture::in_current_dir(runner, &config.iput_bin, &config.irm_bin)?;
        suite.run(&fixture, &mut recorder);
    } else {
        suite.run(&Unmanaged, &mut recorder);
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn write_usage(mut target: impl Write) {
    writeln!(target, "{}", Cli::command().render_usage()).ok();
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
