//! Shared command set-up for CLI integration tests.
//!
//! Integration tests are compiled as separate crates (one per top-level file in
//! `tests/`). Placing shared helpers under `tests/common/` avoids creating an
//! additional integration test binary while still allowing reuse via:
//!
//! ```rust
//! #[path = "common/bench_env.rs"]
//! mod bench_env;
//! ```

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Small payload size used by CLI tests.
pub const SMALL_SIZE: &str = "16";

/// Large payload size used by CLI tests.
pub const LARGE_SIZE: &str = "64";

/// Stand-in client that always succeeds.
///
/// Absolute paths keep the environment provider from reading the value as a
/// boolean.
pub const TRUE_BIN: &str = "/bin/true";

/// Stand-in client that always fails.
pub const FALSE_BIN: &str = "/bin/false";

/// Builds an `xferbench` command running in `workdir` with every client
/// replaced by [`TRUE_BIN`] and two runs per test.
pub fn bench_cmd(workdir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("xferbench");
    cmd.current_dir(workdir.path());
    cmd.env_remove("XFERBENCH_LOG");
    cmd.env("XFERBENCH_RUNS_PER_TEST", "2");
    cmd.env("XFERBENCH_SMALL_SIZE", SMALL_SIZE);
    cmd.env("XFERBENCH_LARGE_SIZE", LARGE_SIZE);
    for bin in ["AWS_BIN", "IPUT_BIN", "IGET_BIN", "IRM_BIN", "GOCMD_BIN"] {
        cmd.env(format!("XFERBENCH_{bin}"), TRUE_BIN);
    }
    cmd
}

/// Creates a scratch working directory.
pub fn workdir() -> TempDir {
    TempDir::new().unwrap_or_else(|err| panic!("create working directory: {err}"))
}
