//! Benchmark configuration loaded via `ortho-config`.
//!
//! Values merge defaults, `xferbench.toml` files, and `XFERBENCH_*`
//! environment variables. The bucket is the only value taken from the command
//! line and is supplied separately when building the tool list.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::runner::CommandRunner;
use crate::scenario::{DEFAULT_DATA_NAME, TestFactory};
use crate::tool::{AwsCli, DEFAULT_READ_TIMEOUT_SECS, GoCommands, ICommands, Tool};

/// Number of times each test is performed by default.
pub const DEFAULT_RUNS_PER_TEST: usize = 5;

/// Default small payload: one kibibyte.
pub const DEFAULT_SMALL_SIZE: u64 = 1024;

/// Default large payload: one gibibyte.
pub const DEFAULT_LARGE_SIZE: u64 = 1024 * 1024 * 1024;

/// Benchmark settings.
///
/// Environment values are parsed as typed scalars before deserialisation, so
/// a text field set to a bare `true`, `false` or number (for example
/// `XFERBENCH_AWS_BIN=true`) fails to load. Use an absolute path such as
/// `/bin/true` instead.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "XFERBENCH",
    discovery(
        app_name = "xferbench",
        env_var = "XFERBENCH_CONFIG_PATH",
        config_file_name = "xferbench.toml",
        dotfile_name = ".xferbench.toml",
        project_file_name = "xferbench.toml"
    )
)]
pub struct BenchConfig {
    /// Number of times each tool performs each test.
    #[ortho_config(default = DEFAULT_RUNS_PER_TEST)]
    pub runs_per_test: usize,
    /// Size in bytes of the small payload.
    #[ortho_config(default = DEFAULT_SMALL_SIZE)]
    pub small_size: u64,
    /// Size in bytes of the large payload.
    #[ortho_config(default = DEFAULT_LARGE_SIZE)]
    pub large_size: u64,
    /// Name of the local payload file and of the remote object.
    #[ortho_config(default = DEFAULT_DATA_NAME.to_owned())]
    pub data_name: String,
    /// Path to the AWS CLI executable.
    #[ortho_config(default = "aws".to_owned())]
    pub aws_bin: String,
    /// Read timeout passed to the AWS CLI, in seconds.
    #[ortho_config(default = DEFAULT_READ_TIMEOUT_SECS)]
    pub aws_read_timeout: u64,
    /// Path to the `iput` executable, also used to stage download payloads.
    #[ortho_config(default = "iput".to_owned())]
    pub iput_bin: String,
    /// Path to the `iget` executable.
    #[ortho_config(default = "iget".to_owned())]
    pub iget_bin: String,
    /// Path to the `irm` executable used to remove remote payloads.
    #[ortho_config(default = "irm".to_owned())]
    pub irm_bin: String,
    /// Path to the `gocmd` executable.
    #[ortho_config(default = "gocmd".to_owned())]
    pub gocmd_bin: String,
    /// Whether the harness creates and removes payloads itself. Disable when
    /// payloads are provisioned out of band.
    #[ortho_config(default = true)]
    pub manage_payloads: bool,
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required text field is empty.
    #[error("missing {field}: set XFERBENCH_{env_suffix} or add {field} to xferbench.toml", env_suffix = field.to_uppercase())]
    MissingField {
        /// Configuration field that failed validation.
        field: String,
    },
    /// Indicates a numeric field that must be positive is zero.
    #[error("{field} must be greater than zero")]
    Zero {
        /// Configuration field that failed validation.
        field: String,
    },
    /// Indicates the bucket name is blank.
    #[error("bucket name must not be empty")]
    EmptyBucket,
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl BenchConfig {
    /// Loads configuration without attempting to parse CLI arguments. Values
    /// still merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("xferbench")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Checks that every text field is set and every count and size is
    /// positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] or [`ConfigError::Zero`] naming
    /// the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::reject_zero(self.runs_per_test == 0, "runs_per_test")?;
        Self::reject_zero(self.small_size == 0, "small_size")?;
        Self::reject_zero(self.large_size == 0, "large_size")?;
        Self::require_value(&self.data_name, "data_name")?;
        Self::require_value(&self.aws_bin, "aws_bin")?;
        Self::require_value(&self.iput_bin, "iput_bin")?;
        Self::require_value(&self.iget_bin, "iget_bin")?;
        Self::require_value(&self.irm_bin, "irm_bin")?;
        Self::require_value(&self.gocmd_bin, "gocmd_bin")?;
        Ok(())
    }

    /// Builds the tools under comparison: the object-protocol client first,
    /// then the two native clients.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBucket`] when `bucket` is blank.
    pub fn tools<R>(&self, bucket: &str, runner: &R) -> Result<Vec<Box<dyn Tool>>, ConfigError>
    where
        R: CommandRunner + Clone + 'static,
    {
        let aws = AwsCli::new(runner.clone(), &self.aws_bin, bucket)
            .ok_or(ConfigError::EmptyBucket)?
            .with_read_timeout(self.aws_read_timeout);
        let tools: Vec<Box<dyn Tool>> = vec![
            Box::new(aws),
            Box::new(ICommands::new(
                runner.clone(),
                &self.iput_bin,
                &self.iget_bin,
            )),
            Box::new(GoCommands::new(runner.clone(), &self.gocmd_bin)),
        ];
        Ok(tools)
    }

    /// Builds the test factories: small upload and download, then large
    /// upload and download.
    #[must_use]
    pub fn test_factories(&self) -> Vec<TestFactory> {
        [self.small_size, self.large_size]
            .into_iter()
            .flat_map(|size| [TestFactory::upload(size), TestFactory::download(size)])
            .map(|factory| factory.with_data_name(&self.data_name))
            .collect()
    }

    fn require_value(value: &str, field: &str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: field.to_owned(),
            });
        }
        Ok(())
    }

    fn reject_zero(is_zero: bool, field: &str) -> Result<(), ConfigError> {
        if is_zero {
            return Err(ConfigError::Zero {
                field: field.to_owned(),
            });
        }
        Ok(())
    }
}
