//! Geometric summary statistics for timing samples.
//!
//! Timings are ratio-like, so they are summarised in log space: the centre is
//! the geometric mean and the spread is the geometric standard deviation, a
//! multiplicative factor applied to the mean to obtain one-sigma bounds.

use std::time::Duration;

use thiserror::Error;

/// Errors raised when a sample set cannot be summarised.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum StatsError {
    /// Raised when there are no samples.
    #[error("no samples to summarise")]
    Empty,
    /// Raised when a sample is zero, negative, or not finite.
    #[error("sample {index} is not a positive duration: {value} s")]
    NonPositive {
        /// Position of the offending sample.
        index: usize,
        /// Offending value in seconds.
        value: f64,
    },
}

/// Geometric mean and geometric standard deviation of a sample set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    geo_mean: f64,
    geo_std: f64,
}

impl Summary {
    /// Summarises elapsed durations.
    ///
    /// # Errors
    ///
    /// See [`Summary::from_secs`].
    pub fn from_durations(samples: &[Duration]) -> Result<Self, StatsError> {
        let secs: Vec<f64> = samples.iter().map(Duration::as_secs_f64).collect();
        Self::from_secs(&secs)
    }

    /// Summarises samples expressed in seconds.
    ///
    /// The spread uses the population standard deviation of the natural
    /// logarithms of the samples.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Empty`] for an empty slice and
    /// [`StatsError::NonPositive`] when any sample is not strictly positive and
    /// finite.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "log-space statistics over a handful of samples"
    )]
    pub fn from_secs(samples: &[f64]) -> Result<Self, StatsError> {
        if samples.is_empty() {
            return Err(StatsError::Empty);
        }
        if let Some((index, value)) = samples
            .iter()
            .copied()
            .enumerate()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0))
        {
            return Err(StatsError::NonPositive { index, value });
        }

        let count = samples.len() as f64;
        let logs: Vec<f64> = samples.iter().map(|value| value.ln()).collect();
        let log_mean = logs.iter().sum::<f64>() / count;
        let log_var = logs
            .iter()
            .map(|log| (log - log_mean).powi(2))
            .sum::<f64>()
            / count;

        Ok(Self {
            geo_mean: log_mean.exp(),
            geo_std: log_var.sqrt().exp(),
        })
    }

    /// Geometric mean in seconds.
    #[must_use]
    pub const fn geo_mean(&self) -> f64 {
        self.geo_mean
    }

    /// Geometric standard deviation; always at least 1.
    #[must_use]
    pub const fn geo_std(&self) -> f64 {
        self.geo_std
    }

    /// Lower one-sigma bound in seconds (`mean / sigma`).
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "multiplicative bound")]
    pub fn lower(&self) -> f64 {
        self.geo_mean / self.geo_std
    }

    /// Upper one-sigma bound in seconds (`mean * sigma`).
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "multiplicative bound")]
    pub fn upper(&self) -> f64 {
        self.geo_mean * self.geo_std
    }
}
