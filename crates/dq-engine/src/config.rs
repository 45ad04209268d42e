//! Configuration types for a quality analysis run.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic engine setup.

use serde::{Deserialize, Serialize};

/// Default number of rows analyzed.
pub const DEFAULT_SAMPLE_SIZE: usize = 10_000;

/// Default IQR multiplier for anomaly detection.
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 2.0;

/// Anomaly thresholds must be strictly greater than this value.
pub const MIN_ANOMALY_THRESHOLD_EXCLUSIVE: f64 = 0.0;

/// Largest accepted anomaly threshold.
pub const MAX_ANOMALY_THRESHOLD: f64 = 10.0;

/// IQR multiplier used by the Validity score.
///
/// Independent of [`AnalysisConfig::anomaly_threshold`]: Validity is an
/// internal quality signal, the anomaly threshold is a user-tunable
/// exploration knob.
pub const VALIDITY_IQR_MULTIPLIER: f64 = 1.5;

/// Seed used when sampling rows out of large tables.
pub const SAMPLE_SEED: u64 = 42;

/// Configuration for a quality analysis run.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use dq_engine::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .sample_size(5_000)
///     .anomaly_threshold(1.5)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum number of rows analyzed. Larger tables are sampled down.
    /// The UI range is 1,000 - 100,000; any value >= 1 is accepted.
    /// Default: 10,000
    pub sample_size: usize,

    /// IQR multiplier `k` for anomaly bounds `[Q1 - k*IQR, Q3 + k*IQR]`.
    /// The UI range is 1.5 - 3.0; any finite value in (0, 10] is accepted.
    /// Default: 2.0
    pub anomaly_threshold: f64,

    /// Run profiling, scoring and anomaly detection on separate threads.
    /// Results are identical either way.
    /// Default: true
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            anomaly_threshold: DEFAULT_ANOMALY_THRESHOLD,
            parallel: true,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.sample_size == 0 {
            return Err(ConfigValidationError::InvalidSampleSize(self.sample_size));
        }

        if !self.anomaly_threshold.is_finite()
            || self.anomaly_threshold <= MIN_ANOMALY_THRESHOLD_EXCLUSIVE
            || self.anomaly_threshold > MAX_ANOMALY_THRESHOLD
        {
            return Err(ConfigValidationError::InvalidAnomalyThreshold(
                self.anomaly_threshold,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid sample size: {0} (must be at least 1)")]
    InvalidSampleSize(usize),

    #[error("Invalid anomaly threshold: {0} (must be finite, above 0 and at most 10)")]
    InvalidAnomalyThreshold(f64),
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    sample_size: Option<usize>,
    anomaly_threshold: Option<f64>,
    parallel: Option<bool>,
}

impl AnalysisConfigBuilder {
    /// Set the maximum number of rows to analyze.
    pub fn sample_size(mut self, size: usize) -> Self {
        self.sample_size = Some(size);
        self
    }

    /// Set the IQR multiplier used for anomaly detection.
    ///
    /// # Arguments
    /// * `threshold` - Multiplier `k` (e.g., 1.5 for the classic Tukey fences)
    pub fn anomaly_threshold(mut self, threshold: f64) -> Self {
        self.anomaly_threshold = Some(threshold);
        self
    }

    /// Enable or disable running the analysis branches on separate threads.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let config = AnalysisConfig {
            sample_size: self.sample_size.unwrap_or(DEFAULT_SAMPLE_SIZE),
            anomaly_threshold: self.anomaly_threshold.unwrap_or(DEFAULT_ANOMALY_THRESHOLD),
            parallel: self.parallel.unwrap_or(true),
        };

        config.validate()?;
        Ok(config)
    }
}
