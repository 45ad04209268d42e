//! Anomaly detection module.
//!
//! Extracts outliers from numeric columns with the IQR rule
//! `[Q1 - k*IQR, Q3 + k*IQR]`, where `k` is the configurable anomaly
//! threshold.

use crate::error::{Result, ResultExt};
use crate::profiler::statistics::{quartiles_sorted, sorted, values_outside};
use crate::types::AnomalyResult;
use crate::utils::{is_numeric_dtype, numeric_values, percentage};
use indexmap::IndexMap;
use polars::prelude::*;
use tracing::debug;

/// Detects outliers in the numeric columns of a table.
pub struct AnomalyDetector;

impl AnomalyDetector {
    /// Detect outliers in every numeric column of `df`.
    ///
    /// Results are keyed by column name in column order. Numeric columns
    /// without any non-missing value are left out of the map entirely.
    pub fn detect(df: &DataFrame, anomaly_threshold: f64) -> Result<IndexMap<String, AnomalyResult>> {
        let mut results = IndexMap::new();

        for col in df.get_columns() {
            let series = col.as_materialized_series();
            if !is_numeric_dtype(series.dtype()) {
                continue;
            }

            let name = series.name().to_string();
            let values = numeric_values(series)
                .context(format!("Failed to read values of column '{}'", name))?;

            if let Some(result) = Self::detect_values(&values, anomaly_threshold) {
                if result.count > 0 {
                    debug!(
                        "Column '{}': {} outliers outside [{:.2}, {:.2}]",
                        name, result.count, result.lower_bound, result.upper_bound
                    );
                }
                results.insert(name, result);
            }
        }

        Ok(results)
    }

    /// Apply the IQR rule to a column's non-missing values.
    ///
    /// Returns `None` for an empty slice.
    pub fn detect_values(values: &[f64], anomaly_threshold: f64) -> Option<AnomalyResult> {
        let quartiles = quartiles_sorted(&sorted(values))?;
        let (lower_bound, upper_bound) = quartiles.bounds(anomaly_threshold);
        let outliers = values_outside(values, lower_bound, upper_bound);
        let count = outliers.len();

        Some(AnomalyResult {
            outliers,
            count,
            percentage: percentage(count, values.len()),
            q1: quartiles.q1,
            q3: quartiles.q3,
            iqr: quartiles.iqr,
            lower_bound,
            upper_bound,
        })
    }
}
