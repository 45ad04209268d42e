//! Shared utilities for the quality engine.
//!
//! This module contains the dtype and value helpers used across the
//! profiler, scorer and anomaly detector so that all of them agree on what
//! counts as numeric, missing or numeric-looking.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric: any integer width (128-bit included),
/// floats and fixed-point decimals.
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    dtype.is_primitive_numeric() || matches!(dtype, DataType::Decimal(..))
}

/// Check if a DataType is a floating point type (may carry NaN or infinity).
#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Try to coerce a text value to a number.
///
/// Surrounding whitespace is ignored. `NaN` spellings do not count since they
/// coerce to a missing value rather than a number.
///
/// # Example
///
/// ```rust,ignore
/// use dq_engine::utils::parse_numeric_string;
///
/// assert_eq!(parse_numeric_string(" 42 "), Some(42.0));
/// assert_eq!(parse_numeric_string("1e3"), Some(1000.0));
/// assert_eq!(parse_numeric_string("abc"), None);
/// ```
pub fn parse_numeric_string(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Check if a string can be coerced to a numeric value.
pub fn is_numeric_string(s: &str) -> bool {
    parse_numeric_string(s).is_some()
}

// =============================================================================
// Series Value Utilities
// =============================================================================

/// Count missing cells in a Series.
///
/// Nulls are always missing; for float columns `NaN` and `±inf` are missing
/// too, so every value left over is usable by the statistics.
pub fn missing_count(series: &Series) -> PolarsResult<usize> {
    if !is_float_dtype(series.dtype()) {
        return Ok(series.null_count());
    }

    let casted = series.cast(&DataType::Float64)?;
    let missing = casted
        .f64()?
        .into_iter()
        .filter(|v| v.is_none_or(|val| !val.is_finite()))
        .count();
    Ok(missing)
}

/// Collect the non-missing values of a numeric Series as `f64`, in row order.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let casted = series.cast(&DataType::Float64)?;
    let values = casted
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect();
    Ok(values)
}

/// Render every cell of a Series as text, keeping nulls as `None`.
///
/// Dtypes polars cannot cast to `String` (durations, nested types) fall back
/// to the display form of each value.
pub fn text_values(series: &Series) -> PolarsResult<Vec<Option<String>>> {
    match series.cast(&DataType::String) {
        Ok(casted) => Ok(casted
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()),
        Err(_) => Ok(display_values(series)),
    }
}

fn display_values(series: &Series) -> Vec<Option<String>> {
    series
        .rechunk()
        .iter()
        .map(|v| (!v.is_null()).then(|| v.to_string()))
        .collect()
}

/// Round to two decimal places (display only).
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole * 100`, or 0 when `whole` is zero.
#[inline]
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
