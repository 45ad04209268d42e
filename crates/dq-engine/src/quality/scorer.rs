use crate::config::VALIDITY_IQR_MULTIPLIER;
use crate::error::{Result, ResultExt};
use crate::profiler::statistics::count_iqr_outliers;
use crate::types::QualityMetrics;
use crate::utils::{is_numeric_dtype, is_numeric_string, missing_count, numeric_values, text_values};
use polars::prelude::*;
use tracing::debug;

/// Score returned for a dimension with nothing to measure.
const PERFECT_SCORE: f64 = 100.0;

/// Computes the four quality dimensions of a table.
pub struct QualityScorer;

impl QualityScorer {
    /// Score a (sampled) table.
    ///
    /// Pure function of the table's contents; reordering columns does not
    /// change the result.
    pub fn score(df: &DataFrame) -> Result<QualityMetrics> {
        Ok(Self::score_with_duplicates(df)?.0)
    }

    /// Score a table and also return its duplicate row count, hashing the
    /// rows only once.
    pub fn score_with_duplicates(df: &DataFrame) -> Result<(QualityMetrics, usize)> {
        let duplicates = duplicate_row_count(df).context("Uniqueness")?;

        let completeness = Self::completeness(df).context("Completeness")?;
        let consistency = Self::consistency(df).context("Consistency")?;
        let uniqueness = uniqueness_score(duplicates, df.height());
        let validity = Self::validity(df).context("Validity")?;

        let metrics =
            QualityMetrics::from_dimensions(completeness, consistency, uniqueness, validity);
        debug!("Quality metrics: {:?}", metrics);
        Ok((metrics, duplicates))
    }

    /// `(1 - missing_cells / (rows * columns)) * 100`.
    pub fn completeness(df: &DataFrame) -> Result<f64> {
        let total_cells = df.height() * df.width();
        if total_cells == 0 {
            return Ok(PERFECT_SCORE);
        }

        let mut missing_cells = 0;
        for col in df.get_columns() {
            missing_cells += missing_count(col.as_materialized_series())?;
        }

        Ok((1.0 - missing_cells as f64 / total_cells as f64) * 100.0)
    }

    /// `(1 - inconsistent_columns / columns) * 100`.
    ///
    /// A non-numeric column is inconsistent when any of its values reads as
    /// a number. A column of numbers stored as text and a text column with a
    /// single stray number count the same.
    pub fn consistency(df: &DataFrame) -> Result<f64> {
        let column_count = df.width();
        if column_count == 0 {
            return Ok(PERFECT_SCORE);
        }

        let mut inconsistent = 0;
        for col in df.get_columns() {
            if has_numeric_looking_text(col.as_materialized_series())? {
                inconsistent += 1;
            }
        }

        debug!("{} of {} columns mix numeric text", inconsistent, column_count);
        Ok((1.0 - inconsistent as f64 / column_count as f64) * 100.0)
    }

    /// `(1 - duplicate_rows / rows) * 100`.
    pub fn uniqueness(df: &DataFrame) -> Result<f64> {
        Ok(uniqueness_score(duplicate_row_count(df)?, df.height()))
    }

    /// Mean share of non-outlier values over numeric columns, times 100.
    ///
    /// Uses [`VALIDITY_IQR_MULTIPLIER`] regardless of the anomaly threshold.
    /// Numeric columns without any value are left out of the mean.
    pub fn validity(df: &DataFrame) -> Result<f64> {
        let mut contributions = Vec::new();

        for col in df.get_columns() {
            let series = col.as_materialized_series();
            if !is_numeric_dtype(series.dtype()) {
                continue;
            }

            let values = numeric_values(series)?;
            if values.is_empty() {
                continue;
            }

            let outliers = count_iqr_outliers(&values, VALIDITY_IQR_MULTIPLIER);
            contributions.push(1.0 - outliers as f64 / values.len() as f64);
        }

        if contributions.is_empty() {
            return Ok(PERFECT_SCORE);
        }

        Ok(contributions.iter().sum::<f64>() / contributions.len() as f64 * 100.0)
    }
}

fn uniqueness_score(duplicates: usize, row_count: usize) -> f64 {
    if row_count == 0 {
        return PERFECT_SCORE;
    }
    (1.0 - duplicates as f64 / row_count as f64) * 100.0
}

/// Rows equal to an earlier row across all columns. Nulls compare equal.
pub fn duplicate_row_count(df: &DataFrame) -> Result<usize> {
    if df.height() == 0 || df.width() == 0 {
        return Ok(0);
    }

    let distinct = df
        .unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?
        .height();
    Ok(df.height() - distinct)
}

/// Whether a non-numeric column holds at least one numeric-looking value.
fn has_numeric_looking_text(series: &Series) -> Result<bool> {
    if is_numeric_dtype(series.dtype()) {
        return Ok(false);
    }

    let values = text_values(series)?;
    Ok(values.iter().flatten().any(|v| is_numeric_string(v)))
}
