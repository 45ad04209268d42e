//! Column profiling module.
//!
//! This module computes per-column descriptive statistics:
//! - Missing value counts, against the sample's row count
//! - Numeric summaries (mean, median, std, min/max, quartiles, IQR outliers)
//! - Categorical summaries (distinct values, most frequent value, top values)

pub mod statistics;

use crate::error::{Result, ResultExt};
use crate::types::{
    CategoricalStats, ColumnKind, ColumnProfile, ColumnStats, NumericStats, ValueCount,
};
use crate::utils::{is_numeric_dtype, missing_count, numeric_values, percentage, text_values};
use indexmap::IndexMap;
use polars::prelude::*;

pub use statistics::Quartiles;

/// Number of entries kept in [`CategoricalStats::top_values`].
pub const TOP_VALUES_LIMIT: usize = 10;

/// Column profiler producing one [`ColumnProfile`] per column.
pub struct ColumnProfiler;

impl ColumnProfiler {
    /// Profile every column of `df`, in column order.
    ///
    /// `anomaly_threshold` is the IQR multiplier used for the outlier fields
    /// of numeric profiles.
    pub fn profile(df: &DataFrame, anomaly_threshold: f64) -> Result<Vec<ColumnProfile>> {
        df.get_columns()
            .iter()
            .map(|col| {
                let series = col.as_materialized_series();
                Self::profile_column(series, anomaly_threshold)
                    .context(format!("Failed to profile column '{}'", series.name()))
            })
            .collect()
    }

    /// Profile a single column.
    pub fn profile_column(series: &Series, anomaly_threshold: f64) -> Result<ColumnProfile> {
        let total_count = series.len();
        let missing = missing_count(series)?;
        let kind = column_kind(series.dtype());

        let stats = match kind {
            ColumnKind::Numeric => ColumnStats::Numeric(numeric_stats(
                &numeric_values(series)?,
                total_count,
                anomaly_threshold,
            )),
            ColumnKind::Categorical => {
                ColumnStats::Categorical(categorical_stats(&text_values(series)?))
            }
        };

        Ok(ColumnProfile {
            name: series.name().to_string(),
            dtype: series.dtype().to_string(),
            kind,
            total_count,
            non_missing_count: total_count - missing,
            missing_count: missing,
            missing_percentage: percentage(missing, total_count),
            stats,
        })
    }
}

/// Classify a dtype: integers and floats are numeric, the rest categorical.
pub fn column_kind(dtype: &DataType) -> ColumnKind {
    if is_numeric_dtype(dtype) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

/// Summarize the non-missing values of a numeric column.
///
/// `outlier_percentage` is relative to `total_count`, the column length
/// including missing cells.
pub(crate) fn numeric_stats(
    values: &[f64],
    total_count: usize,
    anomaly_threshold: f64,
) -> NumericStats {
    let sorted = statistics::sorted(values);
    let Some(quartiles) = statistics::quartiles_sorted(&sorted) else {
        return NumericStats::default();
    };

    let (lower, upper) = quartiles.bounds(anomaly_threshold);
    let outlier_count = values.iter().filter(|v| **v < lower || **v > upper).count();

    NumericStats {
        mean: statistics::mean(values),
        median: Some(quartiles.q2),
        std_dev: statistics::sample_std(values),
        min: sorted.first().copied(),
        max: sorted.last().copied(),
        q1: Some(quartiles.q1),
        q2: Some(quartiles.q2),
        q3: Some(quartiles.q3),
        iqr: Some(quartiles.iqr),
        lower_bound: Some(lower),
        upper_bound: Some(upper),
        outlier_count: Some(outlier_count),
        outlier_percentage: Some(percentage(outlier_count, total_count)),
    }
}

/// Summarize a categorical column rendered as text.
///
/// Counting goes through an insertion-ordered map, so ties between equally
/// frequent values resolve to the value seen first.
pub(crate) fn categorical_stats(values: &[Option<String>]) -> CategoricalStats {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for value in values.iter().flatten() {
        *counts.entry(value.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.iter().map(|(v, c)| (*v, *c)).collect();
    // Stable sort keeps first-seen order among equal counts.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let (most_frequent, most_frequent_count) = match ranked.first() {
        Some((value, count)) => (Some(value.to_string()), *count),
        None => (None, 0),
    };

    CategoricalStats {
        distinct_count: counts.len(),
        most_frequent,
        most_frequent_count,
        top_values: ranked
            .into_iter()
            .take(TOP_VALUES_LIMIT)
            .map(|(value, count)| ValueCount {
                value: value.to_string(),
                count,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(profile: &ColumnProfile) -> &NumericStats {
        match &profile.stats {
            ColumnStats::Numeric(stats) => stats,
            other => panic!("expected numeric stats, got {:?}", other),
        }
    }

    fn categorical(profile: &ColumnProfile) -> &CategoricalStats {
        match &profile.stats {
            ColumnStats::Categorical(stats) => stats,
            other => panic!("expected categorical stats, got {:?}", other),
        }
    }

    #[test]
    fn test_profiles_follow_column_order() {
        let df = df![
            "b" => [1, 2, 3],
            "a" => ["x", "y", "z"],
        ]
        .unwrap();

        let profiles = ColumnProfiler::profile(&df, 2.0).unwrap();
        let names: Vec<_> = profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(profiles[0].kind, ColumnKind::Numeric);
        assert_eq!(profiles[1].kind, ColumnKind::Categorical);
    }

    #[test]
    fn test_numeric_profile() {
        let df = df!["v" => [1.0, 2.0, 3.0, 4.0, 1000.0]].unwrap();
        let profiles = ColumnProfiler::profile(&df, 1.5).unwrap();
        let stats = numeric(&profiles[0]);

        assert_eq!(stats.mean, Some(202.0));
        assert_eq!(stats.median, Some(3.0));
        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.max, Some(1000.0));
        assert_eq!(stats.q1, Some(2.0));
        assert_eq!(stats.q3, Some(4.0));
        assert_eq!(stats.iqr, Some(2.0));
        assert_eq!(stats.lower_bound, Some(-1.0));
        assert_eq!(stats.upper_bound, Some(7.0));
        assert_eq!(stats.outlier_count, Some(1));
        assert_eq!(stats.outlier_percentage, Some(20.0));
    }

    #[test]
    fn test_outlier_percentage_uses_column_length() {
        let df = df![
            "v" => [Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(1000.0), None, None, None, None, None]
        ]
        .unwrap();
        let stats = numeric(&ColumnProfiler::profile(&df, 1.5).unwrap()[0]).clone();

        assert_eq!(stats.outlier_count, Some(1));
        assert_eq!(stats.outlier_percentage, Some(10.0));
    }

    #[test]
    fn test_infinite_values_are_missing() {
        let df = df![
            "v" => [f64::INFINITY, f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, 2.0]
        ]
        .unwrap();
        let profile = &ColumnProfiler::profile(&df, 2.0).unwrap()[0];
        let stats = numeric(profile);

        assert_eq!(profile.missing_count, 4);
        assert_eq!(stats.mean, Some(2.0));
        assert_eq!(stats.q1, Some(2.0));
        assert_eq!(stats.lower_bound, Some(2.0));
    }

    #[test]
    fn test_wide_integers_are_numeric() {
        let series = Series::new("big".into(), &[1i64, 2, 3, 400])
            .cast(&DataType::Int128)
            .unwrap();
        let profile = ColumnProfiler::profile_column(&series, 1.5).unwrap();

        assert_eq!(profile.kind, ColumnKind::Numeric);
        assert_eq!(numeric(&profile).max, Some(400.0));
    }

    #[test]
    fn test_duration_column_is_categorical() {
        let series = Series::new("d".into(), &[Some(1_000i64), Some(2_000), None, Some(1_000)])
            .cast(&DataType::Duration(TimeUnit::Milliseconds))
            .unwrap();
        let profile = ColumnProfiler::profile_column(&series, 2.0).unwrap();
        let stats = categorical(&profile);

        assert_eq!(profile.kind, ColumnKind::Categorical);
        assert_eq!(profile.missing_count, 1);
        assert_eq!(stats.distinct_count, 2);
        assert_eq!(stats.most_frequent_count, 2);
    }

    #[test]
    fn test_missing_counted_against_column_length() {
        let df = df!["v" => [Some(1i64), None, Some(3), None]].unwrap();
        let profile = &ColumnProfiler::profile(&df, 2.0).unwrap()[0];

        assert_eq!(profile.total_count, 4);
        assert_eq!(profile.non_missing_count, 2);
        assert_eq!(profile.missing_count, 2);
        assert_eq!(profile.missing_percentage, 50.0);
        assert_eq!(numeric(profile).mean, Some(2.0));
    }

    #[test]
    fn test_all_missing_numeric_is_undefined() {
        let df = df!["v" => [None::<f64>, None, None]].unwrap();
        let profile = &ColumnProfiler::profile(&df, 2.0).unwrap()[0];

        assert_eq!(profile.kind, ColumnKind::Numeric);
        assert_eq!(profile.missing_percentage, 100.0);
        assert_eq!(numeric(profile), &NumericStats::default());
    }

    #[test]
    fn test_single_value_has_no_std() {
        let df = df!["v" => [Some(4.0), None]].unwrap();
        let profile = &ColumnProfiler::profile(&df, 2.0).unwrap()[0];
        let stats = numeric(profile);
        assert_eq!(stats.std_dev, None);
        assert_eq!(stats.mean, Some(4.0));
    }

    #[test]
    fn test_categorical_profile() {
        let df = df!["c" => [Some("b"), Some("a"), None, Some("a"), Some("b"), Some("c")]].unwrap();
        let profile = &ColumnProfiler::profile(&df, 2.0).unwrap()[0];
        let stats = categorical(profile);

        assert_eq!(profile.missing_count, 1);
        assert_eq!(stats.distinct_count, 3);
        // "b" and "a" tie at 2; "b" was seen first.
        assert_eq!(stats.most_frequent.as_deref(), Some("b"));
        assert_eq!(stats.most_frequent_count, 2);
        let top: Vec<_> = stats.top_values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(top, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_all_missing_categorical() {
        let df = df!["c" => [None::<&str>, None]].unwrap();
        let profile = &ColumnProfiler::profile(&df, 2.0).unwrap()[0];
        let stats = categorical(profile);

        assert_eq!(stats.distinct_count, 0);
        assert_eq!(stats.most_frequent, None);
        assert_eq!(stats.most_frequent_count, 0);
        assert!(stats.top_values.is_empty());
    }

    #[test]
    fn test_booleans_are_categorical() {
        let df = df!["flag" => [true, false, true]].unwrap();
        let profile = &ColumnProfiler::profile(&df, 2.0).unwrap()[0];
        assert_eq!(profile.kind, ColumnKind::Categorical);
        assert_eq!(categorical(profile).most_frequent.as_deref(), Some("true"));
    }

    #[test]
    fn test_top_values_are_capped() {
        let values: Vec<String> = (0..25).map(|i| format!("v{i}")).collect();
        let df = df!["c" => values].unwrap();
        let profile = &ColumnProfiler::profile(&df, 2.0).unwrap()[0];
        let stats = categorical(profile);

        assert_eq!(stats.distinct_count, 25);
        assert_eq!(stats.top_values.len(), TOP_VALUES_LIMIT);
    }

    #[test]
    fn test_empty_frame_has_no_profiles() {
        let df = DataFrame::empty();
        assert!(ColumnProfiler::profile(&df, 2.0).unwrap().is_empty());
    }
}
