//! Statistical functions shared by profiling, scoring and anomaly detection.
//!
//! All functions work on plain `f64` slices that already exclude missing
//! values. Quantiles use linear interpolation between closest ranks
//! (`h = (n - 1) * p`), the conventional dataframe quantile method.

use serde::{Deserialize, Serialize};

/// First, second and third quartile of a numeric column plus its IQR.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
    pub iqr: f64,
}

impl Quartiles {
    /// Outlier bounds `[Q1 - k*IQR, Q3 + k*IQR]` for the multiplier `k`.
    pub fn bounds(&self, multiplier: f64) -> (f64, f64) {
        (
            self.q1 - multiplier * self.iqr,
            self.q3 + multiplier * self.iqr,
        )
    }
}

/// Sort values ascending.
pub(crate) fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Compute the `p`-th quantile of pre-sorted data.
///
/// Returns `None` if `sorted_values` is empty or `p` is outside `[0, 1]`.
pub(crate) fn quantile_sorted(sorted_values: &[f64], p: f64) -> Option<f64> {
    let n = sorted_values.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }
    if n == 1 {
        return Some(sorted_values[0]);
    }

    let h = (n - 1) as f64 * p;
    let j = h.floor() as usize;
    let g = h - h.floor();

    if j + 1 >= n {
        Some(sorted_values[n - 1])
    } else if g == 0.0 {
        Some(sorted_values[j])
    } else {
        Some(sorted_values[j] + g * (sorted_values[j + 1] - sorted_values[j]))
    }
}

/// Quartiles of pre-sorted data, `None` when empty.
pub(crate) fn quartiles_sorted(sorted_values: &[f64]) -> Option<Quartiles> {
    let q1 = quantile_sorted(sorted_values, 0.25)?;
    let q2 = quantile_sorted(sorted_values, 0.5)?;
    let q3 = quantile_sorted(sorted_values, 0.75)?;
    Some(Quartiles {
        q1,
        q2,
        q3,
        iqr: q3 - q1,
    })
}

/// Arithmetic mean, `None` when empty or when the sum overflows.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    mean.is_finite().then_some(mean)
}

/// Sample standard deviation (divides by `n - 1`).
///
/// `None` with fewer than two values, where it is undefined.
pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std = variance.sqrt();
    std.is_finite().then_some(std)
}

/// Values strictly outside `[lower, upper]`, in input order.
pub(crate) fn values_outside(values: &[f64], lower: f64, upper: f64) -> Vec<f64> {
    values
        .iter()
        .copied()
        .filter(|v| *v < lower || *v > upper)
        .collect()
}

/// Count outliers for the multiplier `k`. Returns 0 for empty input.
pub(crate) fn count_iqr_outliers(values: &[f64], multiplier: f64) -> usize {
    let sorted_values = sorted(values);
    match quartiles_sorted(&sorted_values) {
        Some(quartiles) => {
            let (lower, upper) = quartiles.bounds(multiplier);
            values.iter().filter(|v| **v < lower || **v > upper).count()
        }
        None => 0,
    }
}
