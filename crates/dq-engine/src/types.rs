use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::utils::round2;

/// How the engine treats a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Integer or floating point column.
    Numeric,
    /// Everything else: text, booleans, dates, categoricals.
    Categorical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    /// Polars dtype name, e.g. `i64`, `str`, `date`.
    pub dtype: String,
    pub kind: ColumnKind,
    pub total_count: usize,
    pub non_missing_count: usize,
    pub missing_count: usize,
    pub missing_percentage: f64,
    pub stats: ColumnStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnStats {
    Numeric(NumericStats),
    Categorical(CategoricalStats),
}

/// Descriptive statistics of a numeric column.
///
/// Every field is `None` when the column has no non-missing values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Sample standard deviation; also `None` with a single value.
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub q1: Option<f64>,
    pub q2: Option<f64>,
    pub q3: Option<f64>,
    pub iqr: Option<f64>,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
    /// Outliers at the configured anomaly threshold.
    pub outlier_count: Option<usize>,
    /// Share of all cells in the column (missing included) that are outliers.
    pub outlier_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoricalStats {
    pub distinct_count: usize,
    pub most_frequent: Option<String>,
    pub most_frequent_count: usize,
    /// Up to ten most common values, most common first.
    pub top_values: Vec<ValueCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Quality scores, each a percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub completeness: f64,
    pub consistency: f64,
    pub uniqueness: f64,
    pub validity: f64,
    /// Mean of the four dimensions.
    pub overall: f64,
}

impl QualityMetrics {
    /// Build metrics from the four dimensions, deriving `overall`.
    pub fn from_dimensions(completeness: f64, consistency: f64, uniqueness: f64, validity: f64) -> Self {
        let completeness = completeness.clamp(0.0, 100.0);
        let consistency = consistency.clamp(0.0, 100.0);
        let uniqueness = uniqueness.clamp(0.0, 100.0);
        let validity = validity.clamp(0.0, 100.0);
        Self {
            completeness,
            consistency,
            uniqueness,
            validity,
            overall: (completeness + consistency + uniqueness + validity) / 4.0,
        }
    }

    /// Dimension names and scores in display order, without `overall`.
    pub fn dimensions(&self) -> [(&'static str, f64); 4] {
        [
            ("Completeness", self.completeness),
            ("Consistency", self.consistency),
            ("Uniqueness", self.uniqueness),
            ("Validity", self.validity),
        ]
    }
}

/// Outliers found in one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyResult {
    /// Outlier values in sample row order.
    pub outliers: Vec<f64>,
    pub count: usize,
    /// Share of the column's non-missing values.
    pub percentage: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl AnomalyResult {
    /// Bounds rounded to two decimals for display.
    pub fn display_bounds(&self) -> (f64, f64) {
        (round2(self.lower_bound), round2(self.upper_bound))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Ok,
}

impl Severity {
    /// Returns a short label for terminal output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Warning => "WARNING",
            Self::Ok => "OK",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Recommendation {
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Everything one `analyze` call produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Rows in the input table.
    pub row_count: usize,
    /// Rows actually analyzed, `min(row_count, sample_size)`.
    pub sampled_row_count: usize,
    pub column_count: usize,
    /// Rows of the sample equal to an earlier row.
    pub duplicate_row_count: usize,
    pub duplicate_percentage: f64,
    /// Estimated heap size of the input table.
    pub estimated_size_bytes: usize,
    pub column_profiles: Vec<ColumnProfile>,
    pub metrics: QualityMetrics,
    /// Keyed by column name, in column order.
    pub anomalies: IndexMap<String, AnomalyResult>,
    pub recommendations: Vec<Recommendation>,
}

impl QualityReport {
    /// Whether the analysis ran on a subset of the rows.
    pub fn is_sampled(&self) -> bool {
        self.sampled_row_count < self.row_count
    }

    /// Look up the profile of a column by name.
    pub fn column_profile(&self, name: &str) -> Option<&ColumnProfile> {
        self.column_profiles.iter().find(|p| p.name == name)
    }
}

static_assertions::assert_impl_all!(QualityReport: Send, Sync);
