//! Data Quality Engine
//!
//! Profiles a tabular dataset, scores its quality and flags anomalous values.
//! Built with Rust and Polars.
//!
//! # Overview
//!
//! One call to [`analyze`] runs the whole engine over a polars `DataFrame`:
//!
//! - **Sampling**: Large tables are reduced to a reproducible random sample
//! - **Column Profiling**: Missing values, numeric summaries and quartiles,
//!   categorical frequencies
//! - **Quality Scoring**: Completeness, Consistency, Uniqueness, Validity and
//!   an Overall score, each in `[0, 100]`
//! - **Anomaly Detection**: IQR-based outliers per numeric column with a
//!   configurable multiplier
//! - **Recommendations**: Ordered guidance derived from the scores
//!
//! The engine holds no state between calls and never touches the caller's
//! table.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dq_engine::{AnalysisConfig, analyze};
//! use polars::prelude::*;
//!
//! let df = df![
//!     "age" => [Some(31), None, Some(45), Some(29)],
//!     "city" => ["Lyon", "Oslo", "42", "Oslo"],
//! ]?;
//!
//! let config = AnalysisConfig::builder()
//!     .sample_size(10_000)
//!     .anomaly_threshold(1.5)
//!     .build()?;
//!
//! let report = analyze(&df, &config)?;
//! println!("Overall quality: {:.1}%", report.metrics.overall);
//! for rec in &report.recommendations {
//!     println!("[{}] {}", rec.severity.label(), rec.title);
//! }
//! ```
//!
//! # Errors
//!
//! Only malformed tables ([`QualityError::InvalidInput`]) and invalid
//! configuration ([`QualityError::InvalidConfig`]) are errors. Empty tables,
//! tables without columns and all-missing columns produce a normal report.

pub mod anomaly;
pub mod config;
pub mod demo;
pub mod engine;
pub mod error;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod sampler;
pub mod table;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use anomaly::AnomalyDetector;
pub use config::{
    AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError, DEFAULT_ANOMALY_THRESHOLD,
    DEFAULT_SAMPLE_SIZE, SAMPLE_SEED, VALIDITY_IQR_MULTIPLIER,
};
pub use engine::{QualityEngine, analyze};
pub use error::{QualityError, Result as QualityResult, ResultExt};
pub use profiler::{ColumnProfiler, Quartiles};
pub use quality::{QualityScorer, recommend};
pub use reporting::{ExportedReport, ReportWriter};
pub use table::build_table;
pub use types::{
    AnomalyResult, CategoricalStats, ColumnKind, ColumnProfile, ColumnStats, NumericStats,
    QualityMetrics, QualityReport, Recommendation, Severity, ValueCount,
};
