//! Quality engine entry point.
//!
//! Runs the whole analysis for one table:
//! validate config → validate table → sample → {profile, score, detect}
//! → recommend → report.

use crate::anomaly::AnomalyDetector;
use crate::config::AnalysisConfig;
use crate::error::{QualityError, Result, ResultExt};
use crate::profiler::ColumnProfiler;
use crate::quality::{QualityScorer, recommend};
use crate::sampler;
use crate::table::validate_table;
use crate::types::{AnomalyResult, ColumnProfile, QualityMetrics, QualityReport};
use crate::utils::percentage;
use indexmap::IndexMap;
use polars::prelude::*;
use std::time::Instant;
use tracing::debug;

type Branches = (
    Vec<ColumnProfile>,
    (QualityMetrics, usize),
    IndexMap<String, AnomalyResult>,
);

/// Stateless quality engine bound to one configuration.
#[derive(Debug, Clone, Default)]
pub struct QualityEngine {
    config: AnalysisConfig,
}

static_assertions::assert_impl_all!(QualityEngine: Send, Sync);

impl QualityEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a table.
    ///
    /// Fails fast on invalid configuration or a malformed table; degenerate
    /// tables (no rows, no columns, all-missing columns) produce a report.
    pub fn analyze(&self, df: &DataFrame) -> Result<QualityReport> {
        let started = Instant::now();

        self.config.validate()?;
        validate_table(df)?;

        let sample = sampler::sample(df, self.config.sample_size).context("Sampling failed")?;
        debug!(
            "Analyzing {} of {} rows across {} columns",
            sample.height(),
            df.height(),
            df.width()
        );

        let (column_profiles, (metrics, duplicate_row_count), anomalies) = if self.config.parallel {
            self.run_parallel(&sample)?
        } else {
            self.run_sequential(&sample)?
        };

        let recommendations = recommend(&metrics);

        debug!("Analysis finished in {:?}", started.elapsed());

        Ok(QualityReport {
            row_count: df.height(),
            sampled_row_count: sample.height(),
            column_count: df.width(),
            duplicate_row_count,
            duplicate_percentage: percentage(duplicate_row_count, sample.height()),
            estimated_size_bytes: df.estimated_size(),
            column_profiles,
            metrics,
            anomalies,
            recommendations,
        })
    }

    fn run_sequential(&self, sample: &DataFrame) -> Result<Branches> {
        let threshold = self.config.anomaly_threshold;
        Ok((
            ColumnProfiler::profile(sample, threshold)?,
            QualityScorer::score_with_duplicates(sample)?,
            AnomalyDetector::detect(sample, threshold)?,
        ))
    }

    fn run_parallel(&self, sample: &DataFrame) -> Result<Branches> {
        let threshold = self.config.anomaly_threshold;

        std::thread::scope(|scope| {
            let profiles = scope.spawn(|| ColumnProfiler::profile(sample, threshold));
            let metrics = scope.spawn(|| QualityScorer::score_with_duplicates(sample));
            let anomalies = scope.spawn(|| AnomalyDetector::detect(sample, threshold));

            Ok((
                join(profiles, "column profiler")?,
                join(metrics, "quality scorer")?,
                join(anomalies, "anomaly detector")?,
            ))
        })
    }
}

fn join<T>(handle: std::thread::ScopedJoinHandle<'_, Result<T>>, branch: &str) -> Result<T> {
    handle
        .join()
        .map_err(|_| QualityError::Internal(format!("{branch} thread panicked")))?
}

/// Analyze `df` with `config`.
///
/// Shorthand for `QualityEngine::new(config.clone()).analyze(df)`.
pub fn analyze(df: &DataFrame, config: &AnalysisConfig) -> Result<QualityReport> {
    QualityEngine::new(config.clone()).analyze(df)
}
