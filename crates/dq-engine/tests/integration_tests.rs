//! Integration tests for the data quality engine.
//!
//! These tests verify end-to-end behavior of `analyze` on CSV fixtures,
//! hand-built frames and the demo dataset.

use dq_engine::demo::{DEMO_SEED, generate_demo_dataset};
use dq_engine::{
    AnalysisConfig, ColumnKind, ColumnStats, ExportedReport, QualityEngine, QualityError,
    ReportWriter, Severity, analyze, build_table,
};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_csv(filename: &str) -> DataFrame {
    let path = fixtures_path().join(filename);
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path))
        .expect("Failed to create CSV reader")
        .finish()
        .expect("Failed to read CSV file")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn titles(report: &dq_engine::QualityReport) -> Vec<&str> {
    report
        .recommendations
        .iter()
        .map(|r| r.title.as_str())
        .collect()
}

// ============================================================================
// CSV Fixtures
// ============================================================================

#[test]
fn test_clean_csv_scores_perfectly() {
    let df = load_csv("clean.csv");
    let report = analyze(&df, &AnalysisConfig::default()).unwrap();

    assert_eq!(report.row_count, 4);
    assert_eq!(report.column_count, 4);
    assert_eq!(report.metrics.completeness, 100.0);
    assert_eq!(report.metrics.consistency, 100.0);
    assert_eq!(report.metrics.uniqueness, 100.0);
    assert_eq!(report.metrics.validity, 100.0);
    assert_eq!(report.metrics.overall, 100.0);
    assert_eq!(titles(&report), vec!["Data quality is good"]);
    assert_eq!(report.recommendations[0].severity, Severity::Ok);
}

#[test]
fn test_messy_csv_metrics() {
    let df = load_csv("messy.csv");
    let report = analyze(&df, &AnalysisConfig::default()).unwrap();

    // 2 of 32 cells missing
    assert_close(report.metrics.completeness, 93.75);
    // `city` holds "42"
    assert_close(report.metrics.consistency, 75.0);
    // one repeated row out of 8
    assert_close(report.metrics.uniqueness, 87.5);
    // `amount` loses 1 of 8 values, `id` and `age` are clean
    assert_close(report.metrics.validity, (1.0 + 1.0 + 0.875) / 3.0 * 100.0);

    assert_eq!(report.duplicate_row_count, 1);
    assert_close(report.duplicate_percentage, 12.5);
}

#[test]
fn test_messy_csv_recommendations() {
    let df = load_csv("messy.csv");
    let report = analyze(&df, &AnalysisConfig::default()).unwrap();

    assert_eq!(
        titles(&report),
        vec![
            "Data type inconsistencies found",
            "Duplicate records identified",
            "Data quality needs improvement",
        ]
    );
    assert!(
        report
            .recommendations
            .iter()
            .all(|r| r.severity == Severity::Warning)
    );
}

#[test]
fn test_messy_csv_profiles() {
    let df = load_csv("messy.csv");
    let report = analyze(&df, &AnalysisConfig::default()).unwrap();

    let age = report.column_profile("age").unwrap();
    assert_eq!(age.kind, ColumnKind::Numeric);
    assert_eq!(age.missing_count, 2);
    assert_eq!(age.non_missing_count, 6);
    assert_close(age.missing_percentage, 25.0);
    let ColumnStats::Numeric(stats) = &age.stats else {
        panic!("age should be numeric");
    };
    assert_eq!(stats.min, Some(29.0));
    assert_eq!(stats.max, Some(45.0));
    assert_close(stats.q1.unwrap(), 35.0);
    assert_close(stats.q3.unwrap(), 40.25);

    let city = report.column_profile("city").unwrap();
    assert_eq!(city.kind, ColumnKind::Categorical);
    let ColumnStats::Categorical(stats) = &city.stats else {
        panic!("city should be categorical");
    };
    assert_eq!(stats.distinct_count, 5);
    // Lyon, Oslo and Rome tie; Lyon is seen first
    assert_eq!(stats.most_frequent.as_deref(), Some("Lyon"));
    assert_eq!(stats.most_frequent_count, 2);
}

#[test]
fn test_messy_csv_anomalies() {
    let df = load_csv("messy.csv");
    let report = analyze(&df, &AnalysisConfig::default()).unwrap();

    let keys: Vec<&str> = report.anomalies.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["id", "age", "amount"]);

    let amount = &report.anomalies["amount"];
    assert_eq!(amount.outliers, vec![950.0]);
    assert_eq!(amount.count, 1);
    assert_close(amount.percentage, 12.5);
    assert_eq!(report.anomalies["age"].count, 0);
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_single_outlier_scenario() {
    let df = df!["x" => [1.0, 2.0, 3.0, 4.0, 1000.0]].unwrap();
    let config = AnalysisConfig::builder()
        .anomaly_threshold(1.5)
        .build()
        .unwrap();

    let report = analyze(&df, &config).unwrap();
    let x = &report.anomalies["x"];

    assert_eq!(x.q1, 2.0);
    assert_eq!(x.q3, 4.0);
    assert_eq!(x.iqr, 2.0);
    assert_eq!((x.lower_bound, x.upper_bound), (-1.0, 7.0));
    assert_eq!(x.outliers, vec![1000.0]);
    assert_eq!(x.count, 1);
    assert_close(x.percentage, 20.0);
}

#[test]
fn test_numeric_text_marks_column_inconsistent() {
    let df = df![
        "code" => ["1", "2", "abc", "3"],
        "label" => ["a", "b", "c", "d"],
    ]
    .unwrap();

    let report = analyze(&df, &AnalysisConfig::default()).unwrap();
    assert_close(report.metrics.consistency, 50.0);
}

// ============================================================================
// Degenerate Inputs
// ============================================================================

#[test]
fn test_zero_rows() {
    let df = df![
        "a" => Vec::<f64>::new(),
        "b" => Vec::<String>::new(),
    ]
    .unwrap();

    let report = analyze(&df, &AnalysisConfig::default()).unwrap();
    assert_eq!(report.row_count, 0);
    assert_eq!(report.sampled_row_count, 0);
    assert_eq!(report.metrics.completeness, 100.0);
    assert_eq!(report.metrics.uniqueness, 100.0);
    assert!(report.anomalies.is_empty());
    assert!(!report.recommendations.is_empty());
}

#[test]
fn test_zero_columns() {
    let df = build_table(vec![]).unwrap();
    let report = analyze(&df, &AnalysisConfig::default()).unwrap();

    assert_eq!(report.column_count, 0);
    assert!(report.column_profiles.is_empty());
    assert_eq!(report.metrics.overall, 100.0);
}

#[test]
fn test_all_missing_numeric_column() {
    let df = df![
        "empty" => [None::<f64>, None, None, None],
        "v" => [1.0, 2.0, 3.0, 4.0],
    ]
    .unwrap();

    let report = analyze(&df, &AnalysisConfig::default()).unwrap();
    assert!(!report.anomalies.contains_key("empty"));
    assert!(report.anomalies.contains_key("v"));
    assert_eq!(report.metrics.validity, 100.0);
    assert_close(report.metrics.completeness, 50.0);

    let profile = report.column_profile("empty").unwrap();
    let ColumnStats::Numeric(stats) = &profile.stats else {
        panic!("empty should be numeric");
    };
    assert_eq!(stats.mean, None);
    assert_eq!(stats.outlier_count, None);
}

#[test]
fn test_ragged_columns_are_rejected() {
    let err = build_table(vec![
        Column::new("a".into(), [1i64, 2, 3]),
        Column::new("b".into(), [1i64, 2]),
    ])
    .unwrap_err();

    assert!(matches!(err, QualityError::InvalidInput(_)));
    assert_eq!(err.error_code(), "INVALID_INPUT");
}

#[test]
fn test_invalid_thresholds_are_rejected() {
    let df = df!["a" => [1, 2, 3]].unwrap();

    for threshold in [0.0, -1.0, 10.5, f64::NAN] {
        let config = AnalysisConfig {
            anomaly_threshold: threshold,
            ..AnalysisConfig::default()
        };
        let err = analyze(&df, &config).unwrap_err();
        assert!(err.is_config_error(), "threshold {threshold} accepted");
    }

    let config = AnalysisConfig {
        anomaly_threshold: 10.0,
        ..AnalysisConfig::default()
    };
    assert!(analyze(&df, &config).is_ok());
}

// ============================================================================
// Sampling and Determinism
// ============================================================================

#[test]
fn test_sampling_bound_on_large_table() {
    let df = generate_demo_dataset(25_000, DEMO_SEED).unwrap();
    let report = analyze(&df, &AnalysisConfig::default()).unwrap();

    assert_eq!(report.row_count, 25_000);
    assert_eq!(report.sampled_row_count, 10_000);
    assert!(report.is_sampled());
    for profile in &report.column_profiles {
        assert_eq!(profile.total_count, 10_000);
    }
}

#[test]
fn test_repeated_runs_are_identical() {
    let df = generate_demo_dataset(3_000, DEMO_SEED).unwrap();
    let config = AnalysisConfig::builder().sample_size(1_000).build().unwrap();

    let first = analyze(&df, &config).unwrap();
    let second = analyze(&df, &config).unwrap();
    assert_eq!(first, second);

    let sequential = QualityEngine::new(
        AnalysisConfig::builder()
            .sample_size(1_000)
            .parallel(false)
            .build()
            .unwrap(),
    )
    .analyze(&df)
    .unwrap();
    assert_eq!(first, sequential);
}

#[test]
fn test_input_table_is_untouched() {
    let df = load_csv("messy.csv");
    let before = df.clone();

    analyze(&df, &AnalysisConfig::builder().sample_size(3).build().unwrap()).unwrap();
    assert!(df.equals_missing(&before));
}

// ============================================================================
// Demo Dataset
// ============================================================================

#[test]
fn test_demo_dataset_planted_issues() {
    let df = generate_demo_dataset(1_000, DEMO_SEED).unwrap();
    let report = analyze(&df, &AnalysisConfig::default()).unwrap();

    assert_eq!(report.column_profile("age").unwrap().missing_count, 50);

    let purchases = &report.anomalies["purchase_amount"];
    assert!(purchases.count >= 20);
    assert!(purchases.outliers.contains(&999_999.0));

    let date = report.column_profile("last_purchase_date").unwrap();
    assert_eq!(date.kind, ColumnKind::Categorical);
    assert!(!report.anomalies.contains_key("last_purchase_date"));
    assert!(!report.anomalies.contains_key("email"));
}

// ============================================================================
// Report Export
// ============================================================================

#[test]
fn test_exported_report_round_trips_through_file() {
    let df = load_csv("messy.csv");
    let report = analyze(&df, &AnalysisConfig::default()).unwrap();
    let exported = ExportedReport::new("tests/fixtures/messy.csv", report);

    let dir = tempfile::tempdir().unwrap();
    let path = ReportWriter::new(dir.path()).write(&exported, "messy").unwrap();
    assert_eq!(path.file_name().unwrap(), "messy_quality_report.json");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["input_file"], "tests/fixtures/messy.csv");
    assert_eq!(json["report"]["row_count"], 8);
    assert_eq!(json["report"]["anomalies"]["amount"]["count"], 1);
    assert_eq!(
        json["report"]["recommendations"][0]["severity"],
        "warning"
    );
}
