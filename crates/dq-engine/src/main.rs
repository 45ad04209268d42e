//! CLI entry point for the data quality engine.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use dotenv::dotenv;
use dq_engine::demo::{DEMO_SEED, generate_demo_dataset};
use dq_engine::sampler;
use dq_engine::{
    AnalysisConfig, ColumnStats, ExportedReport, QualityEngine, QualityReport, ReportWriter,
};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Data quality validator for tabular datasets",
    long_about = "Profiles a CSV dataset, scores its quality and flags anomalous values.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  RUST_LOG              Overrides --log-level (also read from .env)\n\n\
                  EXAMPLES:\n  \
                  # Analyze a file\n  \
                  dq-engine -i data.csv\n\n  \
                  # Stricter anomaly detection on a smaller sample\n  \
                  dq-engine -i data.csv --anomaly-threshold 1.5 --sample-size 5000\n\n  \
                  # Generate the demo dataset and analyze it\n  \
                  dq-engine --demo sample_data.csv\n\n  \
                  # Machine-readable output\n  \
                  dq-engine -i data.csv --json | jq .report.metrics"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long, required_unless_present = "demo")]
    input: Option<String>,

    /// Write the demo customer dataset to this path and analyze it
    #[arg(long, conflicts_with = "input")]
    demo: Option<String>,

    /// Number of rows in the demo dataset
    #[arg(long, default_value = "1000")]
    demo_rows: usize,

    /// JSON file with an analysis configuration
    ///
    /// Explicit flags override values from the file
    #[arg(long)]
    config: Option<String>,

    /// Maximum number of rows to analyze [default: 10000]
    #[arg(long)]
    sample_size: Option<usize>,

    /// IQR multiplier for anomaly detection, in (0, 10] [default: 2.0]
    #[arg(long)]
    anomaly_threshold: Option<f64>,

    /// Run profiling, scoring and detection one after another
    #[arg(long)]
    sequential: bool,

    /// Output directory for reports
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Write the JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_quality_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Write the analyzed sample rows as CSV to the output directory
    ///
    /// The file will be saved as <input_name>_sample_<timestamp>.csv
    #[arg(long)]
    emit_sample: bool,

    /// Output JSON to stdout instead of the human-readable summary
    ///
    /// Disables all logs; only the report is written to stdout.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and the final result)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so stdout carries only
/// the JSON report.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    // Load .env before the subscriber reads RUST_LOG
    dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;

    let input = match (&args.demo, &args.input) {
        (Some(demo_path), _) => {
            write_demo_dataset(demo_path, args.demo_rows)?;
            demo_path.clone()
        }
        (None, Some(input)) => input.clone(),
        (None, None) => return Err(anyhow!("Either --input or --demo is required")),
    };

    if !Path::new(&input).exists() {
        return Err(anyhow!("Input file not found: {}", input));
    }

    info!("Loading dataset from: {}", input);
    let data = load_csv_with_fallbacks(&input)?;
    info!("Dataset loaded successfully: {:?}", data.shape());

    let engine = QualityEngine::new(config);
    let report = match engine.analyze(&data) {
        Ok(report) => report,
        Err(e) => {
            error!("Analysis failed [{}]: {}", e.error_code(), e);
            return Err(e.into());
        }
    };

    if args.emit_sample {
        let mut sample = sampler::sample(&data, engine.config().sample_size)?;
        let writer = ReportWriter::new(PathBuf::from(&args.output));
        let sample_path = writer.write_sample(&mut sample, &extract_file_stem(&input))?;
        info!("Sample written to: {}", sample_path.display());
    }

    handle_output(ExportedReport::new(&input, report), &args)
}

/// Merge defaults, the optional config file and explicit flags.
fn build_config(args: &Args) -> Result<AnalysisConfig> {
    let base = match &args.config {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Could not read config file: {path}"))?;
            let config: AnalysisConfig = serde_json::from_str(&content)
                .with_context(|| format!("Invalid config file: {path}"))?;
            debug!("Loaded config from {}: {:?}", path, config);
            config
        }
        None => AnalysisConfig::default(),
    };

    let config = AnalysisConfig::builder()
        .sample_size(args.sample_size.unwrap_or(base.sample_size))
        .anomaly_threshold(args.anomaly_threshold.unwrap_or(base.anomaly_threshold))
        .parallel(base.parallel && !args.sequential)
        .build()?;

    Ok(config)
}

fn write_demo_dataset(path: &str, rows: usize) -> Result<()> {
    let mut df = generate_demo_dataset(rows, DEMO_SEED)?;

    if let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;

    info!("Demo dataset written: {} ({} rows)", path, df.height());
    Ok(())
}

/// Handle engine output based on CLI flags.
///
/// - Default: print a human-readable summary to stdout
/// - `--json`: print JSON to stdout only (no logs)
/// - `--emit-report`: also write the JSON report to a file
fn handle_output(exported: ExportedReport, args: &Args) -> Result<()> {
    if args.emit_report {
        let writer = ReportWriter::new(PathBuf::from(&args.output));
        let report_path = writer.write(&exported, &extract_file_stem(&exported.input_file))?;
        info!("Report written to: {}", report_path.display());
    }

    if args.json {
        println!("{}", exported.to_json()?);
        return Ok(());
    }

    print_human_readable_summary(&exported.input_file, &exported.report);
    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

/// Print a human-readable summary of the report.
///
/// Uses `println!` on purpose: this is the primary output and must show
/// regardless of the log level.
fn print_human_readable_summary(input: &str, report: &QualityReport) {
    println!();
    println!("{}", "=".repeat(80));
    println!("DATA QUALITY REPORT");
    println!("{}", "=".repeat(80));
    println!();

    println!("DATASET OVERVIEW");
    println!("{}", "-".repeat(40));
    println!("  File: {}", input);
    println!("  Rows: {}", report.row_count);
    println!("  Columns: {}", report.column_count);
    if report.is_sampled() {
        println!("  Sampled rows: {}", report.sampled_row_count);
    }
    println!(
        "  Duplicate rows: {} ({:.2}%)",
        report.duplicate_row_count, report.duplicate_percentage
    );
    println!(
        "  Memory: {:.2} MB",
        report.estimated_size_bytes as f64 / (1024.0 * 1024.0)
    );
    println!();

    println!("QUALITY METRICS");
    println!("{}", "-".repeat(40));
    for (name, score) in report.metrics.dimensions() {
        println!("  {:<14} {:>6.1}%", name, score);
    }
    println!("  {:<14} {:>6.1}%", "Overall", report.metrics.overall);
    println!();

    println!("COLUMN PROFILES");
    println!("{}", "-".repeat(40));
    println!(
        "{:<20} {:<12} {:<10} {:>10} {:>12} {:>12}",
        "Column", "Type", "Missing %", "Distinct", "Mean", "Std"
    );
    println!("{}", "-".repeat(80));
    for col in &report.column_profiles {
        let (distinct, mean, std) = match &col.stats {
            ColumnStats::Numeric(stats) => ("-".to_string(), fmt_opt(stats.mean), fmt_opt(stats.std_dev)),
            ColumnStats::Categorical(stats) => {
                (stats.distinct_count.to_string(), "-".to_string(), "-".to_string())
            }
        };
        println!(
            "{:<20} {:<12} {:<10.1} {:>10} {:>12} {:>12}",
            truncate_str(&col.name, 19),
            truncate_str(&col.dtype, 11),
            col.missing_percentage,
            distinct,
            mean,
            std
        );
    }
    println!();

    println!("ANOMALIES");
    println!("{}", "-".repeat(40));
    let flagged: Vec<_> = report.anomalies.iter().filter(|(_, a)| a.count > 0).collect();
    if flagged.is_empty() {
        println!("  No anomalies detected");
    } else {
        for (column, anomaly) in flagged {
            let (lower, upper) = anomaly.display_bounds();
            println!(
                "  - {}: {} outliers ({:.2}%) outside [{}, {}]",
                column, anomaly.count, anomaly.percentage, lower, upper
            );
        }
    }
    println!();

    println!("RECOMMENDATIONS");
    println!("{}", "-".repeat(40));
    for rec in &report.recommendations {
        println!("  [{}] {}", rec.severity.label(), rec.title);
        println!("      {}", rec.message);
    }
    println!();

    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save the JSON report, --emit-sample for the sampled rows");
    println!("{}", "=".repeat(80));
}

/// Rows used by the CSV reader to infer column types.
const SCHEMA_INFERENCE_ROWS: usize = 100;

fn csv_read_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(SCHEMA_INFERENCE_ROWS))
}

/// Load a CSV file, retrying with looser parsing when the strict read fails.
///
/// Attempts, in order: `"`-quoted fields, no quoting at all, and finally the
/// file content after [`clean_csv_content`].
fn load_csv_with_fallbacks(path: &str) -> Result<DataFrame> {
    for (label, quote_char) in [("quoted", Some(b'"')), ("unquoted", None)] {
        let attempt = csv_read_options()
            .with_parse_options(CsvParseOptions::default().with_quote_char(quote_char))
            .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
            .finish();

        match attempt {
            Ok(df) => return Ok(df),
            Err(e) => debug!("{} CSV read of {} failed: {}", label, path, e),
        }
    }

    let content = fs::read_to_string(path).map_err(|e| {
        error!("Could not read file: {}", e);
        e
    })?;

    csv_read_options()
        .into_reader_with_file_handle(std::io::Cursor::new(clean_csv_content(&content)))
        .finish()
        .with_context(|| format!("Failed to parse CSV {path}"))
}

/// Collapse doubled quotes, strip trailing whitespace and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    let mut cleaned = String::with_capacity(content.len());
    for line in content.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
        if !cleaned.is_empty() {
            cleaned.push('\n');
        }
        cleaned.push_str(&line.replace("\"\"\"", "\"").replace("\"\"", "\""));
    }
    cleaned
}
