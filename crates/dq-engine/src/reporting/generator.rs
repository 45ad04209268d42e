use crate::error::Result;
use crate::types::QualityReport;
use chrono::Local;
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// A quality report plus the metadata of the run that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the analyzed file
    pub input_file: String,
    /// Engine output
    pub report: QualityReport,
}

impl ExportedReport {
    /// Stamp a report with the current local time.
    pub fn new(input_file: impl Into<String>, report: QualityReport) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.into(),
            report,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Writes exported reports into an output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `<base_name>_quality_report.json` and return its path.
    pub fn write(&self, report: &ExportedReport, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self
            .output_dir
            .join(format!("{}_quality_report.json", base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(report.to_json()?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }

    /// Write the analyzed rows as `<base_name>_sample_<YYYYmmdd_HHMMSS>.csv`
    /// and return its path.
    pub fn write_sample(&self, sample: &mut DataFrame, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let sample_path = self
            .output_dir
            .join(format!("{}_sample_{}.csv", base_name, stamp));
        let mut file = File::create(&sample_path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(sample)?;

        info!(
            "Sample saved: {} ({} rows)",
            sample_path.display(),
            sample.height()
        );

        Ok(sample_path)
    }
}
