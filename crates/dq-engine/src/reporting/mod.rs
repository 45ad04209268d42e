//! Report export module.
//!
//! Wraps a [`QualityReport`](crate::types::QualityReport) with export
//! metadata so it can be:
//! - printed as JSON to stdout (`--json` CLI flag)
//! - written to a JSON file (`--emit-report` CLI flag), optionally with the
//!   analyzed sample as CSV (`--emit-sample`)
//! - serialized by any other host
//!
//! # Example
//!
//! ```rust,ignore
//! use dq_engine::reporting::{ExportedReport, ReportWriter};
//!
//! let exported = ExportedReport::new("data/customers.csv", report);
//! println!("{}", serde_json::to_string_pretty(&exported)?);
//!
//! let writer = ReportWriter::new(PathBuf::from("output"));
//! writer.write(&exported, "customers")?;
//! ```

mod generator;

pub use generator::{ExportedReport, ReportWriter};
