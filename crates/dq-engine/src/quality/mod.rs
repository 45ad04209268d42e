//! Data quality scoring module.
//!
//! This module scores a table along four dimensions (completeness,
//! consistency, uniqueness, validity) and turns the scores into
//! recommendations.

pub mod recommendations;
mod scorer;

pub use recommendations::recommend;
pub use scorer::{QualityScorer, duplicate_row_count};
