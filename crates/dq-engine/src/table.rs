//! Table construction and validation.
//!
//! The engine analyzes polars [`DataFrame`]s. Hosts that assemble a table
//! column by column should go through [`build_table`], which reports ragged
//! input as [`QualityError::InvalidInput`] instead of a polars shape error.

use crate::error::{QualityError, Result};
use polars::prelude::*;
use std::collections::HashSet;

/// Build a table from columns, failing fast on malformed input.
pub fn build_table(columns: Vec<Column>) -> Result<DataFrame> {
    check_columns(&columns, None)?;
    let height = columns.first().map_or(0, |c| c.len());
    DataFrame::new(columns).map_err(|e| {
        QualityError::InvalidInput(format!("could not assemble table of height {height}: {e}"))
    })
}

/// Check that every column has the table's row count and a unique name.
pub fn validate_table(df: &DataFrame) -> Result<()> {
    check_columns(df.get_columns(), Some(df.height()))
}

fn check_columns(columns: &[Column], height: Option<usize>) -> Result<()> {
    let expected = height.or_else(|| columns.first().map(|c| c.len()));
    let mut seen = HashSet::new();

    for col in columns {
        if let Some(expected) = expected
            && col.len() != expected
        {
            return Err(QualityError::InvalidInput(format!(
                "column '{}' has {} rows, expected {}",
                col.name(),
                col.len(),
                expected
            )));
        }

        if !seen.insert(col.name().as_str()) {
            return Err(QualityError::InvalidInput(format!(
                "duplicate column name '{}'",
                col.name()
            )));
        }
    }

    Ok(())
}
