//! Row sampling for large tables.
//!
//! Tables larger than the configured sample size are reduced to a uniform
//! random subset of rows drawn without replacement. The generator is
//! xoshiro256++ seeded with [`SAMPLE_SEED`](crate::config::SAMPLE_SEED); its
//! output stream is fixed by its reference definition, so the same table and
//! sample size always yield the same rows, on any platform.

use crate::config::{ConfigValidationError, SAMPLE_SEED};
use crate::error::Result;
use polars::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::debug;

/// Draw the analysis sample from `df`.
///
/// Returns the whole table when it has at most `sample_size` rows. Sampled
/// rows keep their original relative order.
pub fn sample(df: &DataFrame, sample_size: usize) -> Result<DataFrame> {
    sample_with_seed(df, sample_size, SAMPLE_SEED)
}

/// Same as [`sample`] with an explicit seed.
pub fn sample_with_seed(df: &DataFrame, sample_size: usize, seed: u64) -> Result<DataFrame> {
    if sample_size == 0 {
        return Err(ConfigValidationError::InvalidSampleSize(sample_size).into());
    }

    let row_count = df.height();
    if row_count <= sample_size {
        // Column buffers are shared and immutable.
        return Ok(df.clone());
    }

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut indices: Vec<IdxSize> = rand::seq::index::sample(&mut rng, row_count, sample_size)
        .into_iter()
        .map(|i| i as IdxSize)
        .collect();
    indices.sort_unstable();

    debug!(
        "Sampling {} of {} rows (seed {})",
        sample_size, row_count, seed
    );

    let idx = IdxCa::from_vec("sample_idx".into(), indices);
    Ok(df.take(&idx)?)
}
