//! Synthetic customer dataset for trying the engine out.
//!
//! The data mimics a small customer table with a few planted quality
//! problems:
//! - ~5% of `age` values missing
//! - ~3% of `income` values set to `-1000`
//! - ~2% of `purchase_amount` values set to `999999`

use crate::error::Result;
use chrono::NaiveDate;
use polars::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Seed used by the CLI when writing the demo dataset.
pub const DEMO_SEED: u64 = 42;

const SATISFACTION_WEIGHTS: [(i64, f64); 5] =
    [(1, 0.10), (2, 0.15), (3, 0.20), (4, 0.30), (5, 0.25)];

/// Generate the demo dataset with `rows` rows.
pub fn generate_demo_dataset(rows: usize, seed: u64) -> Result<DataFrame> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

    let customer_id: Vec<i64> = (1..=rows as i64).collect();

    let mut age: Vec<Option<f64>> = (0..rows)
        .map(|_| Some((35.0 + 10.0 * standard_normal(&mut rng)).round()))
        .collect();
    let mut income: Vec<f64> = (0..rows)
        .map(|_| round_cents((10.0 + 0.5 * standard_normal(&mut rng)).exp()))
        .collect();
    let mut purchase_amount: Vec<f64> = (0..rows)
        .map(|_| round_cents(-100.0 * (1.0 - rng.r#gen::<f64>()).ln()))
        .collect();
    let satisfaction_score: Vec<i64> = (0..rows).map(|_| weighted_score(&mut rng)).collect();
    let email: Vec<String> = (1..=rows)
        .map(|i| format!("customer{i}@example.com"))
        .collect();

    for i in planted_rows(&mut rng, rows, 5) {
        age[i] = None;
    }
    for i in planted_rows(&mut rng, rows, 3) {
        income[i] = -1000.0;
    }
    for i in planted_rows(&mut rng, rows, 2) {
        purchase_amount[i] = 999_999.0;
    }

    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default();
    let first_day = (start - epoch).num_days() as i32;
    let days: Vec<i32> = (0..rows as i32).map(|d| first_day + d).collect();
    let last_purchase_date = Series::new("last_purchase_date".into(), days).cast(&DataType::Date)?;

    let df = DataFrame::new(vec![
        Column::new("customer_id".into(), customer_id),
        Column::new("age".into(), age),
        Column::new("income".into(), income),
        Column::new("purchase_amount".into(), purchase_amount),
        Column::new("satisfaction_score".into(), satisfaction_score),
        Column::new("email".into(), email),
        last_purchase_date.into_column(),
    ])?;
    Ok(df)
}

/// Approximate standard normal draw (Irwin-Hall with 12 uniforms).
fn standard_normal(rng: &mut Xoshiro256PlusPlus) -> f64 {
    (0..12).map(|_| rng.r#gen::<f64>()).sum::<f64>() - 6.0
}

fn weighted_score(rng: &mut Xoshiro256PlusPlus) -> i64 {
    let draw: f64 = rng.r#gen();
    let mut cumulative = 0.0;
    for (score, weight) in SATISFACTION_WEIGHTS {
        cumulative += weight;
        if draw < cumulative {
            return score;
        }
    }
    SATISFACTION_WEIGHTS[SATISFACTION_WEIGHTS.len() - 1].0
}

/// Distinct row indices covering `percent`% of the rows.
fn planted_rows(rng: &mut Xoshiro256PlusPlus, rows: usize, percent: usize) -> Vec<usize> {
    rand::seq::index::sample(rng, rows, rows * percent / 100).into_vec()
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
