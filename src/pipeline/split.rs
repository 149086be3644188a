//! Stratified train/validation/test splitting

use anyhow::Result;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::pipeline::encode::column_to_string_values;
use crate::pipeline::error::PrepError;

/// Settings controlling the split proportions and reproducibility.
///
/// Defaults reproduce the conventional 60/20/20 partition with seed 42.
#[derive(Debug, Clone, Copy)]
pub struct SplitOptions {
    /// Seed for the shuffling RNG; a fixed seed makes the split
    /// bit-reproducible across runs on the same input
    pub seed: u64,
    /// Fraction of each stratum assigned to the training partition;
    /// the remainder is halved into validation and test
    pub train_fraction: f64,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            train_fraction: 0.6,
        }
    }
}

/// Split a dataset into train/validation/test partitions, stratified on one
/// column.
///
/// Each stratum's rows are shuffled with a seeded RNG and dealt out as
/// `train_fraction` to train (rounded to the nearest row), then half of the
/// remainder to validation and the rest to test. Strata are processed in
/// first-occurrence order, so repeated runs on identical input produce
/// identical partitions. Null stratum values form their own stratum.
///
/// The three partitions are pairwise disjoint and together cover every input
/// row exactly once.
///
/// # Arguments
/// * `df` - Dataset to split (normally the encoded dataset)
/// * `strat_col` - Column whose class frequencies each partition preserves
/// * `options` - Seed and proportions
///
/// # Errors
/// * [`PrepError::Schema`] if `strat_col` is absent
/// * [`PrepError::Stratification`] if any stratum has too few rows to leave
///   all three partitions non-empty
pub fn split(
    df: &DataFrame,
    strat_col: &str,
    options: &SplitOptions,
) -> Result<(DataFrame, DataFrame, DataFrame)> {
    let col = match df.column(strat_col) {
        Ok(c) => c,
        Err(_) => {
            return Err(PrepError::Schema {
                column: strat_col.to_string(),
                stage: "stratified splitting",
            }
            .into())
        }
    };

    anyhow::ensure!(
        options.train_fraction > 0.0 && options.train_fraction < 1.0,
        "train fraction must be strictly between 0 and 1, got {}",
        options.train_fraction
    );

    let keys = column_to_string_values(col)?;

    // Row indices grouped by stratum, in first-occurrence order
    let mut strata: Vec<(Option<String>, Vec<u32>)> = Vec::new();
    for (idx, key) in keys.iter().enumerate() {
        match strata.iter_mut().find(|(k, _)| k == key) {
            Some((_, rows)) => rows.push(idx as u32),
            None => strata.push((key.clone(), vec![idx as u32])),
        }
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut train_idx: Vec<u32> = Vec::new();
    let mut valid_idx: Vec<u32> = Vec::new();
    let mut test_idx: Vec<u32> = Vec::new();

    for (key, rows) in &mut strata {
        let n = rows.len();
        let (train_n, valid_n, test_n) = allocate(n, options.train_fraction);

        if train_n == 0 || valid_n == 0 || test_n == 0 {
            return Err(PrepError::Stratification {
                column: strat_col.to_string(),
                class: key.clone().unwrap_or_else(|| "null".to_string()),
                count: n,
                required: minimum_stratum_rows(options.train_fraction),
            }
            .into());
        }

        rows.shuffle(&mut rng);
        train_idx.extend_from_slice(&rows[..train_n]);
        valid_idx.extend_from_slice(&rows[train_n..train_n + valid_n]);
        test_idx.extend_from_slice(&rows[train_n + valid_n..]);
    }

    let train = take_rows(df, train_idx)?;
    let valid = take_rows(df, valid_idx)?;
    let test = take_rows(df, test_idx)?;

    Ok((train, valid, test))
}

/// Row counts for one stratum of `n` rows: train gets the rounded fraction,
/// validation gets the rounded half of the remainder, test gets the rest.
fn allocate(n: usize, train_fraction: f64) -> (usize, usize, usize) {
    let train = ((n as f64) * train_fraction).round() as usize;
    let train = train.min(n);
    let rest = n - train;
    let valid = ((rest as f64) * 0.5).round() as usize;
    let test = rest - valid;
    (train, valid, test)
}

/// Smallest stratum size for which all three partitions come out non-empty.
fn minimum_stratum_rows(train_fraction: f64) -> usize {
    (2..=10_000)
        .find(|&n| {
            let (train, valid, test) = allocate(n, train_fraction);
            train > 0 && valid > 0 && test > 0
        })
        .unwrap_or(2)
}

fn take_rows(df: &DataFrame, indices: Vec<u32>) -> Result<DataFrame> {
    let idx = IdxCa::from_vec("idx".into(), indices);
    Ok(df.take(&idx)?)
}
