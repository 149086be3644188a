//! Treatment assignment via median split of the working hours column

use anyhow::Result;
use polars::prelude::*;

use crate::pipeline::error::PrepError;

/// Derive a binary treatment variable from a continuous column.
///
/// Computes the median of the column's non-null values, then maps each row
/// to 1 when its value is strictly greater than the median and 0 otherwise.
/// Values equal to the median and null values both map to 0. The output has
/// one entry per input row, in input order, and is fully deterministic.
///
/// # Arguments
/// * `hours` - The working hours column of the selected dataset
///
/// # Returns
/// A 0/1 vector with `hours.len()` entries, and the median it was built from.
///
/// # Errors
/// [`PrepError::EmptyInput`] if the column has no non-null values (the
/// median is undefined).
pub fn create_treatment(hours: &Column) -> Result<(Vec<i32>, f64)> {
    let float_col = hours.cast(&DataType::Float64).map_err(|_| {
        anyhow::anyhow!(
            "Column '{}' must be numeric (cannot cast to Float64)",
            hours.name()
        )
    })?;

    let values: Vec<Option<f64>> = float_col
        .f64()
        .map_err(|_| anyhow::anyhow!("Failed to access column '{}' as Float64", hours.name()))?
        .iter()
        .collect();

    let mut observed: Vec<f64> = values.iter().filter_map(|v| *v).collect();
    if observed.is_empty() {
        return Err(PrepError::EmptyInput {
            what: format!("hour column '{}'", hours.name()),
        }
        .into());
    }

    let m = median(&mut observed);

    let treatment: Vec<i32> = values
        .iter()
        .map(|v| match v {
            Some(x) if *x > m => 1,
            _ => 0,
        })
        .collect();

    Ok((treatment, m))
}

/// Median of a non-empty slice: middle value for odd lengths, average of the
/// two middle values for even lengths. Sorts the slice in place.
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}
