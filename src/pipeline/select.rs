//! Feature selection: eligibility filtering and column projection

use anyhow::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::pipeline::error::PrepError;

/// Age bracket code below which a respondent is eligible
const MAX_AGE_BRACKET: f64 = 5.0;

/// Citizenship status code for eligible respondents
const ELIGIBLE_CITIZEN_CODE: f64 = 0.0;

/// Minimum cost value for a row to be retained
const MIN_COST: f64 = 2.0;

/// Names of the columns the pipeline consumes from the raw dataset.
///
/// Supplied by the run configuration and never mutated by the pipeline.
/// `binary_cols` and `categorical_cols` are ordered; their order determines
/// the column order of the selected and encoded datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureColumns {
    /// Age bracket column (numeric code)
    pub age_col: String,
    /// Citizenship status column (numeric code)
    pub citizen_col: String,
    /// Cost column, later negated into the cost target
    pub cost_col: String,
    /// Working hours column, later binarized into the treatment
    pub hour_col: String,
    /// Capital gain column
    pub gain_col: String,
    /// Binary feature columns, in output order
    pub binary_cols: Vec<String>,
    /// Categorical feature columns, in output and encoding order
    pub categorical_cols: Vec<String>,
}

impl FeatureColumns {
    /// The ordered column set the selected dataset is projected onto:
    /// hour, gain, cost, then binary columns, then categorical columns.
    pub fn required_columns(&self) -> Vec<String> {
        let mut cols = vec![
            self.hour_col.clone(),
            self.gain_col.clone(),
            self.cost_col.clone(),
        ];
        cols.extend(self.binary_cols.iter().cloned());
        cols.extend(self.categorical_cols.iter().cloned());
        cols
    }
}

/// Filter the raw dataset down to eligible rows and the configured columns.
///
/// A row is retained when `age < 5`, `citizen == 0`, and `cost >= 2` all
/// hold; a null in any predicate column makes the row ineligible. The
/// retained rows are projected onto [`FeatureColumns::required_columns`].
///
/// # Arguments
/// * `df` - The raw dataset
/// * `columns` - Column names for screening and projection
///
/// # Returns
/// A new DataFrame with only eligible rows and required columns. Zero
/// retained rows is a valid result, not an error.
///
/// # Errors
/// [`PrepError::Schema`] if any referenced column is absent.
pub fn select_features(df: &DataFrame, columns: &FeatureColumns) -> Result<DataFrame> {
    let required = columns.required_columns();

    for name in [columns.age_col.as_str(), columns.citizen_col.as_str()]
        .into_iter()
        .chain(required.iter().map(|s| s.as_str()))
    {
        if df.column(name).is_err() {
            return Err(PrepError::Schema {
                column: name.to_string(),
                stage: "feature selection",
            }
            .into());
        }
    }

    let age = numeric_values(df, &columns.age_col)?;
    let citizen = numeric_values(df, &columns.citizen_col)?;
    let cost = numeric_values(df, &columns.cost_col)?;

    let eligible: Vec<bool> = age
        .iter()
        .zip(citizen.iter())
        .zip(cost.iter())
        .map(|((a, c), k)| match (a, c, k) {
            (Some(a), Some(c), Some(k)) => {
                *a < MAX_AGE_BRACKET && *c == ELIGIBLE_CITIZEN_CODE && *k >= MIN_COST
            }
            _ => false,
        })
        .collect();

    let mask = BooleanChunked::from_slice("eligible".into(), &eligible);
    let filtered = df.filter(&mask)?;
    let selected = filtered.select(required.iter().cloned())?;

    Ok(selected)
}

/// Read a column as Float64 values, one `Option<f64>` per row.
pub(crate) fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df.column(name)?;

    let float_col = column.cast(&DataType::Float64).map_err(|_| {
        anyhow::anyhow!("Column '{}' must be numeric (cannot cast to Float64)", name)
    })?;

    let ca = float_col
        .f64()
        .map_err(|_| anyhow::anyhow!("Failed to access column '{}' as Float64", name))?;

    Ok(ca.iter().collect())
}
