//! One-hot encoding of categorical features
//!
//! Categories are discovered from the data rather than a fixed vocabulary,
//! so encoding must run on the full dataset before splitting: partitions
//! encoded separately could disagree on the indicator column schema.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Table};
use polars::prelude::*;

use crate::pipeline::error::PrepError;

/// Columns shown in the post-encoding screen before truncation kicks in
const SCREENING_PREVIEW_COLUMNS: usize = 30;

/// Options for the post-encoding column screening report.
///
/// Screening is informational only; it never changes the encoded output.
/// The scope is explicit: callers that want the report pass options in,
/// nothing is toggled globally.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreeningOptions {
    /// Show every output column instead of the truncated preview
    pub show_all_columns: bool,
}

/// Per-column quality profile of an encoded dataset
#[derive(Debug, Clone)]
pub struct ColumnProfile {
    /// Column name
    pub name: String,
    /// Rendered polars dtype
    pub dtype: String,
    /// Count of missing values
    pub missing: usize,
    /// Count of distinct values (nulls count as one value)
    pub distinct: usize,
}

/// One-hot encode the categorical columns of a dataset.
///
/// Non-categorical columns are preserved first, in their original relative
/// order. Each categorical column is then replaced by one 0/1 indicator
/// column per distinct value observed in the data, named `{column}_{value}`,
/// grouped by source column in `categorical_cols` order. Distinct values
/// appear in first-occurrence order. A row with a missing source cell gets 0
/// in every indicator for that column; no synthetic "unknown" indicator is
/// created.
///
/// # Arguments
/// * `df` - Dataset to encode
/// * `categorical_cols` - Ordered names of the columns to encode
/// * `screening` - When set, prints the per-column quality screen
///
/// # Returns
/// The encoded DataFrame, with the same row count as the input.
///
/// # Errors
/// [`PrepError::Schema`] if a named categorical column is absent.
pub fn encode(
    df: &DataFrame,
    categorical_cols: &[String],
    screening: Option<&ScreeningOptions>,
) -> Result<DataFrame> {
    for name in categorical_cols {
        if df.column(name).is_err() {
            return Err(PrepError::Schema {
                column: name.clone(),
                stage: "categorical encoding",
            }
            .into());
        }
    }

    let mut out_columns: Vec<Column> = df
        .get_columns()
        .iter()
        .filter(|c| !categorical_cols.iter().any(|n| n.as_str() == c.name().as_str()))
        .cloned()
        .collect();

    for name in categorical_cols {
        let col = df.column(name)?;
        let values = column_to_string_values(col)?;

        // Distinct values in first-occurrence order; nulls are skipped
        let mut categories: Vec<String> = Vec::new();
        for value in values.iter().flatten() {
            if !categories.iter().any(|c| c == value) {
                categories.push(value.clone());
            }
        }

        for category in &categories {
            let indicator: Vec<i32> = values
                .iter()
                .map(|v| match v {
                    Some(s) if s == category => 1,
                    _ => 0,
                })
                .collect();
            out_columns.push(Column::new(
                format!("{}_{}", name, category).into(),
                indicator,
            ));
        }
    }

    let combined = DataFrame::new(out_columns)?;

    if let Some(options) = screening {
        let profiles = profile_columns(&combined)?;
        print_screening(&profiles, options);
    }

    Ok(combined)
}

/// Profile every column of a dataset: dtype, missing count, distinct count.
pub fn profile_columns(df: &DataFrame) -> Result<Vec<ColumnProfile>> {
    let mut profiles = Vec::with_capacity(df.width());

    for col in df.get_columns() {
        profiles.push(ColumnProfile {
            name: col.name().to_string(),
            dtype: format!("{}", col.dtype()),
            missing: col.null_count(),
            distinct: col.as_materialized_series().n_unique()?,
        });
    }

    Ok(profiles)
}

/// Render the column screening table to the terminal.
fn print_screening(profiles: &[ColumnProfile], options: &ScreeningOptions) {
    let shown = if options.show_all_columns {
        profiles.len()
    } else {
        profiles.len().min(SCREENING_PREVIEW_COLUMNS)
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("DataType").add_attribute(Attribute::Bold),
        Cell::new("MissingVal").add_attribute(Attribute::Bold),
        Cell::new("NUnique").add_attribute(Attribute::Bold),
    ]);

    for profile in &profiles[..shown] {
        table.add_row(vec![
            Cell::new(&profile.name),
            Cell::new(&profile.dtype),
            Cell::new(profile.missing),
            Cell::new(profile.distinct),
        ]);
    }

    for line in table.to_string().lines() {
        println!("      {}", line);
    }

    if shown < profiles.len() {
        println!(
            "      ... {} more column(s); pass --show-all-columns for the full screen",
            profiles.len() - shown
        );
    }
}

/// Convert a column to one `Option<String>` per row for category comparison.
pub(crate) fn column_to_string_values(col: &Column) -> Result<Vec<Option<String>>> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            let cast = col.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            let cast = col.cast(&DataType::UInt64)?;
            cast.u64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::Float32 | DataType::Float64 => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.map(|n| format!("{}", n)))
                .collect()
        }
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        _ => {
            // For other types, try to cast to string
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_string_column() {
        let df = df! {
            "hours" => [10i32, 20, 30],
            "region" => ["A", "B", "A"],
        }
        .unwrap();

        let encoded = encode(&df, &["region".to_string()], None).unwrap();

        assert_eq!(
            encoded.get_column_names(),
            &["hours", "region_A", "region_B"]
        );

        let region_a: Vec<Option<i32>> = encoded.column("region_A").unwrap().i32().unwrap().into_iter().collect();
        let region_b: Vec<Option<i32>> = encoded.column("region_B").unwrap().i32().unwrap().into_iter().collect();
        assert_eq!(region_a, vec![Some(1), Some(0), Some(1)]);
        assert_eq!(region_b, vec![Some(0), Some(1), Some(0)]);
    }

    #[test]
    fn test_encode_missing_column_errors() {
        let df = df! {
            "hours" => [10i32, 20],
        }
        .unwrap();

        let result = encode(&df, &["region".to_string()], None);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("column 'region' not found"));
    }

    #[test]
    fn test_profile_columns() {
        let df = df! {
            "a" => [Some(1i32), None, Some(3)],
            "b" => ["x", "x", "y"],
        }
        .unwrap();

        let profiles = profile_columns(&df).unwrap();

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].name, "a");
        assert_eq!(profiles[0].missing, 1);
        assert_eq!(profiles[1].missing, 0);
        assert_eq!(profiles[1].distinct, 2);
    }
}
