//! Shared test utilities and fixture generators

use causaprep::pipeline::FeatureColumns;
use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Standard column configuration used across the test suite
pub fn feature_columns() -> FeatureColumns {
    FeatureColumns {
        age_col: "age_bracket".to_string(),
        citizen_col: "citizenship".to_string(),
        cost_col: "cost".to_string(),
        hour_col: "working_hrs".to_string(),
        gain_col: "capital_gain".to_string(),
        binary_cols: vec!["union_member".to_string()],
        categorical_cols: vec!["region".to_string()],
    }
}

/// Create a raw survey DataFrame with known eligibility characteristics
///
/// Rows 0, 1, 5, 6, and 7 satisfy the eligibility predicate
/// (age < 5, citizenship == 0, cost >= 2); the others each violate
/// exactly one clause:
/// - row 2: age bracket too high
/// - row 3: non-zero citizenship code
/// - row 4: cost below the minimum
pub fn create_survey_dataframe() -> DataFrame {
    df! {
        "age_bracket"  => [2i32, 3, 7, 4, 1, 2, 4, 3],
        "citizenship"  => [0i32, 0, 0, 1, 0, 0, 0, 0],
        "cost"         => [5.0f64, 8.0, 3.0, 6.0, 1.0, 4.0, 9.0, 2.0],
        "working_hrs"  => [10.0f64, 20.0, 30.0, 40.0, 50.0, 35.0, 45.0, 25.0],
        "capital_gain" => [0.0f64, 100.0, 0.0, 250.0, 0.0, 80.0, 40.0, 0.0],
        "union_member" => [1i32, 0, 1, 0, 1, 0, 1, 0],
        "region"       => ["A", "B", "A", "C", "B", "A", "B", "A"],
        "noise"        => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
    }
    .unwrap()
}

/// Create an encoded-style DataFrame with a balanced binary treatment column
/// (5 rows of class 0 and 5 of class 1) plus a row id for tracking
pub fn create_stratified_dataframe() -> DataFrame {
    df! {
        "row_id"       => [0i64, 1, 2, 3, 4, 5, 6, 7, 8, 9],
        "working_hrs"  => [0i32, 0, 0, 0, 0, 1, 1, 1, 1, 1],
        "capital_gain" => [10.0f64, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0],
        "cost"         => [-1.0f64, -2.0, -3.0, -4.0, -5.0, -6.0, -7.0, -8.0, -9.0, -10.0],
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(
        rows, expected_rows,
        "Row count mismatch: expected {}, got {}",
        expected_rows, rows
    );
    assert_eq!(
        cols, expected_cols,
        "Column count mismatch: expected {}, got {}",
        expected_cols, cols
    );
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Extract a column as i64 values, panicking on nulls
pub fn column_as_i64(df: &DataFrame, name: &str) -> Vec<i64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Int64)
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect()
}

/// Extract a column as f64 values, panicking on nulls
pub fn column_as_f64(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect()
}
