//! Run report export functionality

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::report::PrepSummary;

/// Metadata about the preparation run
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// Causaprep version
    pub causaprep_version: String,
    /// Input file path
    pub input_file: String,
    /// Seed used for the stratified split
    pub seed: u64,
    /// Train fraction used for the stratified split
    pub train_fraction: f64,
    /// Median working hours used for treatment assignment
    pub treatment_median: f64,
}

/// Row counts of the three output partitions
#[derive(Serialize)]
pub struct PartitionSizes {
    pub train: usize,
    pub valid: usize,
    pub test: usize,
}

/// Summary statistics of the run
#[derive(Serialize)]
pub struct RunSummary {
    /// Rows in the raw dataset
    pub raw_rows: usize,
    /// Columns in the raw dataset
    pub raw_columns: usize,
    /// Rows surviving the eligibility filter
    pub eligible_rows: usize,
    /// Rows assigned treatment = 1
    pub treated: usize,
    /// Rows assigned treatment = 0
    pub control: usize,
    /// Columns after one-hot encoding
    pub encoded_columns: usize,
    /// Output partition sizes
    pub partitions: PartitionSizes,
}

/// Complete run report with metadata
#[derive(Serialize)]
pub struct PrepReport {
    /// Metadata about the preparation run
    pub metadata: RunMetadata,
    /// Summary statistics
    pub summary: RunSummary,
}

/// Parameters for the run report export
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub seed: u64,
    pub train_fraction: f64,
    pub treatment_median: f64,
}

/// Export the preparation run report to a JSON file
///
/// # Arguments
/// * `summary` - Stage counts accumulated during the run
/// * `output_path` - Path to write the JSON file
/// * `params` - Export parameters for metadata
pub fn export_prep_report(
    summary: &PrepSummary,
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let report = PrepReport {
        metadata: RunMetadata {
            timestamp: Utc::now().to_rfc3339(),
            causaprep_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            seed: params.seed,
            train_fraction: params.train_fraction,
            treatment_median: params.treatment_median,
        },
        summary: RunSummary {
            raw_rows: summary.raw_rows,
            raw_columns: summary.raw_cols,
            eligible_rows: summary.eligible_rows,
            treated: summary.treated,
            control: summary.control,
            encoded_columns: summary.encoded_cols,
            partitions: PartitionSizes {
                train: summary.train_rows,
                valid: summary.valid_rows,
                test: summary.test_rows,
            },
        },
    };

    let json = serde_json::to_string_pretty(&report)
        .context("Failed to serialize run report to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write run report to {}", output_path.display()))?;

    Ok(())
}
