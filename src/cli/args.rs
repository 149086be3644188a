//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Causaprep - Prepare causal-inference-ready train/valid/test datasets from raw survey data
#[derive(Parser, Debug)]
#[command(name = "causaprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run configuration file (JSON) naming the dataset paths and the
    /// feature columns.
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Raw input dataset path (CSV or Parquet).
    /// Overrides the `datasets.raw` path from the configuration file.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Seed for the stratified split.
    /// Overrides the `split.seed` value from the configuration file.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show every column in the post-encoding quality screen instead of the
    /// truncated preview.
    #[arg(long, default_value = "false")]
    pub show_all_columns: bool,

    /// Write a JSON run report (metadata, stage counts, partition sizes)
    /// to this path after a successful run.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Higher values improve type detection for ambiguous columns but may be slower.
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}
