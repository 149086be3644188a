//! Run configuration loaded from a JSON file
//!
//! The configuration names the dataset paths and the feature columns; the
//! pipeline itself only ever sees the column names. A minimal file:
//!
//! ```json
//! {
//!   "datasets": {
//!     "raw": "data/raw.csv",
//!     "processed": {
//!       "train": "data/processed/train.csv",
//!       "valid": "data/processed/valid.csv",
//!       "test": "data/processed/test.csv"
//!     }
//!   },
//!   "features": {
//!     "age_col": "age_bracket",
//!     "citizen_col": "citizenship",
//!     "cost_col": "cost",
//!     "hour_col": "working_hrs",
//!     "gain_col": "capital_gain",
//!     "binary_cols": ["union_member"],
//!     "categorical_cols": ["region", "education"]
//!   }
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::pipeline::FeatureColumns;

/// Complete run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input and output dataset paths
    pub datasets: DatasetsConfig,
    /// Column names consumed by the pipeline
    pub features: FeatureColumns,
    /// Split seed and proportions
    #[serde(default)]
    pub split: SplitSettings,
}

/// Dataset file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetsConfig {
    /// Raw input dataset (CSV or Parquet)
    pub raw: PathBuf,
    /// Output locations for the three partitions
    pub processed: ProcessedPaths,
}

/// Output paths for the processed partitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedPaths {
    pub train: PathBuf,
    pub valid: PathBuf,
    pub test: PathBuf,
}

/// Split configuration with the conventional defaults
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SplitSettings {
    /// RNG seed for reproducible splits
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Fraction of each stratum assigned to training
    #[serde(default = "default_train_fraction")]
    pub train_fraction: f64,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            train_fraction: default_train_fraction(),
        }
    }
}

fn default_seed() -> u64 {
    42
}

fn default_train_fraction() -> f64 {
    0.6
}

/// Load and parse the run configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}
