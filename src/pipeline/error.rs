//! Error types for the preparation pipeline.
//!
//! Every pipeline failure is fatal: the stages are pure in-memory transforms
//! with nothing transient to retry. Each variant carries enough context to
//! name the failing stage and the offending column or condition.

use thiserror::Error;

/// Errors raised by the preparation stages.
#[derive(Debug, Error)]
pub enum PrepError {
    /// A column referenced by the run configuration is absent from the
    /// dataset at the point a stage needs it.
    #[error("column '{column}' not found in dataset during {stage}")]
    Schema {
        /// Name of the missing column
        column: String,
        /// Stage that required the column
        stage: &'static str,
    },

    /// An operation that needs at least one value received none.
    ///
    /// Raised by the treatment builder when the hour column has no non-null
    /// values, since the median of an empty sequence is undefined.
    #[error("{what} has no values; cannot compute a median")]
    EmptyInput {
        /// Description of the empty input
        what: String,
    },

    /// A stratum is too small to leave every partition non-empty.
    #[error(
        "stratum '{class}' of column '{column}' has {count} row(s); \
         at least {required} are required to fill train, valid, and test"
    )]
    Stratification {
        /// Stratification column name
        column: String,
        /// Stratum value rendered as text
        class: String,
        /// Rows observed in the stratum
        count: usize,
        /// Minimum rows the split needs per stratum
        required: usize,
    },
}
