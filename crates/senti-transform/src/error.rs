//! Error types for the transform stage.

use thiserror::Error;

/// Structural failures that stop the transform.
///
/// Malformed individual values are never errors; they are counted in the
/// [`TransformReport`](crate::TransformReport) instead.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A required input column is absent.
    #[error("required column '{column}' not found in input")]
    MissingColumn { column: String },

    /// Every row was removed by deduplication or mandatory-field filtering.
    #[error(
        "no records left after cleaning: {input_rows} read, {duplicates_removed} duplicates, \
         {missing_removed} without a valid date or label"
    )]
    NoRecords {
        input_rows: usize,
        duplicates_removed: usize,
        missing_removed: usize,
    },

    /// A keyword list could not be compiled into a pattern.
    #[error("invalid keyword pattern: {0}")]
    KeywordPattern(#[from] regex::Error),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
