//! Error types for the persistence stage.

use std::path::PathBuf;

use thiserror::Error;

/// Persistence failure.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File system error.
    #[error("failed to {operation} {}: {source}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the clean CSV failed.
    #[error("failed to write CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: polars::prelude::PolarsError,
    },

    /// Database error.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Reading a value from the table failed.
    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),

    /// A cleaned column is absent from the table being loaded.
    #[error("column '{column}' missing from cleaned table")]
    MissingColumn { column: String },

    /// The database file does not exist.
    #[error("database not found: {}", path.display())]
    DatabaseNotFound { path: PathBuf },

    /// The database has no `sentiment_analysis` table.
    #[error("table '{table}' not found in {}; run the pipeline first", path.display())]
    TableNotFound { table: &'static str, path: PathBuf },
}

/// Result type for persistence operations.
pub type Result<T> = std::result::Result<T, LoadError>;
