//! Error types for chart rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Chart rendering failure.
#[derive(Debug, Error)]
pub enum ReportError {
    /// File system error.
    #[error("failed to {operation} {}: {source}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted CSV could not be read back.
    #[error("failed to read chart data from {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: polars::prelude::PolarsError,
    },

    /// Reading a value from the table failed.
    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),

    /// The generated SVG was rejected by the renderer.
    #[error("chart '{chart}' produced invalid SVG: {message}")]
    Svg { chart: String, message: String },

    /// The pixel buffer could not be allocated or encoded.
    #[error("failed to rasterize {}: {message}", path.display())]
    Raster { path: PathBuf, message: String },
}

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, ReportError>;
