//! Error types for headline ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop the extract stage.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("headline file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Empty file, or a header without data rows.
    #[error("no data rows in {path}")]
    EmptyCsv { path: PathBuf },

    /// No candidate encoding both decoded and parsed the file.
    #[error("could not read {path} with any supported encoding (tried {tried}): {last_error}")]
    UnsupportedEncoding {
        path: PathBuf,
        tried: String,
        last_error: String,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "headline file not found: /path/to/file.csv");
    }

    #[test]
    fn test_unsupported_encoding_display() {
        let err = IngestError::UnsupportedEncoding {
            path: PathBuf::from("news.csv"),
            tried: "utf-8, latin-1".to_string(),
            last_error: "bad".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "could not read news.csv with any supported encoding (tried utf-8, latin-1): bad"
        );
    }
}
