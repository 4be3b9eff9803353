//! Clean CSV output.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;

use crate::error::{LoadError, Result};

/// Writes the cleaned table as UTF-8 CSV with a header row.
///
/// Missing parent directories are created. Dates are written as `YYYY-MM-DD`
/// and missing values as empty cells.
pub fn write_clean_csv(df: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| LoadError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| LoadError::Io {
        operation: "create",
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let mut frame = df.clone();
    CsvWriter::new(&mut writer)
        .include_header(true)
        .finish(&mut frame)
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    info!(path = %path.display(), rows = df.height(), "clean CSV written");
    Ok(())
}
