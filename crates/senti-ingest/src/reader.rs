//! CSV reading with encoding fallback.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::{debug, info, warn};

use crate::encoding::SourceEncoding;
use crate::error::{IngestError, Result};

/// A raw headline table as read from disk.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// All columns as nullable strings, in file order.
    pub frame: DataFrame,
    /// Encoding that decoded and parsed the file.
    pub encoding: SourceEncoding,
    /// Path the table was read from.
    pub path: PathBuf,
}

impl RawTable {
    /// Number of data rows.
    pub fn height(&self) -> usize {
        self.frame.height()
    }
}

/// Reads the headline CSV at `path`, trying each candidate encoding in order.
pub fn read_headlines(path: &Path) -> Result<RawTable> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    read_headlines_from_bytes(&bytes, path)
}

/// Decodes and parses already-loaded file contents.
///
/// `path` is only used for error messages and the returned [`RawTable`].
pub fn read_headlines_from_bytes(bytes: &[u8], path: &Path) -> Result<RawTable> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut last_error = String::from("no encoding attempted");
    for encoding in SourceEncoding::CANDIDATES {
        debug!(path = %path.display(), encoding = %encoding, "trying encoding");
        let Some(text) = encoding.decode(bytes) else {
            warn!(path = %path.display(), encoding = %encoding, "decode failed");
            last_error = format!("invalid {encoding} byte sequence");
            continue;
        };
        match parse_csv_text(text) {
            Ok(frame) => {
                if frame.height() == 0 {
                    return Err(IngestError::EmptyCsv {
                        path: path.to_path_buf(),
                    });
                }
                info!(
                    path = %path.display(),
                    encoding = %encoding,
                    rows = frame.height(),
                    columns = frame.width(),
                    "file read"
                );
                return Ok(RawTable {
                    frame,
                    encoding,
                    path: path.to_path_buf(),
                });
            }
            Err(message) => {
                warn!(
                    path = %path.display(),
                    encoding = %encoding,
                    error = %message,
                    "parse failed"
                );
                last_error = message;
            }
        }
    }

    let tried = SourceEncoding::CANDIDATES
        .into_iter()
        .map(SourceEncoding::label)
        .collect::<Vec<_>>()
        .join(", ");
    Err(IngestError::UnsupportedEncoding {
        path: path.to_path_buf(),
        tried,
        last_error,
    })
}

/// Parses decoded CSV text with every column read as a string.
fn parse_csv_text(text: String) -> std::result::Result<DataFrame, String> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_utf8_file() {
        let file = create_temp_csv(b"Date,Label,Top1\n2016-07-01,1,Stocks rise\n");
        let raw = read_headlines(file.path()).unwrap();

        assert_eq!(raw.encoding, SourceEncoding::Utf8);
        assert_eq!(raw.height(), 1);
        assert_eq!(raw.frame.width(), 3);
    }

    #[test]
    fn test_all_columns_are_strings() {
        let file = create_temp_csv(b"Date,Label\n2016-07-01,1\n2016-07-02,0\n");
        let raw = read_headlines(file.path()).unwrap();

        for column in raw.frame.get_columns() {
            assert_eq!(column.dtype(), &DataType::String);
        }
        let labels = raw.frame.column("Label").unwrap().str().unwrap();
        assert_eq!(labels.get(1), Some("0"));
    }

    #[test]
    fn test_falls_back_to_latin1() {
        let file = create_temp_csv(b"Date,Label,Top1\n2016-07-01,1,Caf\xe9 prices up\n");
        let raw = read_headlines(file.path()).unwrap();

        assert_eq!(raw.encoding, SourceEncoding::Latin1);
        let top1 = raw.frame.column("Top1").unwrap().str().unwrap();
        assert_eq!(top1.get(0), Some("Café prices up"));
    }

    #[test]
    fn test_reads_utf16_with_bom() {
        let text = "Date,Label\n2016-07-01,1\n";
        let mut bytes = vec![0xFF, 0xFE];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let file = create_temp_csv(&bytes);
        let raw = read_headlines(file.path()).unwrap();

        assert_eq!(raw.encoding, SourceEncoding::Utf16);
        assert_eq!(raw.height(), 1);
    }

    #[test]
    fn test_empty_cells_are_null() {
        let file = create_temp_csv(b"Date,Label,Top1,Top2\n2016-07-01,1,Headline,\n");
        let raw = read_headlines(file.path()).unwrap();

        let top2 = raw.frame.column("Top2").unwrap().str().unwrap();
        assert_eq!(top2.get(0), None);
    }

    #[test]
    fn test_missing_file() {
        let result = read_headlines(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_empty_file() {
        let file = create_temp_csv(b"");
        let result = read_headlines(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_header_only_file() {
        let file = create_temp_csv(b"Date,Label\n");
        let result = read_headlines(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }
}
