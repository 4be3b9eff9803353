//! Headline data ingestion.
//!
//! This crate reads the daily headline CSV into a Polars DataFrame, trying a
//! fixed list of text encodings until one decodes and parses.
//!
//! # Features
//!
//! - **Encoding fallback**: UTF-8, Latin-1, ISO-8859-1, CP1252 and UTF-16, in that order
//! - **Raw loading**: every column is read as a string so nothing is coerced before the transform
//! - **Profiling**: row count, columns, raw date range and label distribution
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use senti_ingest::{profile, read_headlines};
//!
//! let raw = read_headlines(Path::new("extract/files/stock_senti_analysis.csv"))?;
//! let summary = profile(&raw);
//! ```

mod encoding;
mod error;
mod profile;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Reading ===
pub use encoding::SourceEncoding;
pub use reader::{RawTable, read_headlines, read_headlines_from_bytes};

// === Profiling ===
pub use profile::{ExtractProfile, profile};
