//! Persistence for the cleaned headline table.
//!
//! - **CSV**: the cleaned table as a flat UTF-8 file with header
//! - **SQLite**: the `sentiment_analysis` table, replaced in full on every load
//! - **Stats**: read-only summary queries over the loaded table

mod csv;
mod error;
mod sqlite;

pub use csv::write_clean_csv;
pub use error::{LoadError, Result};
pub use sqlite::{DatabaseStats, LoadSummary, SqliteSink, TABLE_NAME};
