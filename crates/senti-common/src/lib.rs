//! Shared utilities for the headline sentiment crates.
//!
//! This crate provides the fixed column schema of the cleaned dataset and
//! Polars `AnyValue` helpers used by the load and report stages.

pub mod any_value;
pub mod schema;

pub use any_value::{any_to_f64, any_to_i64, any_to_string, format_numeric, parse_f64};
pub use schema::{TITLE_SLOTS, cleaned_columns, raw_title_column, title_column};
