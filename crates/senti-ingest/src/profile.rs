//! Summary statistics of a freshly read table.

use polars::prelude::DataFrame;
use senti_common::parse_f64;
use senti_common::schema::{RAW_DATE, RAW_LABEL};

use crate::reader::RawTable;

/// What the extract stage reports about the input before any cleaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractProfile {
    pub rows: usize,
    pub columns: Vec<String>,
    /// Lexicographic minimum of the raw `Date` strings.
    pub date_min: Option<String>,
    /// Lexicographic maximum of the raw `Date` strings.
    pub date_max: Option<String>,
    /// Rows whose raw label is numerically 0.
    pub negative_labels: usize,
    /// Rows whose raw label is numerically 1.
    pub positive_labels: usize,
}

/// Profiles a raw table.
pub fn profile(raw: &RawTable) -> ExtractProfile {
    profile_frame(&raw.frame)
}

fn profile_frame(df: &DataFrame) -> ExtractProfile {
    let columns = df
        .get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect();

    let mut date_min: Option<&str> = None;
    let mut date_max: Option<&str> = None;
    if let Some(dates) = df.column(RAW_DATE).ok().and_then(|c| c.str().ok()) {
        for value in dates.into_iter().flatten() {
            if date_min.is_none_or(|min| value < min) {
                date_min = Some(value);
            }
            if date_max.is_none_or(|max| value > max) {
                date_max = Some(value);
            }
        }
    }

    let mut negative_labels = 0;
    let mut positive_labels = 0;
    if let Some(labels) = df.column(RAW_LABEL).ok().and_then(|c| c.str().ok()) {
        for value in labels.into_iter().flatten() {
            match parse_f64(value) {
                Some(v) if v == 0.0 => negative_labels += 1,
                Some(v) if v == 1.0 => positive_labels += 1,
                _ => {}
            }
        }
    }

    ExtractProfile {
        rows: df.height(),
        columns,
        date_min: date_min.map(str::to_string),
        date_max: date_max.map(str::to_string),
        negative_labels,
        positive_labels,
    }
}
