//! Reading the persisted table and aggregating it for the charts.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::{AnyValue, CsvReadOptions, DataFrame, SerReader};

use senti_common::{any_to_f64, any_to_i64, any_to_string};

use crate::error::{ReportError, Result};

/// Weekdays in display order.
pub(crate) const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Reads the cleaned CSV back for charting.
///
/// Every column arrives as a string; the column readers below parse numbers
/// on demand, so a headline that looks numeric cannot break the read.
pub fn read_chart_data(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|source| ReportError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

/// True when every named column is present.
pub(crate) fn has_columns(df: &DataFrame, names: &[&str]) -> bool {
    names.iter().all(|name| df.column(name).is_ok())
}

pub(crate) fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df.column(name)?.as_materialized_series();
    Ok(series
        .iter()
        .map(|value| match value {
            AnyValue::Null => None,
            other => Some(any_to_string(other)),
        })
        .collect())
}

pub(crate) fn int_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let series = df.column(name)?.as_materialized_series();
    Ok(series.iter().map(any_to_i64).collect())
}

pub(crate) fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df.column(name)?.as_materialized_series();
    Ok(series.iter().map(any_to_f64).collect())
}

/// Dates are written as `YYYY-MM-DD`; a datetime suffix is ignored.
pub(crate) fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Row counts per category and series.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Crosstab {
    pub categories: Vec<String>,
    pub series: Vec<String>,
    /// `values[category][series]`
    pub values: Vec<Vec<f64>>,
}

impl Crosstab {
    /// Counts `(category, series)` pairs. Categories keep the order given;
    /// series are sorted.
    pub(crate) fn count<'a, I>(categories: Vec<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut counts: BTreeMap<(String, String), f64> = BTreeMap::new();
        let mut series = BTreeSet::new();
        for (category, name) in pairs {
            if !categories.iter().any(|c| c == category) {
                continue;
            }
            series.insert(name.to_string());
            *counts
                .entry((category.to_string(), name.to_string()))
                .or_insert(0.0) += 1.0;
        }
        let series: Vec<String> = series.into_iter().collect();
        let values = categories
            .iter()
            .map(|category| {
                series
                    .iter()
                    .map(|name| {
                        counts
                            .get(&(category.clone(), name.clone()))
                            .copied()
                            .unwrap_or(0.0)
                    })
                    .collect()
            })
            .collect();
        Self {
            categories,
            series,
            values,
        }
    }

    /// Largest stacked total of any category.
    pub(crate) fn max_total(&self) -> f64 {
        self.values
            .iter()
            .map(|row| row.iter().sum::<f64>())
            .fold(0.0, f64::max)
    }
}

/// Mean over a trailing window; the first values use the rows seen so far.
pub(crate) fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (idx, value) in values.iter().enumerate() {
        sum += value;
        if idx >= window {
            sum -= values[idx - window];
        }
        let len = (idx + 1).min(window);
        out.push(sum / len as f64);
    }
    out
}

/// Mean label per calendar month, in month order.
pub(crate) fn monthly_mean(points: &[(NaiveDate, f64)]) -> Vec<(String, f64)> {
    use chrono::Datelike;

    let mut months: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
    for (date, value) in points {
        let entry = months.entry((date.year(), date.month())).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }
    months
        .into_iter()
        .map(|((year, month), (sum, count))| (format!("{year}-{month:02}"), sum / count as f64))
        .collect()
}

/// Five-number summary used for box plots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl BoxStats {
    /// Quartiles with linear interpolation. `None` for no values.
    pub(crate) fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}
