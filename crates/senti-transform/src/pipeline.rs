//! The transform pipeline: raw headline table in, cleaned table out.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use polars::prelude::{
    BooleanChunked, Column, DataFrame, IntoColumn, NamedFrom, NewChunkedArray, Series,
};
use tracing::{debug, info};

use senti_common::schema::{
    ALL_TITLES, AVG_TITLE_LENGTH, DATE, DAY, DAY_OF_WEEK, FINANCIAL_KEYWORDS, LABEL, MONTH,
    NEGATIVE_KEYWORDS, POSITIVE_KEYWORDS, RAW_DATE, RAW_LABEL, SENTIMENT, VALID_TITLES, YEAR,
};
use senti_common::{TITLE_SLOTS, cleaned_columns, raw_title_column, title_column};

use crate::dedupe::first_occurrence_mask;
use crate::error::{Result, TransformError};
use crate::features::TitleFeatures;
use crate::frame::{date_column, passthrough_columns, string_values};
use crate::keywords::KeywordCounter;
use crate::normalization::{parse_date, parse_label, sanitize_title, sentiment_for, weekday_name};
use crate::options::TransformOptions;

/// Counts gathered while cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformReport {
    pub input_rows: usize,
    /// Rows whose `Date` could not be parsed.
    pub unparsed_dates: usize,
    /// Rows whose `Label` was not 0 or 1.
    pub invalid_labels: usize,
    pub duplicates_removed: usize,
    /// Rows dropped for a missing date or label after deduplication.
    pub missing_removed: usize,
    pub output_rows: usize,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// Output rows per sentiment name.
    pub sentiment_counts: BTreeMap<String, usize>,
    /// Mean `valid_titles` over output rows.
    pub mean_valid_titles: f64,
}

/// Cleaned table and its report.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub frame: DataFrame,
    pub report: TransformReport,
}

/// One raw row after normalization, before filtering.
struct NormalizedRow {
    date: Option<NaiveDate>,
    label: Option<i64>,
    titles: Vec<Option<String>>,
    features: TitleFeatures,
}

/// Cleans a raw table with the default keyword lists and sentiment names.
pub fn transform(raw: &DataFrame) -> Result<TransformOutput> {
    transform_with_options(raw, &TransformOptions::default())
}

/// Cleans a raw table.
///
/// Rows are deduplicated on the raw `(Date, Label)` text, keeping the first
/// occurrence, and rows without a valid date or label are dropped. The input
/// table is not modified.
///
/// # Errors
///
/// Returns [`TransformError::MissingColumn`] when `Date` or `Label` is absent
/// and [`TransformError::NoRecords`] when no row survives cleaning.
pub fn transform_with_options(
    raw: &DataFrame,
    options: &TransformOptions,
) -> Result<TransformOutput> {
    for required in [RAW_DATE, RAW_LABEL] {
        if raw.column(required).is_err() {
            return Err(TransformError::MissingColumn {
                column: required.to_string(),
            });
        }
    }

    let financial = KeywordCounter::new(&options.financial_keywords)?;
    let positive = KeywordCounter::new(&options.positive_keywords)?;
    let negative = KeywordCounter::new(&options.negative_keywords)?;

    let input_rows = raw.height();
    let raw_dates = string_values(raw, RAW_DATE)?;
    let raw_labels = string_values(raw, RAW_LABEL)?;

    let mut raw_titles = Vec::with_capacity(TITLE_SLOTS);
    for slot in 1..=TITLE_SLOTS {
        let name = raw_title_column(slot);
        if raw.column(&name).is_ok() {
            raw_titles.push(Some(string_values(raw, &name)?));
        } else {
            debug!(column = %name, "title column absent, slot treated as empty");
            raw_titles.push(None);
        }
    }

    let rows: Vec<NormalizedRow> = (0..input_rows)
        .map(|idx| normalize_row(idx, &raw_dates, &raw_labels, &raw_titles))
        .collect();

    let unparsed_dates = rows.iter().filter(|row| row.date.is_none()).count();
    let invalid_labels = rows.iter().filter(|row| row.label.is_none()).count();

    let first_seen = first_occurrence_mask(&raw_dates, &raw_labels);
    let keep: Vec<bool> = rows
        .iter()
        .zip(&first_seen)
        .map(|(row, first)| *first && row.date.is_some() && row.label.is_some())
        .collect();
    let duplicates_removed = first_seen.iter().filter(|first| !**first).count();
    let output_rows = keep.iter().filter(|kept| **kept).count();
    let missing_removed = input_rows - duplicates_removed - output_rows;

    if output_rows == 0 {
        return Err(TransformError::NoRecords {
            input_rows,
            duplicates_removed,
            missing_removed,
        });
    }

    let kept: Vec<&NormalizedRow> = rows
        .iter()
        .zip(&keep)
        .filter_map(|(row, kept)| kept.then_some(row))
        .collect();

    let cleaned = cleaned_columns();
    let mut columns = Vec::with_capacity(cleaned.len());

    let dates: Vec<NaiveDate> = kept.iter().filter_map(|row| row.date).collect();
    let labels: Vec<i64> = kept.iter().filter_map(|row| row.label).collect();
    // NaiveDate::default() is 1970-01-01
    let epoch = NaiveDate::default();
    let days: Vec<i32> = dates
        .iter()
        .map(|date| i32::try_from((*date - epoch).num_days()).unwrap_or(i32::MAX))
        .collect();
    columns.push(date_column(DATE, days)?);
    columns.push(int_column(YEAR, dates.iter().map(Datelike::year)));
    columns.push(int_column(MONTH, dates.iter().map(|d| d.month() as i32)));
    columns.push(int_column(DAY, dates.iter().map(|d| d.day() as i32)));
    let weekdays: Vec<&str> = dates.iter().map(|d| weekday_name(d.weekday())).collect();
    columns.push(Series::new(DAY_OF_WEEK.into(), weekdays).into_column());

    let sentiments: Vec<&str> = labels
        .iter()
        .filter_map(|label| sentiment_for(Some(*label), &options.sentiment_names))
        .collect();
    columns.push(Series::new(LABEL.into(), &labels).into_column());
    columns.push(Series::new(SENTIMENT.into(), &sentiments).into_column());

    let valid_titles: Vec<u32> = kept.iter().map(|row| row.features.valid_titles).collect();
    let avg_lengths: Vec<Option<f64>> = kept
        .iter()
        .map(|row| row.features.avg_title_length)
        .collect();
    columns.push(Series::new(VALID_TITLES.into(), &valid_titles).into_column());
    columns.push(Series::new(AVG_TITLE_LENGTH.into(), avg_lengths).into_column());

    let lowered: Vec<String> = kept
        .iter()
        .map(|row| row.features.all_titles.to_lowercase())
        .collect();
    for (name, counter) in [
        (FINANCIAL_KEYWORDS, &financial),
        (POSITIVE_KEYWORDS, &positive),
        (NEGATIVE_KEYWORDS, &negative),
    ] {
        let counts: Vec<u32> = lowered.iter().map(|text| counter.count(text)).collect();
        columns.push(Series::new(name.into(), counts).into_column());
    }

    for slot in 0..TITLE_SLOTS {
        let values: Vec<Option<&str>> = kept
            .iter()
            .map(|row| row.titles[slot].as_deref())
            .collect();
        columns.push(Series::new(title_column(slot + 1).into(), values).into_column());
    }
    let all_titles: Vec<&str> = kept
        .iter()
        .map(|row| row.features.all_titles.as_str())
        .collect();
    columns.push(Series::new(ALL_TITLES.into(), all_titles).into_column());

    let extras = passthrough_columns(raw, &cleaned);
    if !extras.is_empty() {
        debug!(columns = ?extras, "carrying extra input columns");
        let mask = BooleanChunked::from_slice("keep".into(), &keep);
        let carried = raw.select(extras)?.filter(&mask)?;
        columns.extend(carried.take_columns());
    }

    let frame = DataFrame::new(columns)?;

    let mut sentiment_counts = BTreeMap::new();
    for sentiment in &sentiments {
        *sentiment_counts.entry((*sentiment).to_string()).or_insert(0) += 1;
    }
    let mean_valid_titles =
        valid_titles.iter().map(|v| f64::from(*v)).sum::<f64>() / output_rows as f64;
    let date_range = dates.iter().min().copied().zip(dates.iter().max().copied());

    let report = TransformReport {
        input_rows,
        unparsed_dates,
        invalid_labels,
        duplicates_removed,
        missing_removed,
        output_rows,
        date_range,
        sentiment_counts,
        mean_valid_titles,
    };
    info!(
        input_rows,
        output_rows,
        duplicates_removed,
        missing_removed,
        unparsed_dates,
        invalid_labels,
        "transform complete"
    );

    Ok(TransformOutput { frame, report })
}

fn normalize_row(
    idx: usize,
    raw_dates: &[Option<String>],
    raw_labels: &[Option<String>],
    raw_titles: &[Option<Vec<Option<String>>>],
) -> NormalizedRow {
    let date = raw_dates[idx].as_deref().and_then(parse_date);
    let label = raw_labels[idx].as_deref().and_then(parse_label);
    let titles: Vec<Option<String>> = raw_titles
        .iter()
        .map(|slot| {
            slot.as_ref()
                .and_then(|values| values[idx].as_deref())
                .and_then(sanitize_title)
        })
        .collect();
    let features = TitleFeatures::from_titles(titles.iter().map(Option::as_deref));
    NormalizedRow {
        date,
        label,
        titles,
        features,
    }
}

fn int_column(name: &str, values: impl Iterator<Item = i32>) -> Column {
    let values: Vec<i32> = values.collect();
    Series::new(name.into(), values).into_column()
}
