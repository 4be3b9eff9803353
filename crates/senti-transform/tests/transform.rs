//! End-to-end checks of the cleaning pipeline on small raw tables.

use chrono::NaiveDate;
use polars::prelude::{AnyValue, DataFrame, DataType, IntoColumn, NamedFrom, Series};

use senti_transform::{TransformError, TransformOptions, transform, transform_with_options};

fn raw_frame(columns: &[(&str, Vec<Option<&str>>)]) -> DataFrame {
    let columns = columns
        .iter()
        .map(|(name, values)| Series::new((*name).into(), values).into_column())
        .collect();
    DataFrame::new(columns).unwrap()
}

fn str_at(df: &DataFrame, column: &str, idx: usize) -> Option<String> {
    match df.column(column).unwrap().get(idx).unwrap() {
        AnyValue::String(s) => Some(s.to_string()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        AnyValue::Null => None,
        other => panic!("unexpected value {other:?}"),
    }
}

fn u32_at(df: &DataFrame, column: &str, idx: usize) -> u32 {
    df.column(column).unwrap().u32().unwrap().get(idx).unwrap()
}

#[test]
fn scores_the_reference_row() {
    let raw = raw_frame(&[
        ("Date", vec![Some("2016-07-01")]),
        ("Label", vec![Some("1")]),
        ("Top1", vec![Some("Stocks surge on strong earnings")]),
        ("Top2", vec![Some("")]),
    ]);

    let output = transform(&raw).unwrap();
    let df = &output.frame;

    assert_eq!(df.height(), 1);
    assert_eq!(str_at(df, "sentiment", 0).as_deref(), Some("Positivo"));
    assert_eq!(str_at(df, "day_of_week", 0).as_deref(), Some("Friday"));
    assert_eq!(u32_at(df, "valid_titles", 0), 1);
    assert_eq!(u32_at(df, "financial_keywords", 0), 2);
    assert_eq!(u32_at(df, "positive_keywords", 0), 2);
    assert_eq!(u32_at(df, "negative_keywords", 0), 0);
    assert_eq!(str_at(df, "top2", 0), None);
    assert_eq!(
        str_at(df, "all_titles", 0).as_deref(),
        Some("Stocks surge on strong earnings")
    );

    let avg = df.column("avg_title_length").unwrap().f64().unwrap().get(0);
    assert_eq!(avg, Some(31.0));
    assert_eq!(df.column("date").unwrap().dtype(), &DataType::Date);
    assert_eq!(df.column("year").unwrap().i32().unwrap().get(0), Some(2016));
    assert_eq!(df.column("label").unwrap().i64().unwrap().get(0), Some(1));
}

#[test]
fn invalid_label_row_is_dropped() {
    let raw = raw_frame(&[
        ("Date", vec![Some("2016-07-01"), Some("2016-07-02")]),
        ("Label", vec![Some("abc"), Some("0")]),
        ("Top1", vec![Some("first"), Some("second")]),
    ]);

    let output = transform(&raw).unwrap();

    assert_eq!(output.frame.height(), 1);
    assert_eq!(output.report.invalid_labels, 1);
    assert_eq!(output.report.missing_removed, 1);
    assert_eq!(output.report.duplicates_removed, 0);
    assert_eq!(str_at(&output.frame, "top1", 0).as_deref(), Some("second"));
}

#[test]
fn unparseable_date_row_is_dropped() {
    let raw = raw_frame(&[
        ("Date", vec![Some("yesterday"), Some("2016-07-02"), None]),
        ("Label", vec![Some("1"), Some("1"), Some("0")]),
    ]);

    let output = transform(&raw).unwrap();

    assert_eq!(output.frame.height(), 1);
    assert_eq!(output.report.unparsed_dates, 2);
    assert_eq!(output.report.missing_removed, 2);
}

#[test]
fn duplicate_pairs_keep_the_first_row() {
    let raw = raw_frame(&[
        ("Date", vec![Some("2015-01-01"), Some("2015-01-01")]),
        ("Label", vec![Some("0"), Some("0")]),
        ("Top1", vec![Some("kept"), Some("dropped")]),
    ]);

    let output = transform(&raw).unwrap();

    assert_eq!(output.frame.height(), 1);
    assert_eq!(output.report.duplicates_removed, 1);
    assert_eq!(str_at(&output.frame, "top1", 0).as_deref(), Some("kept"));
}

#[test]
fn titles_are_sanitized() {
    let raw = raw_frame(&[
        ("Date", vec![Some("2016-07-01")]),
        ("Label", vec![Some("0")]),
        ("Top1", vec![Some("Market   crashes!! (again)")]),
        ("Top2", vec![Some("  nan ")]),
        ("Top3", vec![Some("Oil @ $50 & rising")]),
    ]);

    let output = transform(&raw).unwrap();
    let df = &output.frame;

    assert_eq!(
        str_at(df, "top1", 0).as_deref(),
        Some("Market crashes!! (again)")
    );
    assert_eq!(str_at(df, "top2", 0), None);
    assert_eq!(str_at(df, "top3", 0).as_deref(), Some("Oil 50 rising"));
    assert_eq!(u32_at(df, "valid_titles", 0), 2);
    assert_eq!(
        str_at(df, "all_titles", 0).as_deref(),
        Some("Market crashes!! (again) Oil 50 rising")
    );
}

#[test]
fn all_titles_follow_slot_order() {
    // Columns deliberately out of order in the input.
    let raw = raw_frame(&[
        ("Top3", vec![Some("third")]),
        ("Date", vec![Some("2016-07-01")]),
        ("Top1", vec![Some("first")]),
        ("Label", vec![Some("1")]),
        ("Top2", vec![None]),
    ]);

    let output = transform(&raw).unwrap();

    assert_eq!(
        str_at(&output.frame, "all_titles", 0).as_deref(),
        Some("first third")
    );
}

#[test]
fn rows_without_titles_have_null_average() {
    let raw = raw_frame(&[
        ("Date", vec![Some("2016-07-01")]),
        ("Label", vec![Some("1")]),
        ("Top1", vec![None]),
    ]);

    let output = transform(&raw).unwrap();
    let df = &output.frame;

    assert_eq!(u32_at(df, "valid_titles", 0), 0);
    assert_eq!(str_at(df, "all_titles", 0).as_deref(), Some(""));
    assert_eq!(
        df.column("avg_title_length").unwrap().f64().unwrap().get(0),
        None
    );
}

#[test]
fn missing_required_column_is_an_error() {
    let raw = raw_frame(&[("Date", vec![Some("2016-07-01")])]);

    let err = transform(&raw).unwrap_err();

    assert!(matches!(err, TransformError::MissingColumn { ref column } if column == "Label"));
}

#[test]
fn nothing_left_is_an_error() {
    let raw = raw_frame(&[
        ("Date", vec![Some("bad"), Some("bad")]),
        ("Label", vec![Some("1"), Some("1")]),
    ]);

    let err = transform(&raw).unwrap_err();

    match err {
        TransformError::NoRecords {
            input_rows,
            duplicates_removed,
            missing_removed,
        } => {
            assert_eq!(input_rows, 2);
            assert_eq!(duplicates_removed, 1);
            assert_eq!(missing_removed, 1);
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn output_columns_are_fixed_then_extras() {
    let raw = raw_frame(&[
        ("Source", vec![Some("wire")]),
        ("Date", vec![Some("2016-07-01")]),
        ("Label", vec![Some("1")]),
        ("Top1", vec![Some("headline")]),
        ("Region", vec![Some("EU")]),
    ]);

    let output = transform(&raw).unwrap();
    let names: Vec<String> = output
        .frame
        .get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect();

    insta::assert_snapshot!(names.join(","), @"date,year,month,day,day_of_week,label,sentiment,valid_titles,avg_title_length,financial_keywords,positive_keywords,negative_keywords,top1,top2,top3,top4,top5,top6,top7,top8,top9,top10,top11,top12,top13,top14,top15,top16,top17,top18,top19,top20,top21,top22,top23,top24,top25,all_titles,Source,Region");
    assert_eq!(str_at(&output.frame, "Region", 0).as_deref(), Some("EU"));
}

#[test]
fn extra_columns_follow_row_filtering() {
    let raw = raw_frame(&[
        ("Date", vec![Some("2016-07-01"), Some("2016-07-01"), Some("2016-07-02")]),
        ("Label", vec![Some("1"), Some("1"), Some("x")]),
        ("Source", vec![Some("a"), Some("b"), Some("c")]),
    ]);

    let output = transform(&raw).unwrap();

    assert_eq!(output.frame.height(), 1);
    assert_eq!(str_at(&output.frame, "Source", 0).as_deref(), Some("a"));
}

#[test]
fn report_summarizes_output() {
    let raw = raw_frame(&[
        ("Date", vec![Some("2016-07-03"), Some("2016-07-01"), Some("2016-07-02")]),
        ("Label", vec![Some("1"), Some("0"), Some("1.0")]),
        ("Top1", vec![Some("a"), Some("b"), None]),
        ("Top2", vec![Some("c"), None, None]),
    ]);

    let report = transform(&raw).unwrap().report;

    assert_eq!(report.input_rows, 3);
    assert_eq!(report.output_rows, 3);
    assert_eq!(
        report.date_range,
        Some((
            NaiveDate::from_ymd_opt(2016, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2016, 7, 3).unwrap()
        ))
    );
    assert_eq!(report.sentiment_counts.get("Positivo"), Some(&2));
    assert_eq!(report.sentiment_counts.get("Negativo"), Some(&1));
    assert!((report.mean_valid_titles - 1.0).abs() < f64::EPSILON);
}

#[test]
fn options_change_names_and_keywords() {
    let raw = raw_frame(&[
        ("Date", vec![Some("2016-07-01")]),
        ("Label", vec![Some("0")]),
        ("Top1", vec![Some("Gold glitters")]),
    ]);
    let mut options = TransformOptions::default().with_sentiment_names("bear", "bull");
    options.financial_keywords = vec!["gold".to_string()];

    let output = transform_with_options(&raw, &options).unwrap();

    assert_eq!(str_at(&output.frame, "sentiment", 0).as_deref(), Some("bear"));
    assert_eq!(u32_at(&output.frame, "financial_keywords", 0), 1);
}

#[test]
fn input_is_left_untouched() {
    let raw = raw_frame(&[
        ("Date", vec![Some("2016-07-01")]),
        ("Label", vec![Some("1")]),
        ("Top1", vec![Some("  spaced   out  ")]),
    ]);
    let before = raw.clone();

    transform(&raw).unwrap();

    assert!(raw.equals_missing(&before));
}
