//! Rendering charts from a persisted CSV into a temporary directory.

use std::fs;

use chrono::{Days, NaiveDate};

use senti_report::{ChartKind, ChartOptions, ReportError, read_chart_data, render_charts};

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn small_options() -> ChartOptions {
    ChartOptions {
        width: 400,
        height: 300,
        rolling_window: 2,
        system_fonts: false,
    }
}

const CLEANED_CSV: &str = "\
date,year,month,day,day_of_week,label,sentiment,valid_titles,avg_title_length
2015-12-31,2015,12,31,Thursday,0,Negativo,3,21.5
2016-07-01,2016,7,1,Friday,1,Positivo,2,18.0
2016-07-04,2016,7,4,Monday,1,Positivo,0,
2016-08-01,2016,8,1,Monday,0,Negativo,25,40.25
";

#[test]
fn renders_all_charts_from_persisted_csv() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("cleaned.csv");
    fs::write(&csv_path, CLEANED_CSV).unwrap();
    let graphs = dir.path().join("graphs/nested");

    let df = read_chart_data(&csv_path).unwrap();
    let written = render_charts(&df, &graphs, &small_options()).unwrap();

    let expected: Vec<_> = ChartKind::ALL
        .into_iter()
        .map(|kind| graphs.join(kind.file_name()))
        .collect();
    assert_eq!(written, expected);
    for path in &written {
        let bytes = fs::read(path).unwrap();
        assert_eq!(bytes[..8], PNG_MAGIC, "{}", path.display());
    }
}

#[test]
fn charts_without_their_columns_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("cleaned.csv");
    fs::write(
        &csv_path,
        "date,label,sentiment\n2016-07-01,1,Positivo\n2016-07-02,0,Negativo\n",
    )
    .unwrap();

    let df = read_chart_data(&csv_path).unwrap();
    let written = render_charts(&df, dir.path(), &small_options()).unwrap();

    assert_eq!(written, vec![dir.path().join("03_sentiment_over_time.png")]);
    assert!(!dir.path().join("01_sentiment_by_year.png").exists());
}

#[test]
fn missing_csv_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_chart_data(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, ReportError::Csv { .. }));
}

#[test]
fn numeric_looking_headlines_do_not_break_the_reread() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("cleaned.csv");
    let start = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
    let mut csv = String::from(
        "date,year,month,day,day_of_week,label,sentiment,valid_titles,avg_title_length,top1,all_titles\n",
    );
    for idx in 0..150u64 {
        let date = start + Days::new(idx);
        let title = if idx < 120 { "2016" } else { "Stocks rally" };
        let (label, sentiment) = if idx % 3 == 0 { (0, "Negativo") } else { (1, "Positivo") };
        csv.push_str(&format!(
            "{date},2016,{},{},{},{label},{sentiment},1,{}.0,{title},{title}\n",
            date.format("%-m"),
            date.format("%-d"),
            date.format("%A"),
            title.len(),
        ));
    }
    fs::write(&csv_path, csv).unwrap();

    let df = read_chart_data(&csv_path).unwrap();
    assert_eq!(df.height(), 150);
    let written = render_charts(&df, dir.path(), &small_options()).unwrap();

    assert_eq!(written.len(), ChartKind::ALL.len());
}
