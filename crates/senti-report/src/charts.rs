//! Chart definitions and the render entry point.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use polars::prelude::DataFrame;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use tracing::{debug, info, warn};

use senti_common::schema::{
    AVG_TITLE_LENGTH, DATE, DAY_OF_WEEK, LABEL, SENTIMENT, VALID_TITLES, YEAR,
};

use crate::data::{
    BoxStats, Crosstab, WEEKDAYS, float_values, has_columns, int_values, monthly_mean,
    parse_iso_date, rolling_mean, text_values,
};
use crate::error::{ReportError, Result};
use crate::svg::{Anchor, Panel, Svg};

const SERIES_COLORS: [&str; 4] = ["#ff6b6b", "#4ecdc4", "#ffa94d", "#748ffc"];
const TREND_COLOR: &str = "#2E86AB";
const MONTHLY_COLOR: &str = "#A23B72";

/// Rendering settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    /// Rows averaged by the sentiment trend line.
    pub rolling_window: usize,
    /// Load installed fonts so labels render; without fonts only shapes are drawn.
    pub system_fonts: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
            rolling_window: 30,
            system_fonts: true,
        }
    }
}

/// A chart that can be produced from the cleaned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    SentimentByYear,
    SentimentByWeekday,
    SentimentOverTime,
    TitleAnalysis,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::SentimentByYear,
        ChartKind::SentimentByWeekday,
        ChartKind::SentimentOverTime,
        ChartKind::TitleAnalysis,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::SentimentByYear => "01_sentiment_by_year.png",
            Self::SentimentByWeekday => "02_sentiment_by_weekday.png",
            Self::SentimentOverTime => "03_sentiment_over_time.png",
            Self::TitleAnalysis => "05_title_analysis.png",
        }
    }

    /// Columns the chart is drawn from.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::SentimentByYear => &[YEAR, SENTIMENT],
            Self::SentimentByWeekday => &[DAY_OF_WEEK, SENTIMENT],
            Self::SentimentOverTime => &[DATE, LABEL],
            Self::TitleAnalysis => &[SENTIMENT, AVG_TITLE_LENGTH, VALID_TITLES],
        }
    }

    fn build_svg(self, df: &DataFrame, options: &ChartOptions) -> Result<String> {
        match self {
            Self::SentimentByYear => sentiment_by_year(df, options),
            Self::SentimentByWeekday => sentiment_by_weekday(df, options),
            Self::SentimentOverTime => sentiment_over_time(df, options),
            Self::TitleAnalysis => title_analysis(df, options),
        }
    }
}

/// Renders every chart whose columns are present into `dir` as PNG.
///
/// The directory is created when absent. Returns the written paths in chart
/// order; charts with missing columns are skipped.
pub fn render_charts(df: &DataFrame, dir: &Path, options: &ChartOptions) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        operation: "create directory",
        path: dir.to_path_buf(),
        source,
    })?;

    let mut usvg_options = Options::default();
    if options.system_fonts {
        usvg_options.fontdb_mut().load_system_fonts();
    }

    let mut written = Vec::new();
    for kind in ChartKind::ALL {
        if !has_columns(df, kind.required_columns()) {
            warn!(chart = kind.file_name(), "required columns missing, chart skipped");
            continue;
        }
        let svg = kind.build_svg(df, options)?;
        let path = dir.join(kind.file_name());
        rasterize(&svg, &usvg_options, kind, &path)?;
        debug!(path = %path.display(), "chart written");
        written.push(path);
    }

    info!(dir = %dir.display(), charts = written.len(), "charts rendered");
    Ok(written)
}

fn rasterize(svg: &str, usvg_options: &Options, kind: ChartKind, path: &Path) -> Result<()> {
    let tree = Tree::from_str(svg, usvg_options).map_err(|e| ReportError::Svg {
        chart: kind.file_name().to_string(),
        message: e.to_string(),
    })?;
    let size = tree.size().to_int_size();
    let mut pixmap =
        Pixmap::new(size.width(), size.height()).ok_or_else(|| ReportError::Raster {
            path: path.to_path_buf(),
            message: format!("cannot allocate {}x{} pixmap", size.width(), size.height()),
        })?;
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());
    let png = pixmap.encode_png().map_err(|e| ReportError::Raster {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    fs::write(path, png).map_err(|source| ReportError::Io {
        operation: "write",
        path: path.to_path_buf(),
        source,
    })
}

fn color(index: usize) -> &'static str {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Draws a stacked bar chart of `table` into the whole document.
fn stacked_bars(table: &Crosstab, title: &str, x_label: &str, options: &ChartOptions) -> String {
    let mut svg = Svg::new(options.width, options.height);
    let panel = Panel::inset(0.0, 0.0, options.width as f32, options.height as f32)
        .with_y_range(0.0, table.max_total().max(1.0) * 1.05);
    panel.draw_frame(&mut svg, title, x_label, "Records");

    let count = table.categories.len();
    for (idx, (category, row)) in table.categories.iter().zip(&table.values).enumerate() {
        let (start, band) = panel.band(idx, count);
        let mut base = 0.0;
        for (series_idx, value) in row.iter().enumerate() {
            let top = panel.y(base + value);
            let height = panel.y(base) - top;
            svg.rect(start + band * 0.15, top, band * 0.7, height, color(series_idx));
            base += value;
        }
        panel.category_label(&mut svg, idx, count, category);
    }

    let legend: Vec<(&str, &str)> = table
        .series
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.as_str(), color(idx)))
        .collect();
    panel.legend(&mut svg, &legend);
    svg.finish()
}

fn sentiment_by_year(df: &DataFrame, options: &ChartOptions) -> Result<String> {
    let years = int_values(df, YEAR)?;
    let sentiments = text_values(df, SENTIMENT)?;
    let pairs: Vec<(String, &str)> = years
        .iter()
        .zip(&sentiments)
        .filter_map(|(year, sentiment)| Some(((*year)?.to_string(), sentiment.as_deref()?)))
        .collect();
    let mut categories: Vec<String> = pairs.iter().map(|(year, _)| year.clone()).collect();
    categories.sort_by_key(|year| year.parse::<i64>().unwrap_or(i64::MAX));
    categories.dedup();

    let table = Crosstab::count(
        categories,
        pairs.iter().map(|(year, sentiment)| (year.as_str(), *sentiment)),
    );
    Ok(stacked_bars(&table, "Sentiment by Year", "Year", options))
}

fn sentiment_by_weekday(df: &DataFrame, options: &ChartOptions) -> Result<String> {
    let days = text_values(df, DAY_OF_WEEK)?;
    let sentiments = text_values(df, SENTIMENT)?;
    let table = Crosstab::count(
        WEEKDAYS.iter().map(ToString::to_string).collect(),
        days.iter()
            .zip(&sentiments)
            .filter_map(|(day, sentiment)| Some((day.as_deref()?, sentiment.as_deref()?))),
    );
    Ok(stacked_bars(
        &table,
        "Sentiment by Day of Week",
        "Day of week",
        options,
    ))
}

fn sentiment_over_time(df: &DataFrame, options: &ChartOptions) -> Result<String> {
    let dates = text_values(df, DATE)?;
    let labels = float_values(df, LABEL)?;
    let mut points: Vec<(NaiveDate, f64)> = dates
        .iter()
        .zip(&labels)
        .filter_map(|(date, label)| Some((parse_iso_date(date.as_deref()?)?, (*label)?)))
        .collect();
    points.sort_by_key(|(date, _)| *date);

    let half = options.height as f32 / 2.0;
    let width = options.width as f32;
    let mut svg = Svg::new(options.width, options.height);

    let values: Vec<f64> = points.iter().map(|(_, label)| *label).collect();
    let trend = rolling_mean(&values, options.rolling_window);
    let day = |date: &NaiveDate| f64::from(date.num_days_from_ce());
    let (first, last) = match (points.first(), points.last()) {
        (Some((first, _)), Some((last, _))) => (day(first), day(last)),
        _ => (0.0, 1.0),
    };
    let top = Panel::inset(0.0, 0.0, width, half)
        .with_x_range(first, last)
        .with_y_range(0.0, 1.0);
    top.draw_frame(
        &mut svg,
        &format!("Sentiment ({}-row moving average)", options.rolling_window),
        "Date",
        "Mean label",
    );
    let line: Vec<(f32, f32)> = points
        .iter()
        .zip(&trend)
        .map(|((date, _), mean)| (top.x(day(date)), top.y(*mean)))
        .collect();
    svg.polyline(&line, TREND_COLOR, 2.0);
    if let (Some((first, _)), Some((last, _))) = (points.first(), points.last()) {
        svg.text((top.left, top.bottom() + 20.0), &first.to_string(), 12.0, Anchor::Start);
        svg.text(
            (top.left + top.width, top.bottom() + 20.0),
            &last.to_string(),
            12.0,
            Anchor::End,
        );
    }

    let months = monthly_mean(&points);
    let bottom = Panel::inset(0.0, half, width, half)
        .with_x_range(0.0, months.len().saturating_sub(1) as f64)
        .with_y_range(0.0, 1.0);
    bottom.draw_frame(&mut svg, "Mean Sentiment by Month", "Month", "Mean label");
    let monthly: Vec<(f32, f32)> = months
        .iter()
        .enumerate()
        .map(|(idx, (_, mean))| (bottom.x(idx as f64), bottom.y(*mean)))
        .collect();
    svg.polyline(&monthly, MONTHLY_COLOR, 2.0);
    let label_every = (months.len() / 12).max(1);
    for (idx, ((month, _), point)) in months.iter().zip(&monthly).enumerate() {
        svg.circle(*point, 4.0, MONTHLY_COLOR, 1.0);
        if idx % label_every == 0 {
            svg.text((point.0, bottom.bottom() + 20.0), month, 11.0, Anchor::Middle);
        }
    }

    Ok(svg.finish())
}

fn title_analysis(df: &DataFrame, options: &ChartOptions) -> Result<String> {
    let sentiments = text_values(df, SENTIMENT)?;
    let lengths = float_values(df, AVG_TITLE_LENGTH)?;
    let counts = float_values(df, VALID_TITLES)?;
    let years = if has_columns(df, &[YEAR]) {
        Some(int_values(df, YEAR)?)
    } else {
        None
    };

    let mut groups: BTreeMap<&str, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for ((sentiment, length), count) in sentiments.iter().zip(&lengths).zip(&counts) {
        let Some(sentiment) = sentiment.as_deref() else {
            continue;
        };
        let group = groups.entry(sentiment).or_default();
        if let Some(length) = length {
            group.0.push(*length);
        }
        if let Some(count) = count {
            group.1.push(*count);
        }
    }
    let names: Vec<&str> = groups.keys().copied().collect();

    let half_w = options.width as f32 / 2.0;
    let half_h = options.height as f32 / 2.0;
    let mut svg = Svg::new(options.width, options.height);

    let length_boxes: Vec<Option<BoxStats>> = groups
        .values()
        .map(|(lengths, _)| BoxStats::from_values(lengths))
        .collect();
    box_panel(
        &mut svg,
        Panel::inset(0.0, 0.0, half_w, half_h),
        &names,
        &length_boxes,
        ("Average Title Length", "Characters"),
    );

    let count_boxes: Vec<Option<BoxStats>> = groups
        .values()
        .map(|(_, counts)| BoxStats::from_values(counts))
        .collect();
    box_panel(
        &mut svg,
        Panel::inset(half_w, 0.0, half_w, half_h),
        &names,
        &count_boxes,
        ("Valid Titles per Day", "Titles"),
    );

    let max_length = lengths.iter().flatten().copied().fold(0.0, f64::max);
    let scatter = Panel::inset(0.0, half_h, half_w, half_h)
        .with_x_range(0.0, 25.0)
        .with_y_range(0.0, max_length.max(1.0) * 1.05);
    scatter.draw_frame(
        &mut svg,
        "Valid Titles vs Average Length",
        "Valid titles",
        "Average length",
    );
    for ((sentiment, length), count) in sentiments.iter().zip(&lengths).zip(&counts) {
        let (Some(sentiment), Some(length), Some(count)) = (sentiment.as_deref(), length, count)
        else {
            continue;
        };
        let series = names.iter().position(|n| *n == sentiment).unwrap_or(0);
        svg.circle(
            (scatter.x(*count), scatter.y(*length)),
            3.0,
            color(series),
            0.6,
        );
    }
    scatter.legend(&mut svg, &legend_entries(&names));

    let yearly = Panel::inset(half_w, half_h, half_w, half_h);
    match years {
        Some(years) => yearly_valid_titles(&mut svg, yearly, &names, &years, &sentiments, &counts),
        None => yearly.with_y_range(0.0, 25.0).draw_frame(
            &mut svg,
            "Mean Valid Titles by Year",
            "Year",
            "Titles",
        ),
    }

    Ok(svg.finish())
}

fn legend_entries<'a>(names: &[&'a str]) -> Vec<(&'a str, &'static str)> {
    names
        .iter()
        .enumerate()
        .map(|(idx, name)| (*name, color(idx)))
        .collect()
}

fn box_panel(
    svg: &mut Svg,
    panel: Panel,
    names: &[&str],
    boxes: &[Option<BoxStats>],
    (title, y_label): (&str, &str),
) {
    let max = boxes.iter().flatten().map(|b| b.max).fold(0.0, f64::max);
    let panel = panel.with_y_range(0.0, max.max(1.0) * 1.05);
    panel.draw_frame(svg, title, "Sentiment", y_label);
    for (idx, stats) in boxes.iter().enumerate() {
        panel.category_label(svg, idx, names.len(), names[idx]);
        let Some(stats) = stats else {
            continue;
        };
        let (start, band) = panel.band(idx, names.len());
        let center = start + band / 2.0;
        let half = band * 0.2;
        svg.line((center, panel.y(stats.min)), (center, panel.y(stats.q1)), "#555555", 1.5);
        svg.line((center, panel.y(stats.q3)), (center, panel.y(stats.max)), "#555555", 1.5);
        let top = panel.y(stats.q3);
        svg.rect(center - half, top, half * 2.0, panel.y(stats.q1) - top, color(idx));
        svg.line(
            (center - half, panel.y(stats.median)),
            (center + half, panel.y(stats.median)),
            "#222222",
            2.0,
        );
    }
}

fn yearly_valid_titles(
    svg: &mut Svg,
    panel: Panel,
    names: &[&str],
    years: &[Option<i64>],
    sentiments: &[Option<String>],
    counts: &[Option<f64>],
) {
    let mut sums: BTreeMap<(i64, &str), (f64, usize)> = BTreeMap::new();
    for ((year, sentiment), count) in years.iter().zip(sentiments).zip(counts) {
        let (Some(year), Some(sentiment), Some(count)) = (year, sentiment.as_deref(), count) else {
            continue;
        };
        let entry = sums.entry((*year, sentiment)).or_insert((0.0, 0));
        entry.0 += count;
        entry.1 += 1;
    }
    let first = sums.keys().map(|(year, _)| *year).min().unwrap_or(0);
    let last = sums.keys().map(|(year, _)| *year).max().unwrap_or(0);
    let panel = panel
        .with_x_range(first as f64, last as f64)
        .with_y_range(0.0, 25.0);
    panel.draw_frame(svg, "Mean Valid Titles by Year", "Year", "Titles");

    for (idx, name) in names.iter().enumerate() {
        let points: Vec<(f32, f32)> = sums
            .iter()
            .filter(|((_, sentiment), _)| sentiment == name)
            .map(|((year, _), (sum, n))| (panel.x(*year as f64), panel.y(sum / *n as f64)))
            .collect();
        svg.polyline(&points, color(idx), 2.0);
        for point in &points {
            svg.circle(*point, 4.0, color(idx), 1.0);
        }
    }
    for year in first..=last {
        svg.text(
            (panel.x(year as f64), panel.bottom() + 20.0),
            &year.to_string(),
            11.0,
            Anchor::Middle,
        );
    }
    panel.legend(svg, &legend_entries(names));
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("date".into(), &["2016-07-02", "2016-07-01", "2016-08-01"]).into_column(),
            Series::new("year".into(), &[2016i64, 2016, 2016]).into_column(),
            Series::new("day_of_week".into(), &["Saturday", "Friday", "Monday"]).into_column(),
            Series::new("label".into(), &[1i64, 0, 1]).into_column(),
            Series::new("sentiment".into(), &["Positivo", "Negativo", "Positivo"]).into_column(),
            Series::new("valid_titles".into(), &[2i64, 1, 0]).into_column(),
            Series::new("avg_title_length".into(), &[Some(10.5), Some(4.0), None]).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn every_chart_builds_svg() {
        let df = frame();
        let options = ChartOptions::default();
        for kind in ChartKind::ALL {
            let svg = kind.build_svg(&df, &options).unwrap();
            assert!(svg.starts_with("<svg"), "{kind:?}");
            assert!(svg.trim_end().ends_with("</svg>"), "{kind:?}");
        }
    }

    #[test]
    fn weekday_chart_lists_days_in_order() {
        let svg = sentiment_by_weekday(&frame(), &ChartOptions::default()).unwrap();
        let monday = svg.find(">Monday<").unwrap();
        let friday = svg.find(">Friday<").unwrap();
        let sunday = svg.find(">Sunday<").unwrap();
        assert!(monday < friday && friday < sunday);
    }

    #[test]
    fn file_names_skip_chart_four() {
        let names: Vec<&str> = ChartKind::ALL.into_iter().map(ChartKind::file_name).collect();
        assert_eq!(
            names,
            vec![
                "01_sentiment_by_year.png",
                "02_sentiment_by_weekday.png",
                "03_sentiment_over_time.png",
                "05_title_analysis.png",
            ]
        );
    }
}
