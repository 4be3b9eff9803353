use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use senti_cli::pipeline::{ChartOutcome, RunResult};
use senti_load::DatabaseStats;

pub fn print_summary(result: &RunResult) {
    println!("Input: {} ({})", result.input.display(), result.encoding);
    println!("Cleaned CSV: {}", result.csv_path.display());
    println!(
        "Database: {} (table {})",
        result.load.path.display(),
        result.load.table
    );
    if let Some((first, last)) = result.transform.date_range {
        println!("Date range: {first} to {last}");
    }

    let report = &result.transform;
    let timings = &result.timings;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Dropped"),
        header_cell("Time (ms)"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        stage_cell("extract"),
        dim_cell("-"),
        Cell::new(result.extract.rows),
        dim_cell("-"),
        Cell::new(timings.extract_ms),
    ]);
    table.add_row(vec![
        stage_cell("transform"),
        Cell::new(report.input_rows),
        Cell::new(report.output_rows),
        count_cell(
            report.duplicates_removed + report.missing_removed,
            Color::Yellow,
        ),
        Cell::new(timings.transform_ms),
    ]);
    table.add_row(vec![
        stage_cell("load"),
        Cell::new(report.output_rows),
        Cell::new(result.load.rows),
        dim_cell("-"),
        Cell::new(timings.load_ms),
    ]);
    let (charts_out, charts_time) = match &result.charts {
        ChartOutcome::Skipped => (dim_cell("skipped"), dim_cell("-")),
        ChartOutcome::Rendered(paths) => (Cell::new(paths.len()), Cell::new(timings.report_ms)),
        ChartOutcome::Failed(_) => (
            Cell::new("failed")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            Cell::new(timings.report_ms),
        ),
    };
    table.add_row(vec![
        stage_cell("report"),
        dim_cell("-"),
        charts_out,
        dim_cell("-"),
        charts_time,
    ]);
    println!("{table}");

    print_cleaning_table(result);
    match &result.stats {
        Some(stats) => print_stats_tables(stats),
        None => print_sentiment_table(
            report
                .sentiment_counts
                .iter()
                .map(|(name, count)| (name.as_str(), *count as i64)),
            report.output_rows as i64,
        ),
    }

    if let ChartOutcome::Rendered(paths) = &result.charts {
        println!();
        println!("Charts:");
        for path in paths {
            println!("- {}", path.display());
        }
    }
    if let ChartOutcome::Failed(message) = &result.charts {
        eprintln!("Errors:");
        eprintln!("- {message}");
    }
}

fn print_cleaning_table(result: &RunResult) {
    let report = &result.transform;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Cleaning"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("Unparseable dates", report.unparsed_dates),
        ("Invalid labels", report.invalid_labels),
        ("Duplicates removed", report.duplicates_removed),
        ("Missing date or label removed", report.missing_removed),
    ];
    for (label, count) in rows {
        table.add_row(vec![Cell::new(label), count_cell(count, Color::Yellow)]);
    }
    table.add_row(vec![
        Cell::new("Mean valid titles per day"),
        Cell::new(format!("{:.2}", report.mean_valid_titles)),
    ]);
    println!();
    println!("{table}");
}

fn print_sentiment_table<'a, I>(counts: I, total: i64)
where
    I: IntoIterator<Item = (&'a str, i64)>,
{
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sentiment"),
        header_cell("Records"),
        header_cell("Share"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (name, count) in counts {
        table.add_row(vec![
            sentiment_cell(name),
            Cell::new(count),
            Cell::new(share(count, total)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!();
    println!("{table}");
}

pub fn print_stats(path: &Path, stats: &DatabaseStats) {
    println!("Database: {}", path.display());
    print_stats_tables(stats);
}

fn print_stats_tables(stats: &DatabaseStats) {
    print_sentiment_table(
        stats
            .by_sentiment
            .iter()
            .map(|(name, count)| (name.as_str(), *count)),
        stats.total,
    );

    let mut table = Table::new();
    table.set_header(vec![header_cell("Year"), header_cell("Records")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (year, count) in &stats.by_year {
        table.add_row(vec![Cell::new(year), Cell::new(count)]);
    }
    println!();
    println!("Most recent years:");
    println!("{table}");
}

pub fn print_keywords(lists: &[(&str, &[&str])]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("List"),
        header_cell("Terms"),
        header_cell("Keywords"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (name, keywords) in lists {
        table.add_row(vec![
            stage_cell(name),
            Cell::new(keywords.len()),
            Cell::new(keywords.join(", ")),
        ]);
    }
    println!("{table}");
}

fn share(count: i64, total: i64) -> String {
    if total <= 0 {
        return "-".to_string();
    }
    format!("{:.1}%", count as f64 * 100.0 / total as f64)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn stage_cell(name: &str) -> Cell {
    Cell::new(name).add_attribute(Attribute::Bold)
}

/// Colors follow the default sentiment names; custom names stay plain.
fn sentiment_cell(name: &str) -> Cell {
    let lowered = name.to_lowercase();
    if lowered.starts_with("neg") {
        Cell::new(name).fg(Color::Red)
    } else if lowered.starts_with("pos") {
        Cell::new(name).fg(Color::Green)
    } else {
        Cell::new(name)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
