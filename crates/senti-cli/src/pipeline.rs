//! The sequential extract, transform, load and report run.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{error, info, info_span, warn};

use senti_ingest::{ExtractProfile, SourceEncoding, profile, read_headlines};
use senti_load::{DatabaseStats, LoadSummary, SqliteSink, write_clean_csv};
use senti_report::{read_chart_data, render_charts};
use senti_transform::{TransformReport, transform_with_options};

use crate::config::EtlConfig;

/// Wall-clock time spent in each stage, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageTimings {
    pub extract_ms: u128,
    pub transform_ms: u128,
    pub load_ms: u128,
    pub report_ms: u128,
}

/// Outcome of the chart stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutcome {
    Skipped,
    Rendered(Vec<PathBuf>),
    /// Rendering failed after the data was already persisted.
    Failed(String),
}

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub input: PathBuf,
    pub encoding: SourceEncoding,
    pub extract: ExtractProfile,
    pub transform: TransformReport,
    pub csv_path: PathBuf,
    pub load: LoadSummary,
    /// Aggregates queried back from the database; `None` when the query failed.
    pub stats: Option<DatabaseStats>,
    pub charts: ChartOutcome,
    pub timings: StageTimings,
}

impl RunResult {
    /// True when a stage after persistence failed.
    pub fn has_errors(&self) -> bool {
        matches!(self.charts, ChartOutcome::Failed(_))
    }
}

/// Runs the whole pipeline once.
///
/// Any failure up to and including the database load aborts the run. A chart
/// failure is recorded in the result instead, since the data is committed by
/// then.
pub fn run_pipeline(config: &EtlConfig) -> Result<RunResult> {
    let mut timings = StageTimings::default();

    let (raw, extract) = {
        let span = info_span!("extract", input = %config.input.display());
        let _guard = span.enter();
        let start = Instant::now();
        let raw = read_headlines(&config.input)
            .with_context(|| format!("extract {}", config.input.display()))?;
        timings.extract_ms = start.elapsed().as_millis();
        let extract = profile(&raw);
        info!(
            rows = extract.rows,
            columns = extract.columns.len(),
            date_min = extract.date_min.as_deref().unwrap_or("-"),
            date_max = extract.date_max.as_deref().unwrap_or("-"),
            negative_labels = extract.negative_labels,
            positive_labels = extract.positive_labels,
            encoding = %raw.encoding,
            duration_ms = timings.extract_ms,
            "extract complete"
        );
        (raw, extract)
    };

    let output = {
        let span = info_span!("transform", rows = raw.height());
        let _guard = span.enter();
        let start = Instant::now();
        let output = transform_with_options(&raw.frame, &config.transform_options())
            .context("transform headlines")?;
        timings.transform_ms = start.elapsed().as_millis();
        if output.report.missing_removed > 0 {
            warn!(
                rows = output.report.missing_removed,
                "rows without a valid date or label dropped"
            );
        }
        info!(
            rows = output.report.output_rows,
            duration_ms = timings.transform_ms,
            "transform complete"
        );
        output
    };

    let (load, stats) = {
        let span = info_span!("load", database = %config.database.display());
        let _guard = span.enter();
        let start = Instant::now();
        write_clean_csv(&output.frame, &config.output).context("write cleaned CSV")?;
        let mut sink = SqliteSink::open(&config.database)
            .with_context(|| format!("open database {}", config.database.display()))?;
        let load = sink.load(&output.frame).context("load database")?;
        timings.load_ms = start.elapsed().as_millis();
        info!(
            rows = load.rows,
            duration_ms = timings.load_ms,
            "load complete"
        );
        let stats = match sink.stats() {
            Ok(stats) => {
                info!(
                    total = stats.total,
                    sentiments = stats.by_sentiment.len(),
                    "database stats"
                );
                Some(stats)
            }
            Err(err) => {
                error!(error = %err, "database stats query failed");
                None
            }
        };
        (load, stats)
    };

    let charts = if config.skip_charts {
        ChartOutcome::Skipped
    } else {
        let span = info_span!("report", dir = %config.graphs_dir.display());
        let _guard = span.enter();
        let start = Instant::now();
        let outcome = match render_from_csv(config) {
            Ok(paths) => ChartOutcome::Rendered(paths),
            Err(err) => {
                error!(error = %format!("{err:#}"), "chart rendering failed");
                ChartOutcome::Failed(format!("{err:#}"))
            }
        };
        timings.report_ms = start.elapsed().as_millis();
        info!(duration_ms = timings.report_ms, "report complete");
        outcome
    };

    Ok(RunResult {
        input: config.input.clone(),
        encoding: raw.encoding,
        extract,
        transform: output.report,
        csv_path: config.output.clone(),
        load,
        stats,
        charts,
        timings,
    })
}

/// Charts are drawn from the persisted CSV, not the in-memory table.
fn render_from_csv(config: &EtlConfig) -> Result<Vec<PathBuf>> {
    let df = read_chart_data(&config.output).context("read cleaned CSV for charts")?;
    render_charts(&df, &config.graphs_dir, &config.chart_options()).context("render charts")
}
