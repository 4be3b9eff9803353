use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info_span;

use senti_cli::config::{ConfigOverrides, EtlConfig};
use senti_cli::pipeline::{RunResult, run_pipeline};
use senti_load::{DatabaseStats, SqliteSink};
use senti_transform::{FINANCIAL_KEYWORDS, NEGATIVE_KEYWORDS, POSITIVE_KEYWORDS};

use crate::cli::{RunArgs, StatsArgs};
use crate::summary::print_keywords;

pub fn run_etl(args: &RunArgs) -> Result<RunResult> {
    let overrides = ConfigOverrides {
        input: args.input.clone(),
        output: args.output.clone(),
        database: args.database.clone(),
        graphs_dir: args.graphs_dir.clone(),
        skip_charts: args.skip_charts,
    };
    let config = EtlConfig::resolve(args.config.as_deref(), overrides)?;
    let span = info_span!("run", input = %config.input.display());
    let _guard = span.enter();
    run_pipeline(&config)
}

pub fn run_stats(args: &StatsArgs) -> Result<(PathBuf, DatabaseStats)> {
    let overrides = ConfigOverrides {
        database: args.database.clone(),
        ..ConfigOverrides::default()
    };
    let config = EtlConfig::resolve(args.config.as_deref(), overrides)?;
    let sink = SqliteSink::open_existing(&config.database)
        .with_context(|| format!("open database {}", config.database.display()))?;
    let stats = sink.stats().context("query database stats")?;
    Ok((config.database, stats))
}

pub fn run_keywords() -> Result<()> {
    print_keywords(&[
        ("financial", &FINANCIAL_KEYWORDS[..]),
        ("positive", &POSITIVE_KEYWORDS[..]),
        ("negative", &NEGATIVE_KEYWORDS[..]),
    ]);
    Ok(())
}
