//! Run configuration.
//!
//! Built once in `main` from defaults, an optional TOML file and command-line
//! overrides (in that order of precedence, lowest first), then passed by
//! reference to every stage.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use senti_report::ChartOptions;
use senti_transform::TransformOptions;

/// Paths and settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EtlConfig {
    /// Raw headline CSV.
    pub input: PathBuf,
    /// Cleaned CSV written after the transform.
    pub output: PathBuf,
    /// SQLite database receiving the `sentiment_analysis` table.
    pub database: PathBuf,
    /// Directory receiving chart PNGs.
    pub graphs_dir: PathBuf,
    pub skip_charts: bool,
    pub charts: ChartSettings,
    pub sentiment: SentimentNames,
}

/// Chart rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
    pub rolling_window: usize,
    pub system_fonts: bool,
}

/// Names given to labels 0 and 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SentimentNames {
    pub negative: String,
    pub positive: String,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("extract/files/stock_senti_analysis.csv"),
            output: PathBuf::from("output/cleaned_sentiment_data.csv"),
            database: PathBuf::from("sentiment_analysis.db"),
            graphs_dir: PathBuf::from("graphs"),
            skip_charts: false,
            charts: ChartSettings::default(),
            sentiment: SentimentNames::default(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        let defaults = ChartOptions::default();
        Self {
            width: defaults.width,
            height: defaults.height,
            rolling_window: defaults.rolling_window,
            system_fonts: defaults.system_fonts,
        }
    }
}

impl Default for SentimentNames {
    fn default() -> Self {
        let [negative, positive] = TransformOptions::default().sentiment_names;
        Self { negative, positive }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub database: Option<PathBuf>,
    pub graphs_dir: Option<PathBuf>,
    pub skip_charts: bool,
}

impl EtlConfig {
    /// Parses a TOML configuration file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))
    }

    /// Defaults, then the optional file, then the overrides.
    pub fn resolve(file: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        Ok(config)
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(input) = overrides.input {
            self.input = input;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(database) = overrides.database {
            self.database = database;
        }
        if let Some(graphs_dir) = overrides.graphs_dir {
            self.graphs_dir = graphs_dir;
        }
        self.skip_charts |= overrides.skip_charts;
    }

    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions::default()
            .with_sentiment_names(&self.sentiment.negative, &self.sentiment.positive)
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            width: self.charts.width,
            height: self.charts.height,
            rolling_window: self.charts.rolling_window,
            system_fonts: self.charts.system_fonts,
        }
    }
}
