//! CLI argument definitions for the headline sentiment ETL.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "senti-etl",
    version,
    about = "Headline sentiment ETL - clean daily news headlines into CSV and SQLite",
    long_about = "Extract daily financial news headlines with a binary sentiment label,\n\
                  clean and enrich them, then persist the result as CSV and SQLite.\n\
                  Optionally renders summary charts as PNG files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run extract, transform, load and charts once.
    Run(RunArgs),

    /// Print record counts from an existing database.
    Stats(StatsArgs),

    /// List the keyword lists used for headline counts.
    Keywords,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Raw headline CSV.
    #[arg(long = "input", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Cleaned CSV to write.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// SQLite database to replace the table in.
    #[arg(long = "database", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Directory for chart PNGs.
    #[arg(long = "graphs-dir", value_name = "DIR")]
    pub graphs_dir: Option<PathBuf>,

    /// TOML file with run settings. Flags take precedence over its values.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Persist the data without rendering charts.
    #[arg(long = "skip-charts")]
    pub skip_charts: bool,
}

#[derive(Parser)]
pub struct StatsArgs {
    /// SQLite database written by `run`.
    #[arg(long = "database", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// TOML file with run settings.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_flags_parse() {
        let cli = Cli::parse_from([
            "senti-etl",
            "run",
            "--input",
            "news.csv",
            "--skip-charts",
            "--log-format",
            "json",
        ]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.input, Some(PathBuf::from("news.csv")));
        assert!(args.skip_charts);
        assert!(args.output.is_none());
        assert!(matches!(cli.log_format, LogFormatArg::Json));
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::parse_from(["senti-etl", "stats", "--log-level", "debug"]);
        assert!(matches!(cli.command, Command::Stats(_)));
        assert!(matches!(cli.log_level, Some(LogLevelArg::Debug)));
    }
}
