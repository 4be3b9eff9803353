//! Library components of the `senti-etl` command.

pub mod config;
pub mod logging;
pub mod pipeline;
