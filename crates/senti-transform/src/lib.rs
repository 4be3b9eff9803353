//! Headline sentiment transformation crate.
//!
//! Turns the raw daily headline table into a cleaned, feature-enriched and
//! deduplicated table.
//!
//! # Overview
//!
//! The pipeline runs these stages in order, each feeding the next:
//!
//! 1. Date normalization (`year`, `month`, `day`, `day_of_week`)
//! 2. Label normalization and `sentiment` mapping
//! 3. Title sanitization for `Top1`..`Top25`
//! 4. Title features (`valid_titles`, `all_titles`, `avg_title_length`)
//! 5. Deduplication on the raw `(Date, Label)` pair, first occurrence wins
//! 6. Removal of rows without a normalized date or label
//! 7. Keyword scoring over the lower-cased `all_titles`
//! 8. Fixed column ordering
//!
//! Bad individual values never fail the transform: they degrade to missing and
//! are dropped in stage 6. Only structural problems are errors.
//!
//! # Example
//!
//! ```ignore
//! use senti_transform::{TransformOptions, transform_with_options};
//!
//! let output = transform_with_options(&raw_df, &TransformOptions::default())?;
//! println!("{} rows kept", output.report.output_rows);
//! ```

mod dedupe;
mod error;
mod features;
mod frame;
mod keywords;
mod options;
mod pipeline;

pub mod normalization;

// Core entry points
pub use pipeline::{TransformOutput, TransformReport, transform, transform_with_options};

// Options
pub use options::{
    FINANCIAL_KEYWORDS, NEGATIVE_KEYWORDS, POSITIVE_KEYWORDS, TransformOptions,
};

// Error type
pub use error::{Result, TransformError};

// Building blocks, exposed for reuse and testing
pub use features::TitleFeatures;
pub use keywords::KeywordCounter;
