//! Per-value normalization functions.
//!
//! Each function degrades to `None` instead of failing, so a bad value never
//! aborts the transform.

pub mod datetime;
pub mod label;
pub mod title;

pub use datetime::{parse_date, weekday_name};
pub use label::{parse_label, sentiment_for};
pub use title::sanitize_title;
