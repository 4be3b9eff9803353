//! Exploratory charts for the cleaned headline table.
//!
//! Charts are composed as SVG documents and rasterised to PNG with `resvg`.
//! Each chart is drawn only when the columns it needs are present:
//!
//! | file                          | content                                         |
//! |-------------------------------|-------------------------------------------------|
//! | `01_sentiment_by_year.png`    | stacked record counts per year                  |
//! | `02_sentiment_by_weekday.png` | stacked record counts Monday to Sunday          |
//! | `03_sentiment_over_time.png`  | moving average of the label and monthly means   |
//! | `05_title_analysis.png`       | title length and count distributions            |

mod charts;
mod data;
mod error;
mod svg;

pub use charts::{ChartKind, ChartOptions, render_charts};
pub use data::read_chart_data;
pub use error::{ReportError, Result};
