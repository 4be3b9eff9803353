//! Column names of the raw and cleaned headline datasets.

/// Number of headline slots per record.
pub const TITLE_SLOTS: usize = 25;

/// Raw input column holding the free-text date.
pub const RAW_DATE: &str = "Date";
/// Raw input column holding the numeric-ish label.
pub const RAW_LABEL: &str = "Label";

pub const DATE: &str = "date";
pub const YEAR: &str = "year";
pub const MONTH: &str = "month";
pub const DAY: &str = "day";
pub const DAY_OF_WEEK: &str = "day_of_week";
pub const LABEL: &str = "label";
pub const SENTIMENT: &str = "sentiment";
pub const VALID_TITLES: &str = "valid_titles";
pub const AVG_TITLE_LENGTH: &str = "avg_title_length";
pub const FINANCIAL_KEYWORDS: &str = "financial_keywords";
pub const POSITIVE_KEYWORDS: &str = "positive_keywords";
pub const NEGATIVE_KEYWORDS: &str = "negative_keywords";
pub const ALL_TITLES: &str = "all_titles";

/// Derived columns that precede the title slots, in output order.
pub const LEADING_COLUMNS: [&str; 12] = [
    DATE,
    YEAR,
    MONTH,
    DAY,
    DAY_OF_WEEK,
    LABEL,
    SENTIMENT,
    VALID_TITLES,
    AVG_TITLE_LENGTH,
    FINANCIAL_KEYWORDS,
    POSITIVE_KEYWORDS,
    NEGATIVE_KEYWORDS,
];

/// Cleaned column name for a 1-based title slot (`top1`..`top25`).
pub fn title_column(slot: usize) -> String {
    format!("top{slot}")
}

/// Raw column name for a 1-based title slot (`Top1`..`Top25`).
pub fn raw_title_column(slot: usize) -> String {
    format!("Top{slot}")
}

/// Returns the 1-based slot of a raw title column, if the name is one.
pub fn raw_title_slot(name: &str) -> Option<usize> {
    let digits = name.strip_prefix("Top")?;
    if digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let slot: usize = digits.parse().ok()?;
    (1..=TITLE_SLOTS).contains(&slot).then_some(slot)
}

/// Full cleaned column order: leading derived columns, title slots, `all_titles`.
pub fn cleaned_columns() -> Vec<String> {
    let mut columns: Vec<String> = LEADING_COLUMNS.iter().map(|c| (*c).to_string()).collect();
    columns.extend((1..=TITLE_SLOTS).map(title_column));
    columns.push(ALL_TITLES.to_string());
    columns
}
