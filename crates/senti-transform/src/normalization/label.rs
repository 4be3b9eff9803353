//! Sentiment label coercion.

use senti_common::parse_f64;

/// Coerces a raw label to 0 or 1.
///
/// Numeric text is accepted in any float spelling (`"1"`, `"1.0"`, `" 0 "`).
/// Non-numeric values, fractional values and anything other than 0 or 1
/// become `None`.
pub fn parse_label(value: &str) -> Option<i64> {
    let number = parse_f64(value)?;
    if number == 0.0 {
        Some(0)
    } else if number == 1.0 {
        Some(1)
    } else {
        None
    }
}

/// Maps a normalized label to its sentiment name using `[negative, positive]`.
pub fn sentiment_for<'a>(label: Option<i64>, names: &'a [String; 2]) -> Option<&'a str> {
    match label? {
        0 => Some(names[0].as_str()),
        1 => Some(names[1].as_str()),
        _ => None,
    }
}
