//! Cell conversions shared by the sink and the chart renderer.
//!
//! Both read values back out of typed frames (or frames re-read from CSV,
//! where integers may arrive as strings) and need one lenient conversion.

use std::str::FromStr;

use polars::prelude::AnyValue;

/// Text form of a cell. `Null` becomes the empty string; floats drop
/// trailing zeros and dates render as `YYYY-MM-DD`.
///
/// ```
/// use polars::prelude::AnyValue;
/// use senti_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Float64(31.0)), "31");
/// assert_eq!(any_to_string(AnyValue::String("Positivo")), "Positivo");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        other => other.to_string(),
    }
}

/// Shortest decimal form of `v`: `10.50` prints as `10.5`, `3.0` as `3`.
pub fn format_numeric(v: f64) -> String {
    let text = v.to_string();
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Numeric value of a cell; strings are parsed.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Float64(v) => Some(v),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        other => any_to_i64(other).map(|v| v as f64),
    }
}

/// Integer value of a cell. Floats only convert when they hold a whole number.
pub fn any_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Int8(v) => Some(v.into()),
        AnyValue::Int16(v) => Some(v.into()),
        AnyValue::Int32(v) => Some(v.into()),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt8(v) => Some(v.into()),
        AnyValue::UInt16(v) => Some(v.into()),
        AnyValue::UInt32(v) => Some(v.into()),
        AnyValue::UInt64(v) => i64::try_from(v).ok(),
        AnyValue::Boolean(b) => Some(i64::from(b)),
        AnyValue::Float32(v) => whole_number(f64::from(v)),
        AnyValue::Float64(v) => whole_number(v),
        AnyValue::String(s) => parse_trimmed(s),
        AnyValue::StringOwned(s) => parse_trimmed(&s),
        _ => None,
    }
}

/// Parses a trimmed, non-empty string as `f64`.
pub fn parse_f64(value: &str) -> Option<f64> {
    parse_trimmed(value)
}

fn parse_trimmed<T: FromStr>(value: &str) -> Option<T> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

fn whole_number(v: f64) -> Option<i64> {
    (v.is_finite() && v.fract() == 0.0).then_some(v as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_numeric_strips_trailing_zeros() {
        assert_eq!(format_numeric(10.0), "10");
        assert_eq!(format_numeric(10.50), "10.5");
        assert_eq!(format_numeric(100.0), "100");
    }

    #[test]
    fn integers_parse_from_csv_text() {
        assert_eq!(any_to_i64(AnyValue::String(" 7 ")), Some(7));
        assert_eq!(any_to_i64(AnyValue::String("x")), None);
        assert_eq!(any_to_i64(AnyValue::String("")), None);
        assert_eq!(any_to_i64(AnyValue::Null), None);
    }

    #[test]
    fn fractional_floats_are_not_integers() {
        assert_eq!(any_to_i64(AnyValue::Float64(2016.0)), Some(2016));
        assert_eq!(any_to_i64(AnyValue::Float64(31.5)), None);
    }

    #[test]
    fn any_to_f64_widens_integers() {
        assert_eq!(any_to_f64(AnyValue::UInt32(3)), Some(3.0));
        assert_eq!(any_to_f64(AnyValue::String("2.5")), Some(2.5));
        assert_eq!(any_to_f64(AnyValue::Null), None);
    }

    #[test]
    fn strings_pass_through_unchanged() {
        assert_eq!(any_to_string(AnyValue::Int32(-4)), "-4");
        assert_eq!(any_to_string(AnyValue::String(" Friday ")), " Friday ");
    }
}
