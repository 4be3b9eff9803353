//! DataFrame plumbing for the transform.

use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, PlSmallStr, Series};

use senti_common::schema::{RAW_DATE, RAW_LABEL, raw_title_slot};

use crate::error::Result;

/// Reads a column as optional strings, casting non-string dtypes.
pub(crate) fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df.column(name)?.cast(&DataType::String)?;
    let values = column.str()?;
    Ok(values
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Builds a `Date` column from days since the Unix epoch.
pub(crate) fn date_column(name: &str, days: Vec<i32>) -> Result<Column> {
    let series = Series::new(name.into(), days).cast(&DataType::Date)?;
    Ok(series.into_column())
}


/// Input columns carried through unchanged after the cleaned columns.
///
/// Excludes the raw `Date`, `Label` and `TopN` columns, and any column whose
/// name would collide with a cleaned column.
pub(crate) fn passthrough_columns(df: &DataFrame, cleaned: &[String]) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(PlSmallStr::as_str)
        .filter(|name| *name != RAW_DATE && *name != RAW_LABEL)
        .filter(|name| raw_title_slot(name).is_none())
        .filter(|name| !cleaned.iter().any(|c| c == name))
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use senti_common::cleaned_columns;

    fn frame(names: &[&str]) -> DataFrame {
        let columns = names
            .iter()
            .map(|name| Series::new((*name).into(), &["x"]).into_column())
            .collect();
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn passthrough_keeps_extra_columns_in_order() {
        let df = frame(&["Source", "Date", "Top1", "Label", "Region", "Top26"]);
        let extras = passthrough_columns(&df, &cleaned_columns());
        assert_eq!(extras, vec!["Source", "Region", "Top26"]);
    }

    #[test]
    fn passthrough_skips_cleaned_names() {
        let df = frame(&["Date", "Label", "year", "notes"]);
        let extras = passthrough_columns(&df, &cleaned_columns());
        assert_eq!(extras, vec!["notes"]);
    }

    #[test]
    fn string_values_casts_numbers() {
        let df = DataFrame::new(vec![
            Series::new("Label".into(), &[Some(1i64), None]).into_column(),
        ])
        .unwrap();
        let values = string_values(&df, "Label").unwrap();
        assert_eq!(values, vec![Some("1".to_string()), None]);
    }
}
