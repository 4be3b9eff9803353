use std::collections::BTreeSet;

/// Marks the first occurrence of every raw `(Date, Label)` pair.
///
/// Keys compare on the raw text; a missing value equals another missing value.
pub(crate) fn first_occurrence_mask(
    dates: &[Option<String>],
    labels: &[Option<String>],
) -> Vec<bool> {
    let mut seen = BTreeSet::new();
    dates
        .iter()
        .zip(labels)
        .map(|(date, label)| seen.insert((date.as_deref(), label.as_deref())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[Option<&str>]) -> Vec<Option<String>> {
        items.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn keeps_first_of_each_pair() {
        let dates = values(&[Some("2015-01-01"), Some("2015-01-01"), Some("2015-01-02")]);
        let labels = values(&[Some("0"), Some("0"), Some("0")]);
        assert_eq!(first_occurrence_mask(&dates, &labels), vec![true, false, true]);
    }

    #[test]
    fn same_date_with_other_label_is_distinct() {
        let dates = values(&[Some("2015-01-01"), Some("2015-01-01")]);
        let labels = values(&[Some("0"), Some("1")]);
        assert_eq!(first_occurrence_mask(&dates, &labels), vec![true, true]);
    }

    #[test]
    fn compares_raw_text() {
        let dates = values(&[Some("2015-01-01"), Some("01/01/2015")]);
        let labels = values(&[Some("1"), Some("1.0")]);
        assert_eq!(first_occurrence_mask(&dates, &labels), vec![true, true]);
    }

    #[test]
    fn missing_equals_missing() {
        let dates = values(&[None, None, Some("2015-01-01")]);
        let labels = values(&[Some("1"), Some("1"), None]);
        assert_eq!(first_occurrence_mask(&dates, &labels), vec![true, false, true]);
    }
}
