//! Features derived from a row's sanitized title slots.

/// Per-row title features.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleFeatures {
    /// Number of present titles.
    pub valid_titles: u32,
    /// Present titles in slot order, joined by a single space.
    pub all_titles: String,
    /// Mean character length of present titles; `None` when there are none.
    pub avg_title_length: Option<f64>,
}

impl TitleFeatures {
    /// Computes features from titles given in slot order (Top1 first).
    pub fn from_titles<'a, I>(titles: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut valid_titles = 0u32;
        let mut total_length = 0usize;
        let mut all_titles = String::new();
        for title in titles.into_iter().flatten() {
            if valid_titles > 0 {
                all_titles.push(' ');
            }
            all_titles.push_str(title);
            total_length += title.chars().count();
            valid_titles += 1;
        }
        let avg_title_length =
            (valid_titles > 0).then(|| total_length as f64 / f64::from(valid_titles));
        Self {
            valid_titles,
            all_titles,
            avg_title_length,
        }
    }
}
