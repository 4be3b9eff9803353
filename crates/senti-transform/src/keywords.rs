//! Keyword occurrence counting.

use regex::Regex;

/// Counts occurrences of any keyword from a list within lower-cased text.
///
/// The keywords are joined into a single alternation, so matches are found
/// leftmost-first and never overlap. Matches are not word-bounded:
/// `"loss"` is counted inside `"lossless"`.
#[derive(Debug, Clone)]
pub struct KeywordCounter {
    pattern: Option<Regex>,
}

impl KeywordCounter {
    /// Builds a counter for the given keywords. An empty list counts nothing.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self, regex::Error> {
        let alternatives: Vec<String> = keywords
            .iter()
            .map(|keyword| regex::escape(keyword.as_ref()))
            .filter(|escaped| !escaped.is_empty())
            .collect();
        if alternatives.is_empty() {
            return Ok(Self { pattern: None });
        }
        let pattern = Regex::new(&alternatives.join("|"))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Number of non-overlapping matches in `text`.
    pub fn count(&self, text: &str) -> u32 {
        self.pattern.as_ref().map_or(0, |pattern| {
            u32::try_from(pattern.find_iter(text).count()).unwrap_or(u32::MAX)
        })
    }
}
