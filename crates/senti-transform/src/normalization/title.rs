//! Headline text sanitization.

use std::sync::LazyLock;

use regex::Regex;

/// Characters outside alphanumerics, underscore, whitespace and basic punctuation.
static DISALLOWED_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[^A-Za-z0-9_\s.,;:!?'"()\-]"#).expect("Invalid title character regex")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Tokens that mark an absent title after trimming.
const ABSENT_TOKENS: [&str; 3] = ["", "nan", "NaN"];

/// Sanitizes one headline.
///
/// Trims, treats `""`, `"nan"` and `"NaN"` as absent, replaces each
/// disallowed character with a space, collapses whitespace runs to a single
/// space and trims again. Replacement runs before collapsing so the spaces it
/// introduces are collapsed too.
///
/// # Examples
///
/// ```
/// use senti_transform::normalization::sanitize_title;
///
/// assert_eq!(
///     sanitize_title("Market   crashes!! (again)").as_deref(),
///     Some("Market crashes!! (again)")
/// );
/// assert_eq!(sanitize_title("  nan "), None);
/// ```
pub fn sanitize_title(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if ABSENT_TOKENS.contains(&trimmed) {
        return None;
    }
    let replaced = DISALLOWED_CHARS.replace_all(trimmed, " ");
    let collapsed = WHITESPACE_RUN.replace_all(&replaced, " ");
    Some(collapsed.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(
            sanitize_title("Market   crashes!! (again)").as_deref(),
            Some("Market crashes!! (again)")
        );
        assert_eq!(sanitize_title("a\t\tb\nc").as_deref(), Some("a b c"));
    }

    #[test]
    fn keeps_basic_punctuation() {
        let title = r#"Oil: up 3%? "No" - says 'OPEC'; (maybe), yes!"#;
        assert_eq!(
            sanitize_title(title).as_deref(),
            Some(r#"Oil: up 3 ? "No" - says 'OPEC'; (maybe), yes!"#)
        );
    }

    #[test]
    fn replaced_characters_are_collapsed() {
        assert_eq!(sanitize_title("US $ 100 # deal").as_deref(), Some("US 100 deal"));
        assert_eq!(sanitize_title("a$$$b").as_deref(), Some("a b"));
        assert_eq!(sanitize_title("€ price").as_deref(), Some("price"));
    }

    #[test]
    fn absent_tokens() {
        assert_eq!(sanitize_title(""), None);
        assert_eq!(sanitize_title("   "), None);
        assert_eq!(sanitize_title("nan"), None);
        assert_eq!(sanitize_title("NaN"), None);
        assert_eq!(sanitize_title("NAN").as_deref(), Some("NAN"));
    }

    #[test]
    fn fully_stripped_title_is_present_but_empty() {
        assert_eq!(sanitize_title("###").as_deref(), Some(""));
    }

    #[test]
    fn non_ascii_letters_are_replaced() {
        assert_eq!(sanitize_title("Café prices").as_deref(), Some("Caf prices"));
    }
}
