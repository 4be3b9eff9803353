//! Options controlling the transform.

/// Financial vocabulary counted in `financial_keywords`.
pub const FINANCIAL_KEYWORDS: [&str; 12] = [
    "stock",
    "market",
    "trading",
    "price",
    "earnings",
    "revenue",
    "profit",
    "loss",
    "investor",
    "investment",
    "bank",
    "economy",
];

/// Positive vocabulary counted in `positive_keywords`.
pub const POSITIVE_KEYWORDS: [&str; 13] = [
    "rise", "gain", "up", "increase", "growth", "profit", "success", "boost", "surge", "rally",
    "positive", "strong", "better",
];

/// Negative vocabulary counted in `negative_keywords`.
pub const NEGATIVE_KEYWORDS: [&str; 13] = [
    "fall", "drop", "down", "decrease", "loss", "decline", "crisis", "crash", "plunge",
    "negative", "weak", "worse", "trouble",
];

/// Keyword lists and label names used by the transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    pub financial_keywords: Vec<String>,
    pub positive_keywords: Vec<String>,
    pub negative_keywords: Vec<String>,
    /// Sentiment names for labels `[0, 1]`.
    pub sentiment_names: [String; 2],
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            financial_keywords: to_owned_list(&FINANCIAL_KEYWORDS),
            positive_keywords: to_owned_list(&POSITIVE_KEYWORDS),
            negative_keywords: to_owned_list(&NEGATIVE_KEYWORDS),
            sentiment_names: ["Negativo".to_string(), "Positivo".to_string()],
        }
    }
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sentiment_names(mut self, negative: &str, positive: &str) -> Self {
        self.sentiment_names = [negative.to_string(), positive.to_string()];
        self
    }
}

fn to_owned_list(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}
