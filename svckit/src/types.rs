use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend-assigned key. The analyzer hands out integers; anything
/// else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedbackId {
    Int(i64),
    Text(String),
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackId::Int(id) => write!(f, "{}", id),
            FeedbackId::Text(id) => f.write_str(id),
        }
    }
}

/// One stored piece of feedback. Immutable on the client side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: FeedbackId,
    pub product: String,
    #[serde(alias = "original")]
    pub text_original: String,
    pub language: String,
    #[serde(alias = "translated")]
    pub text_translated: String,
    pub sentiment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl FeedbackRecord {
    pub fn sentiment_class(&self) -> Option<Sentiment> {
        Sentiment::parse(&self.sentiment)
    }
}

/// Body of `POST /api/feedback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFeedback {
    pub text: String,
    pub product: String,
}

/// Optional narrowing of `GET /api/feedback`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
}

impl FeedbackFilter {
    pub fn is_empty(&self) -> bool {
        self.language.is_none() && self.product.is_none()
    }

    pub fn matches(&self, record: &FeedbackRecord) -> bool {
        self.language.as_deref().map_or(true, |l| record.language == l)
            && self.product.as_deref().map_or(true, |p| record.product == p)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Case-insensitive; `None` for anything outside the closed set.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-computed snapshot from `GET /api/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentStats {
    pub total: u64,
    #[serde(default)]
    pub positive: u64,
    #[serde(default)]
    pub neutral: u64,
    #[serde(default)]
    pub negative: u64,
    pub percent_positive: f64,
    pub percent_neutral: f64,
    pub percent_negative: f64,
}

impl SentimentStats {
    /// Builds a snapshot the way the analyzer backend does: percentages
    /// rounded to two decimals, all zero when there is nothing to count.
    pub fn from_counts(positive: u64, neutral: u64, negative: u64) -> Self {
        let total = positive + neutral + negative;
        let percent = |n: u64| {
            if total == 0 {
                0.0
            } else {
                (n as f64 / total as f64 * 10_000.0).round() / 100.0
            }
        };

        Self {
            total,
            positive,
            neutral,
            negative,
            percent_positive: percent(positive),
            percent_neutral: percent(neutral),
            percent_negative: percent(negative),
        }
    }

    pub fn percent(&self, sentiment: Sentiment) -> f64 {
        match sentiment {
            Sentiment::Positive => self.percent_positive,
            Sentiment::Neutral => self.percent_neutral,
            Sentiment::Negative => self.percent_negative,
        }
    }
}

/// Body of `POST /api/translate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub target_language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translated_text: String,
    #[serde(default)]
    pub detected_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accepts_list_and_create_shapes() {
        let listed: FeedbackRecord = serde_json::from_str(
            r#"{"id": 7, "text_original": "Très bien", "text_translated": "Very good",
                "sentiment": "positive", "language": "fr", "product": "Router",
                "created_at": "2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(listed.id, FeedbackId::Int(7));
        assert!(listed.created_at.is_some());

        let created: FeedbackRecord = serde_json::from_str(
            r#"{"id": "a1", "original": "Malo", "translated": "Bad",
                "sentiment": "NEGATIVE", "language": "es", "product": "Phone"}"#,
        )
        .unwrap();
        assert_eq!(created.id.to_string(), "a1");
        assert_eq!(created.text_original, "Malo");
        assert_eq!(created.sentiment_class(), Some(Sentiment::Negative));
    }

    #[test]
    fn test_sentiment_parse_is_closed_and_case_insensitive() {
        assert_eq!(Sentiment::parse("Neutral"), Some(Sentiment::Neutral));
        assert_eq!(Sentiment::parse(" POSITIVE "), Some(Sentiment::Positive));
        assert_eq!(Sentiment::parse("mixed"), None);
        assert_eq!(Sentiment::parse(""), None);
    }

    #[test]
    fn test_stats_from_counts() {
        let stats = SentimentStats::from_counts(1, 1, 1);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.percent_positive, 33.33);

        let empty = SentimentStats::from_counts(0, 0, 0);
        assert_eq!(empty.percent_negative, 0.0);
    }

    #[test]
    fn test_stats_counts_are_optional() {
        let stats: SentimentStats = serde_json::from_str(
            r#"{"percent_positive": 50.0, "percent_neutral": 30.0, "percent_negative": 20.0, "total": 10}"#,
        )
        .unwrap();
        assert_eq!(stats.total, 10);
        assert_eq!(stats.positive, 0);
        assert_eq!(stats.percent(Sentiment::Neutral), 30.0);
    }

    #[test]
    fn test_translation_without_detected_language() {
        let result: TranslationResult = serde_json::from_str(
            r#"{"original": "Hola", "translated_text": "Hello", "target_language": "en"}"#,
        )
        .unwrap();
        assert_eq!(result.translated_text, "Hello");
        assert_eq!(result.detected_language, "");
        assert_eq!(result.target_language.as_deref(), Some("en"));
    }

    #[test]
    fn test_filter_matches() {
        let record = FeedbackRecord {
            id: FeedbackId::Int(1),
            product: "Router".to_string(),
            text_original: "ok".to_string(),
            language: "en".to_string(),
            text_translated: "ok".to_string(),
            sentiment: "neutral".to_string(),
            created_at: None,
        };
        assert!(FeedbackFilter::default().matches(&record));
        let filter = FeedbackFilter {
            language: Some("fr".to_string()),
            product: None,
        };
        assert!(!filter.matches(&record));
    }
}
