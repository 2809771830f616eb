// services/feedback-dash/src/mock.rs
//
// In-memory analyzer backend for demo mode

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use feedback_svckit::types::{
    FeedbackFilter, FeedbackId, FeedbackRecord, NewFeedback, Sentiment, SentimentStats,
    TranslateRequest, TranslationResult,
};
use feedback_svckit::{ApiError, FeedbackSource, StatsSource, TranslateService};
use rand::Rng;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "love", "amazing", "bien", "excelente", "génial", "gut", "buono",
];
const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "broken", "hate", "awful", "malo", "mauvais", "nul", "schlecht", "cattivo",
];

const LANGUAGE_HINTS: &[(&str, &[&str])] = &[
    ("fr", &["bonjour", "merci", "très", "mauvais", "génial", "produit"]),
    ("es", &["hola", "gracias", "muy", "malo", "excelente", "producto"]),
    ("de", &["danke", "sehr", "gut", "schlecht", "produkt"]),
    ("it", &["grazie", "molto", "buono", "cattivo", "prodotto"]),
];

/// Stands in for the analyzer service. Language and sentiment are keyword
/// guesses; translation only tags the text with the target language.
pub struct MockBackend {
    records: Mutex<Vec<FeedbackRecord>>,
    next_id: AtomicI64,
    latency_ms: (u64, u64),
}

impl MockBackend {
    /// Seeded collection with 150-600 ms simulated latency.
    pub fn new() -> Self {
        let backend = Self::with_latency(150, 600);
        backend.seed();
        backend
    }

    /// Empty collection, no latency.
    pub fn instant() -> Self {
        Self::with_latency(0, 0)
    }

    fn with_latency(min_ms: u64, max_ms: u64) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            latency_ms: (min_ms, max_ms.max(min_ms)),
        }
    }

    fn seed(&self) {
        let samples = [
            ("Le produit est génial, merci !", "Smart Speaker"),
            ("Battery life is terrible after the update", "Smart Watch"),
            ("El envío llegó a tiempo", "Smart Speaker"),
        ];
        for (text, product) in samples {
            self.insert(text, product);
        }
    }

    fn insert(&self, text: &str, product: &str) -> FeedbackRecord {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let language = guess_language(text);
        let record = FeedbackRecord {
            id: FeedbackId::Int(id),
            product: product.to_string(),
            text_original: text.to_string(),
            text_translated: tag_translation(text, "en", &language),
            language,
            sentiment: guess_sentiment(text).to_string(),
            created_at: Some(Utc::now()),
        };

        // Newest first, like the analyzer's created_at DESC ordering.
        self.lock().insert(0, record.clone());
        record
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<FeedbackRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn simulate_latency(&self) {
        let (min, max) = self.latency_ms;
        if max == 0 {
            return;
        }
        let delay = rand::thread_rng().gen_range(min..=max);
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedbackSource for MockBackend {
    async fn list(&self, filter: &FeedbackFilter) -> Result<Vec<FeedbackRecord>, ApiError> {
        self.simulate_latency().await;
        Ok(self
            .lock()
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn create(&self, feedback: &NewFeedback) -> Result<FeedbackRecord, ApiError> {
        self.simulate_latency().await;
        if feedback.text.trim().is_empty() {
            return Err(ApiError::Status {
                status: 422,
                body: "text is required".to_string(),
            });
        }
        Ok(self.insert(&feedback.text, &feedback.product))
    }
}

#[async_trait]
impl StatsSource for MockBackend {
    async fn fetch(&self) -> Result<SentimentStats, ApiError> {
        self.simulate_latency().await;
        let records = self.lock();
        let count = |s: Sentiment| {
            records
                .iter()
                .filter(|r| r.sentiment_class() == Some(s))
                .count() as u64
        };
        Ok(SentimentStats::from_counts(
            count(Sentiment::Positive),
            count(Sentiment::Neutral),
            count(Sentiment::Negative),
        ))
    }
}

#[async_trait]
impl TranslateService for MockBackend {
    async fn translate(&self, request: &TranslateRequest) -> Result<TranslationResult, ApiError> {
        self.simulate_latency().await;
        if request.text.is_empty() {
            return Err(ApiError::Status {
                status: 400,
                body: "Text is required".to_string(),
            });
        }
        let detected = guess_language(&request.text);

        Ok(TranslationResult {
            translated_text: tag_translation(&request.text, &request.target_language, &detected),
            detected_language: detected,
            target_language: Some(request.target_language.clone()),
        })
    }
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
}

fn guess_language(text: &str) -> String {
    if text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c)) {
        return "ar".to_string();
    }
    for word in words(text) {
        for (code, hints) in LANGUAGE_HINTS {
            if hints.contains(&word.as_str()) {
                return code.to_string();
            }
        }
    }
    "en".to_string()
}

fn guess_sentiment(text: &str) -> Sentiment {
    let mut score = 0i32;
    for word in words(text) {
        if POSITIVE_WORDS.contains(&word.as_str()) {
            score += 1;
        } else if NEGATIVE_WORDS.contains(&word.as_str()) {
            score -= 1;
        }
    }
    match score {
        s if s > 0 => Sentiment::Positive,
        s if s < 0 => Sentiment::Negative,
        _ => Sentiment::Neutral,
    }
}

fn tag_translation(text: &str, target: &str, detected: &str) -> String {
    if detected == target {
        text.to_string()
    } else {
        format!("[{}] {}", target, text)
    }
}
