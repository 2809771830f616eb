// services/feedback-dash/src/state.rs
//
// Per-component state machines: feedback form, stats chart, translate box,
// and the activity log.

use chrono::{DateTime, Local};
use feedback_svckit::types::{NewFeedback, SentimentStats, TranslateRequest, TranslationResult};
use feedback_svckit::ApiError;
use tracing::{debug, error, warn};

use crate::clipboard::Clipboard;

pub const SUBMIT_OK_MESSAGE: &str = "Feedback submitted successfully!";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit feedback. Try again.";
pub const STATS_FAILED_MESSAGE: &str = "Failed to load stats";
pub const TRANSLATE_FAILED_MESSAGE: &str = "Failed to translate. Please check your input.";

const MAX_LOG_ENTRIES: usize = 100;

/// In-flight guard. At most one request of a component's kind at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Flight {
    #[default]
    Idle,
    Busy,
}

impl Flight {
    pub fn is_busy(self) -> bool {
        self == Flight::Busy
    }

    /// Idle -> Busy. Returns false, leaving the flag alone, when already busy.
    pub fn try_acquire(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        *self = Flight::Busy;
        true
    }

    pub fn release(&mut self) {
        *self = Flight::Idle;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Submitted,
    Failed,
}

impl SubmitStatus {
    pub fn message(self) -> &'static str {
        match self {
            SubmitStatus::Submitted => SUBMIT_OK_MESSAGE,
            SubmitStatus::Failed => SUBMIT_FAILED_MESSAGE,
        }
    }
}

#[derive(Debug, Default)]
pub struct FeedbackForm {
    pub text: String,
    pub product: String,
    flight: Flight,
    status: Option<SubmitStatus>,
}

impl FeedbackForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.flight.is_busy()
    }

    pub fn status(&self) -> Option<SubmitStatus> {
        self.status
    }

    /// Submit trigger state: both fields filled and nothing pending.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && !self.text.trim().is_empty() && !self.product.trim().is_empty()
    }

    /// Takes the guard and hands back the request body, or `None` when the
    /// trigger is disabled.
    pub fn begin_submit(&mut self) -> Option<NewFeedback> {
        if !self.can_submit() || !self.flight.try_acquire() {
            return None;
        }
        self.status = None;

        Some(NewFeedback {
            text: self.text.clone(),
            product: self.product.clone(),
        })
    }

    /// Completes a submission. `on_submitted` runs only on success, after the
    /// inputs are cleared. Input is preserved on failure.
    pub fn finish_submit<F>(
        &mut self,
        result: Result<(), ApiError>,
        on_submitted: F,
    ) -> SubmitStatus
    where
        F: FnOnce(),
    {
        self.flight.release();

        let status = match result {
            Ok(()) => {
                self.text.clear();
                self.product.clear();
                on_submitted();
                SubmitStatus::Submitted
            }
            Err(e) => {
                warn!("Error submitting feedback: {}", e);
                SubmitStatus::Failed
            }
        };
        self.status = Some(status);
        status
    }
}

/// What the stats panel shows. An error never carries stale stats.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsView {
    Loading,
    Failed(String),
    Loaded(SentimentStats),
}

#[derive(Debug)]
pub struct StatsChart {
    view: StatsView,
    flight: Flight,
}

impl Default for StatsChart {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsChart {
    pub fn new() -> Self {
        Self {
            view: StatsView::Loading,
            flight: Flight::Idle,
        }
    }

    pub fn view(&self) -> &StatsView {
        &self.view
    }

    pub fn is_refreshing(&self) -> bool {
        self.flight.is_busy()
    }

    /// Enters the fetch path. The current view stays up until the result
    /// lands; returns false when a fetch is already running.
    pub fn begin_fetch(&mut self) -> bool {
        self.flight.try_acquire()
    }

    pub fn finish_fetch(&mut self, result: Result<SentimentStats, ApiError>) {
        self.flight.release();

        self.view = match result {
            Ok(stats) => StatsView::Loaded(stats),
            Err(e) => {
                error!("Failed to load stats: {}", e);
                StatsView::Failed(STATS_FAILED_MESSAGE.to_string())
            }
        };
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum TranslateOutcome {
    #[default]
    Empty,
    Translated(TranslationResult),
    Failed(String),
}

#[derive(Debug)]
pub struct TranslateBox {
    pub text: String,
    pub target_language: String,
    flight: Flight,
    outcome: TranslateOutcome,
}

impl Default for TranslateBox {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslateBox {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            target_language: "en".to_string(),
            flight: Flight::Idle,
            outcome: TranslateOutcome::Empty,
        }
    }

    pub fn outcome(&self) -> &TranslateOutcome {
        &self.outcome
    }

    pub fn is_translating(&self) -> bool {
        self.flight.is_busy()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_translating()
            && !self.text.trim().is_empty()
            && !self.target_language.trim().is_empty()
    }

    pub fn begin_translate(&mut self) -> Option<TranslateRequest> {
        if !self.can_submit() || !self.flight.try_acquire() {
            return None;
        }
        if matches!(self.outcome, TranslateOutcome::Failed(_)) {
            self.outcome = TranslateOutcome::Empty;
        }

        Some(TranslateRequest {
            text: self.text.trim().to_string(),
            target_language: self.target_language.trim().to_string(),
        })
    }

    pub fn finish_translate(&mut self, result: Result<TranslationResult, ApiError>) {
        self.flight.release();

        self.outcome = match result {
            Ok(translation) => TranslateOutcome::Translated(translation),
            Err(e) => {
                error!("Translation failed: {}", e);
                TranslateOutcome::Failed(TRANSLATE_FAILED_MESSAGE.to_string())
            }
        };
    }

    pub fn translated_text(&self) -> Option<&str> {
        match &self.outcome {
            TranslateOutcome::Translated(t) => Some(&t.translated_text),
            _ => None,
        }
    }

    /// Best effort. Returns whether anything reached the clipboard.
    pub fn copy_translation(&self, clipboard: &mut dyn Clipboard) -> bool {
        let Some(text) = self.translated_text() else {
            return false;
        };
        match clipboard.set_text(text) {
            Ok(()) => true,
            Err(e) => {
                debug!("Clipboard write failed: {}", e);
                false
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    pub fn add_log(&mut self, level: LogLevel, message: &str) {
        self.entries.push(LogEntry {
            timestamp: Local::now(),
            level,
            message: message.to_string(),
        });

        // Keep last 100 entries
        if self.entries.len() > MAX_LOG_ENTRIES {
            self.entries.remove(0);
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
