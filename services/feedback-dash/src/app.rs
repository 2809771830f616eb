// services/feedback-dash/src/app.rs
//
// Root component: owns the feedback collection and wires the panels to the
// request dispatcher.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use feedback_svckit::types::{FeedbackFilter, FeedbackRecord};
use feedback_svckit::ApiError;
use tracing::{debug, error, info};

use crate::api::{ApiEvent, Dispatcher};
use crate::clipboard::Clipboard;
use crate::state::{
    ActivityLog, FeedbackForm, LogLevel, StatsChart, SubmitStatus, TranslateBox,
};

/// Input that receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    FeedbackText,
    Product,
    TranslateText,
    TargetLanguage,
}

impl Focus {
    const ORDER: [Focus; 4] = [
        Focus::FeedbackText,
        Focus::Product,
        Focus::TranslateText,
        Focus::TargetLanguage,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataMode {
    Demo,
    Live { base_url: String },
}

pub struct App {
    feedback: Vec<FeedbackRecord>,
    filter: FeedbackFilter,
    pub form: FeedbackForm,
    pub stats: StatsChart,
    pub translate: TranslateBox,
    pub log: ActivityLog,
    pub focus: Focus,
    pub list_scroll: usize,
    list_generation: u64,
    mode: DataMode,
    connected: Option<bool>,
    dispatcher: Dispatcher,
    clipboard: Box<dyn Clipboard>,
    should_quit: bool,
}

impl App {
    pub fn new(
        dispatcher: Dispatcher,
        filter: FeedbackFilter,
        mode: DataMode,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        Self {
            feedback: Vec::new(),
            filter,
            form: FeedbackForm::new(),
            stats: StatsChart::new(),
            translate: TranslateBox::new(),
            log: ActivityLog::default(),
            focus: Focus::FeedbackText,
            list_scroll: 0,
            list_generation: 0,
            mode,
            connected: None,
            dispatcher,
            clipboard,
            should_quit: false,
        }
    }

    pub fn feedback(&self) -> &[FeedbackRecord] {
        &self.feedback
    }

    pub fn filter(&self) -> &FeedbackFilter {
        &self.filter
    }

    pub fn mode(&self) -> &DataMode {
        &self.mode
    }

    /// `None` until the first response of any kind arrives.
    pub fn connected(&self) -> Option<bool> {
        self.connected
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Initial loads: the collection and the stats panel.
    pub fn mount(&mut self) {
        match &self.mode {
            DataMode::Demo => self.log.add_log(LogLevel::Info, "Dashboard started in DEMO mode"),
            DataMode::Live { base_url } => {
                let message = format!("Dashboard started - connecting to {}", base_url);
                self.log.add_log(LogLevel::Info, &message);
            }
        }
        self.refresh_feedback();
        self.refresh_stats();
    }

    /// Re-reads the whole collection. Only the response to the most recent
    /// fetch is applied; earlier ones are dropped when they arrive.
    pub fn refresh_feedback(&mut self) {
        self.list_generation += 1;
        self.dispatcher
            .fetch_feedback(self.list_generation, self.filter.clone());
    }

    /// Manual stats refresh; a no-op while one is already running.
    pub fn refresh_stats(&mut self) -> bool {
        if !self.stats.begin_fetch() {
            return false;
        }
        self.dispatcher.fetch_stats();
        true
    }

    pub fn submit_feedback(&mut self) -> bool {
        let Some(feedback) = self.form.begin_submit() else {
            return false;
        };
        info!("Submitting feedback for product '{}'", feedback.product);
        self.dispatcher.create_feedback(feedback);
        true
    }

    pub fn submit_translation(&mut self) -> bool {
        let Some(request) = self.translate.begin_translate() else {
            return false;
        };
        info!("Translating {} chars to '{}'", request.text.len(), request.target_language);
        self.dispatcher.translate(request);
        true
    }

    pub fn copy_translation(&mut self) {
        if self.translate.copy_translation(self.clipboard.as_mut()) {
            self.log.add_log(LogLevel::Info, "Translation copied to clipboard");
        }
    }

    pub fn handle_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::FeedbackLoaded(generation, result) => {
                if generation != self.list_generation {
                    debug!(
                        "Discarding stale feedback list (generation {}, latest {})",
                        generation, self.list_generation
                    );
                    return;
                }
                self.note_connection(&result);
                match result {
                    Ok(records) => {
                        self.feedback = records;
                        self.clamp_scroll();
                    }
                    Err(e) => {
                        error!("Error fetching feedback: {}", e);
                        self.log.add_log(LogLevel::Error, "Failed to fetch feedback");
                    }
                }
            }
            ApiEvent::FeedbackCreated(result) => {
                self.note_connection(&result);
                let dispatcher = &self.dispatcher;
                let filter = &self.filter;
                let generation = &mut self.list_generation;
                let status = self.form.finish_submit(result.map(|_| ()), || {
                    *generation += 1;
                    dispatcher.fetch_feedback(*generation, filter.clone());
                });

                match status {
                    SubmitStatus::Submitted => {
                        self.focus = Focus::FeedbackText;
                        self.log.add_log(LogLevel::Info, "Feedback submitted");
                    }
                    SubmitStatus::Failed => {
                        self.log.add_log(LogLevel::Error, "Feedback submission failed");
                    }
                }
            }
            ApiEvent::StatsLoaded(result) => {
                self.note_connection(&result);
                if result.is_err() {
                    self.log.add_log(LogLevel::Warn, "Failed to load stats");
                }
                self.stats.finish_fetch(result);
            }
            ApiEvent::Translated(result) => {
                self.note_connection(&result);
                if result.is_err() {
                    self.log.add_log(LogLevel::Warn, "Translation failed");
                }
                self.translate.finish_translate(result);
            }
        }
    }

    fn note_connection<T>(&mut self, result: &Result<T, ApiError>) {
        let reachable = !matches!(result, Err(ApiError::Network(_)));
        if self.connected == Some(true) && !reachable {
            self.log.add_log(LogLevel::Warn, "Lost connection to feedback API");
        }
        self.connected = Some(reachable);
    }

    fn clamp_scroll(&mut self) {
        self.list_scroll = self.list_scroll.min(self.feedback.len().saturating_sub(1));
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focus {
            Focus::FeedbackText => &mut self.form.text,
            Focus::Product => &mut self.form.product,
            Focus::TranslateText => &mut self.translate.text,
            Focus::TargetLanguage => &mut self.translate.target_language,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('y') if ctrl => self.copy_translation(),
            KeyCode::F(5) => {
                if self.refresh_stats() {
                    self.log.add_log(LogLevel::Info, "Refreshing stats");
                }
            }
            KeyCode::F(6) => self.refresh_feedback(),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Up => self.list_scroll = self.list_scroll.saturating_sub(1),
            KeyCode::Down => {
                self.list_scroll += 1;
                self.clamp_scroll();
            }
            KeyCode::Enter => match self.focus {
                Focus::FeedbackText | Focus::Product => {
                    self.submit_feedback();
                }
                Focus::TranslateText | Focus::TargetLanguage => {
                    self.submit_translation();
                }
            },
            KeyCode::Backspace => {
                self.focused_input().pop();
            }
            KeyCode::Char(c) if !ctrl => self.focused_input().push(c),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Backends;
    use crate::mock::MockBackend;
    use async_trait::async_trait;
    use feedback_svckit::types::{FeedbackId, NewFeedback, SentimentStats};
    use feedback_svckit::{FeedbackSource, StatsSource};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::runtime::Handle;
    use tokio::sync::mpsc::UnboundedReceiver;

    use crate::state::{StatsView, TranslateOutcome, TRANSLATE_FAILED_MESSAGE};

    #[derive(Clone, Default)]
    struct RecordingClipboard(Arc<Mutex<Vec<String>>>);

    impl Clipboard for RecordingClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), String> {
            self.0.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingStats {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl StatsSource for CountingStats {
        async fn fetch(&self) -> Result<SentimentStats, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(SentimentStats {
                total: 10,
                positive: 5,
                neutral: 3,
                negative: 2,
                percent_positive: 50.0,
                percent_neutral: 30.0,
                percent_negative: 20.0,
            })
        }
    }

    struct DownStats;

    #[async_trait]
    impl StatsSource for DownStats {
        async fn fetch(&self) -> Result<SentimentStats, ApiError> {
            Err(ApiError::Network("connection refused".to_string()))
        }
    }

    /// First listing is slow and empty; later ones are immediate and hold
    /// one record.
    #[derive(Default)]
    struct SlowFirstList {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FeedbackSource for SlowFirstList {
        async fn list(&self, _filter: &FeedbackFilter) -> Result<Vec<FeedbackRecord>, ApiError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(200)).await;
                return Ok(Vec::new());
            }
            Ok(vec![FeedbackRecord {
                id: FeedbackId::Int(1),
                product: "Router".to_string(),
                text_original: "Très rapide".to_string(),
                language: "fr".to_string(),
                text_translated: "Very fast".to_string(),
                sentiment: "positive".to_string(),
                created_at: None,
            }])
        }

        async fn create(&self, feedback: &NewFeedback) -> Result<FeedbackRecord, ApiError> {
            Ok(FeedbackRecord {
                id: FeedbackId::Int(1),
                product: feedback.product.clone(),
                text_original: feedback.text.clone(),
                language: "fr".to_string(),
                text_translated: "Very fast".to_string(),
                sentiment: "positive".to_string(),
                created_at: None,
            })
        }
    }

    fn demo_app(backends: Backends) -> (App, UnboundedReceiver<ApiEvent>) {
        let (dispatcher, rx) = Dispatcher::new(backends, Handle::current());
        let app = App::new(
            dispatcher,
            FeedbackFilter::default(),
            DataMode::Demo,
            Box::new(RecordingClipboard::default()),
        );
        (app, rx)
    }

    async fn pump(app: &mut App, rx: &mut UnboundedReceiver<ApiEvent>, events: usize) {
        for _ in 0..events {
            let event = rx.recv().await.expect("dispatcher closed");
            app.handle_event(event);
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
    }

    #[tokio::test]
    async fn test_mount_loads_collection_and_stats() {
        let (mut app, mut rx) = demo_app(Backends::demo(MockBackend::instant()));
        app.mount();
        assert_eq!(app.stats.view(), &StatsView::Loading);

        pump(&mut app, &mut rx, 2).await;

        assert!(app.feedback().is_empty());
        assert!(matches!(app.stats.view(), StatsView::Loaded(s) if s.total == 0));
        assert_eq!(app.connected(), Some(true));
    }

    #[tokio::test]
    async fn test_submit_then_refresh_shows_new_record() {
        let (mut app, mut rx) = demo_app(Backends::demo(MockBackend::instant()));
        app.mount();
        pump(&mut app, &mut rx, 2).await;

        type_text(&mut app, "Service excellent");
        app.handle_key(KeyEvent::from(KeyCode::Tab));
        type_text(&mut app, "Router");
        assert_eq!(app.focus, Focus::Product);

        assert!(app.submit_feedback());
        assert!(!app.submit_feedback());

        // Creation, then the refresh it triggers.
        pump(&mut app, &mut rx, 2).await;

        assert_eq!(app.feedback().len(), 1);
        let record = &app.feedback()[0];
        assert_eq!(record.text_original, "Service excellent");
        assert_eq!(record.product, "Router");
        assert!(!record.language.is_empty());
        assert!(app.form.text.is_empty());
        assert_eq!(app.form.status(), Some(SubmitStatus::Submitted));
        assert_eq!(app.focus, Focus::FeedbackText);
    }

    #[tokio::test]
    async fn test_late_list_response_does_not_overwrite_newer_one() {
        let mut backends = Backends::demo(MockBackend::instant());
        backends.feedback = Arc::new(SlowFirstList::default());
        let (mut app, mut rx) = demo_app(backends);

        app.refresh_feedback();
        app.form.text = "Très rapide".to_string();
        app.form.product = "Router".to_string();
        assert!(app.submit_feedback());

        // Creation, the post-submit listing, then the slow first listing.
        pump(&mut app, &mut rx, 3).await;

        assert_eq!(app.form.status(), Some(SubmitStatus::Submitted));
        assert_eq!(app.feedback().len(), 1);
        assert_eq!(app.feedback()[0].text_original, "Très rapide");
    }

    #[tokio::test]
    async fn test_stale_list_event_is_ignored() {
        let (mut app, _rx) = demo_app(Backends::demo(MockBackend::instant()));
        app.refresh_feedback();
        app.refresh_feedback();

        app.handle_event(ApiEvent::FeedbackLoaded(1, Err(ApiError::Network("late".into()))));
        assert_eq!(app.connected(), None);
        assert!(app.log.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_while_refreshing_dispatches_once() {
        let counting = Arc::new(CountingStats::default());
        let mut backends = Backends::demo(MockBackend::instant());
        backends.stats = counting.clone();
        let (mut app, mut rx) = demo_app(backends);

        assert!(app.refresh_stats());
        assert!(!app.refresh_stats());
        app.handle_key(KeyEvent::from(KeyCode::F(5)));

        pump(&mut app, &mut rx, 1).await;
        assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
        assert!(rx.try_recv().is_err());
        assert!(matches!(app.stats.view(), StatsView::Loaded(s) if s.total == 10));

        assert!(app.refresh_stats());
        pump(&mut app, &mut rx, 1).await;
        assert_eq!(counting.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_stats_failure_on_mount_is_error_view() {
        let mut backends = Backends::demo(MockBackend::instant());
        backends.stats = Arc::new(DownStats);
        let (mut app, mut rx) = demo_app(backends);

        app.mount();
        pump(&mut app, &mut rx, 2).await;

        assert!(matches!(app.stats.view(), StatsView::Failed(_)));
        assert!(!app.stats.is_refreshing());
    }

    #[tokio::test]
    async fn test_feedback_failure_keeps_previous_collection() {
        let (mut app, mut rx) = demo_app(Backends::demo(MockBackend::instant()));
        app.form.text = "Great".to_string();
        app.form.product = "Lamp".to_string();
        app.submit_feedback();
        pump(&mut app, &mut rx, 2).await;
        assert_eq!(app.feedback().len(), 1);

        app.handle_event(ApiEvent::FeedbackLoaded(1, Err(ApiError::Status {
            status: 502,
            body: String::new(),
        })));
        assert_eq!(app.feedback().len(), 1);
    }

    #[tokio::test]
    async fn test_translate_and_copy() {
        let clipboard = RecordingClipboard::default();
        let (dispatcher, mut rx) =
            Dispatcher::new(Backends::demo(MockBackend::instant()), Handle::current());
        let mut app = App::new(
            dispatcher,
            FeedbackFilter::default(),
            DataMode::Demo,
            Box::new(clipboard.clone()),
        );

        app.focus = Focus::TranslateText;
        type_text(&mut app, "Bonjour");
        app.handle_key(KeyEvent::from(KeyCode::Enter));
        assert!(app.translate.is_translating());
        pump(&mut app, &mut rx, 1).await;

        match app.translate.outcome() {
            TranslateOutcome::Translated(t) => assert_eq!(t.detected_language, "fr"),
            other => panic!("unexpected outcome {:?}", other),
        }

        app.handle_key(KeyEvent::new(KeyCode::Char('y'), KeyModifiers::CONTROL));
        assert_eq!(clipboard.0.lock().unwrap().as_slice(), ["[en] Bonjour"]);

        app.handle_event(ApiEvent::Translated(Err(ApiError::Aborted)));
        assert_eq!(
            app.translate.outcome(),
            &TranslateOutcome::Failed(TRANSLATE_FAILED_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_keys_edit_focused_field_and_quit() {
        let (mut app, _rx) = demo_app(Backends::demo(MockBackend::instant()));
        type_text(&mut app, "abc");
        app.handle_key(KeyEvent::from(KeyCode::Backspace));
        assert_eq!(app.form.text, "ab");

        app.handle_key(KeyEvent::from(KeyCode::BackTab));
        assert_eq!(app.focus, Focus::TargetLanguage);
        app.handle_key(KeyEvent::from(KeyCode::Backspace));
        app.handle_key(KeyEvent::from(KeyCode::Backspace));
        type_text(&mut app, "fr");
        assert_eq!(app.translate.target_language, "fr");

        assert!(!app.should_quit());
        app.handle_key(KeyEvent::from(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_lost_connection_is_logged() {
        let (mut app, _rx) = demo_app(Backends::demo(MockBackend::instant()));
        app.handle_event(ApiEvent::FeedbackLoaded(0, Ok(Vec::new())));
        app.handle_event(ApiEvent::StatsLoaded(Err(ApiError::Network("reset".into()))));

        assert_eq!(app.connected(), Some(false));
        assert!(app
            .log
            .entries()
            .iter()
            .any(|e| e.message == "Lost connection to feedback API"));
    }
}
