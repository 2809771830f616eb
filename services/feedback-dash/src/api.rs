// services/feedback-dash/src/api.rs
//
// Request dispatch: runs client calls on the tokio runtime and reports
// completions back to the UI loop over a channel.

use std::future::Future;
use std::sync::Arc;

use feedback_svckit::config::ApiConfig;
use feedback_svckit::types::{
    FeedbackFilter, FeedbackRecord, NewFeedback, SentimentStats, TranslateRequest,
    TranslationResult,
};
use feedback_svckit::{
    ApiError, FeedbackClient, FeedbackSource, HttpClient, StatsClient, StatsSource,
    TranslateClient, TranslateService,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::mock::MockBackend;

/// Completion of one dispatched request.
#[derive(Debug)]
pub enum ApiEvent {
    /// Carries the generation it was dispatched with.
    FeedbackLoaded(u64, Result<Vec<FeedbackRecord>, ApiError>),
    FeedbackCreated(Result<FeedbackRecord, ApiError>),
    StatsLoaded(Result<SentimentStats, ApiError>),
    Translated(Result<TranslationResult, ApiError>),
}

/// The three client seams the App talks through.
#[derive(Clone)]
pub struct Backends {
    pub feedback: Arc<dyn FeedbackSource>,
    pub stats: Arc<dyn StatsSource>,
    pub translate: Arc<dyn TranslateService>,
}

impl Backends {
    pub fn http(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = HttpClient::new(config)?;

        Ok(Self {
            feedback: Arc::new(FeedbackClient::new(http.clone())),
            stats: Arc::new(StatsClient::new(http.clone())),
            translate: Arc::new(TranslateClient::new(http)),
        })
    }

    pub fn demo(backend: MockBackend) -> Self {
        let backend = Arc::new(backend);

        Self {
            feedback: backend.clone(),
            stats: backend.clone(),
            translate: backend,
        }
    }
}

/// Delivers exactly one event per request. If the task ends without
/// reporting (panic, runtime shutdown) the fallback goes out on drop, so a
/// component's in-flight flag is always released.
struct Reply {
    tx: UnboundedSender<ApiEvent>,
    fallback: Option<ApiEvent>,
}

impl Reply {
    fn new(tx: UnboundedSender<ApiEvent>, fallback: ApiEvent) -> Self {
        Self {
            tx,
            fallback: Some(fallback),
        }
    }

    fn send(mut self, event: ApiEvent) {
        self.fallback = None;
        // Receiver gone means the UI has exited; nothing left to update.
        if self.tx.send(event).is_err() {
            debug!("Dropping API event: UI loop has exited");
        }
    }
}

impl Drop for Reply {
    fn drop(&mut self) {
        if let Some(event) = self.fallback.take() {
            let _ = self.tx.send(event);
        }
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    backends: Backends,
    runtime: Handle,
    tx: UnboundedSender<ApiEvent>,
}

impl Dispatcher {
    pub fn new(backends: Backends, runtime: Handle) -> (Self, UnboundedReceiver<ApiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                backends,
                runtime,
                tx,
            },
            rx,
        )
    }

    pub fn fetch_feedback(&self, generation: u64, filter: FeedbackFilter) {
        let source = self.backends.feedback.clone();
        self.spawn(ApiEvent::FeedbackLoaded(generation, Err(ApiError::Aborted)), async move {
            ApiEvent::FeedbackLoaded(generation, source.list(&filter).await)
        });
    }

    pub fn create_feedback(&self, feedback: NewFeedback) {
        let source = self.backends.feedback.clone();
        self.spawn(ApiEvent::FeedbackCreated(Err(ApiError::Aborted)), async move {
            ApiEvent::FeedbackCreated(source.create(&feedback).await)
        });
    }

    pub fn fetch_stats(&self) {
        let source = self.backends.stats.clone();
        self.spawn(ApiEvent::StatsLoaded(Err(ApiError::Aborted)), async move {
            ApiEvent::StatsLoaded(source.fetch().await)
        });
    }

    pub fn translate(&self, request: TranslateRequest) {
        let service = self.backends.translate.clone();
        self.spawn(ApiEvent::Translated(Err(ApiError::Aborted)), async move {
            ApiEvent::Translated(service.translate(&request).await)
        });
    }

    fn spawn<F>(&self, fallback: ApiEvent, request: F)
    where
        F: Future<Output = ApiEvent> + Send + 'static,
    {
        let reply = Reply::new(self.tx.clone(), fallback);
        self.runtime.spawn(async move {
            let event = request.await;
            reply.send(event);
        });
    }
}
