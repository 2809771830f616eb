use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::errors::ApiError;
use crate::types::{
    FeedbackFilter, FeedbackRecord, NewFeedback, SentimentStats, TranslateRequest,
    TranslationResult,
};

pub const FEEDBACK_PATH: &str = "/api/feedback";
pub const STATS_PATH: &str = "/api/stats";
pub const TRANSLATE_PATH: &str = "/api/translate";

/// Read and append access to the feedback collection.
#[async_trait]
pub trait FeedbackSource: Send + Sync {
    async fn list(&self, filter: &FeedbackFilter) -> Result<Vec<FeedbackRecord>, ApiError>;
    async fn create(&self, feedback: &NewFeedback) -> Result<FeedbackRecord, ApiError>;
}

#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch(&self) -> Result<SentimentStats, ApiError>;
}

#[async_trait]
pub trait TranslateService: Send + Sync {
    async fn translate(&self, request: &TranslateRequest) -> Result<TranslationResult, ApiError>;
}

/// Shared transport: one reqwest client and one base URL for every endpoint.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }

    async fn get_json_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("GET {} with query", url);
        let response = self.client.get(&url).query(query).send().await?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        warn!("Request failed with HTTP {}", status);
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

#[derive(Debug, Clone)]
pub struct FeedbackClient {
    http: HttpClient,
}

impl FeedbackClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl FeedbackSource for FeedbackClient {
    async fn list(&self, filter: &FeedbackFilter) -> Result<Vec<FeedbackRecord>, ApiError> {
        if filter.is_empty() {
            self.http.get_json(FEEDBACK_PATH).await
        } else {
            self.http.get_json_with_query(FEEDBACK_PATH, filter).await
        }
    }

    async fn create(&self, feedback: &NewFeedback) -> Result<FeedbackRecord, ApiError> {
        self.http.post_json(FEEDBACK_PATH, feedback).await
    }
}

#[derive(Debug, Clone)]
pub struct StatsClient {
    http: HttpClient,
}

impl StatsClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl StatsSource for StatsClient {
    async fn fetch(&self) -> Result<SentimentStats, ApiError> {
        self.http.get_json(STATS_PATH).await
    }
}

#[derive(Debug, Clone)]
pub struct TranslateClient {
    http: HttpClient,
}

impl TranslateClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl TranslateService for TranslateClient {
    async fn translate(&self, request: &TranslateRequest) -> Result<TranslationResult, ApiError> {
        self.http.post_json(TRANSLATE_PATH, request).await
    }
}
