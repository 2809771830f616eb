//! Shared pieces of the feedback analyzer front-end: the wire model, the
//! error taxonomy, configuration loading, and the HTTP clients.

pub mod client;
pub mod config;
pub mod errors;
pub mod types;

pub use client::{
    FeedbackClient, FeedbackSource, HttpClient, StatsClient, StatsSource, TranslateClient,
    TranslateService,
};
pub use errors::{ApiError, ConfigError};
