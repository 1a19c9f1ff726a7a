//! Board sources: where tickets and users come from.
//!
//! A source performs a single fetch of the whole payload. There is no retry;
//! a failed fetch is reported to the caller, which decides what to show.

mod http;

pub use http::HttpBoardSource;

use async_trait::async_trait;
use thiserror::Error;

use crate::board::BoardData;

/// Errors that can occur while loading the board payload.
#[derive(Debug, Error)]
pub enum LoadError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Source answered with a non-success status.
    #[error("Source returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Body was not a valid board payload.
    #[error("Failed to parse board payload: {0}")]
    ParseError(String),

    /// Source could not be constructed from its configuration.
    #[error("Source not configured: {0}")]
    NotConfigured(String),
}

/// Trait for board sources.
#[async_trait]
pub trait BoardSource: Send + Sync {
    /// Fetch the complete set of tickets and users.
    async fn load(&self) -> Result<BoardData, LoadError>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}
