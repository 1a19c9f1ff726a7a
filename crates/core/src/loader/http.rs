//! HTTP board source.
//!
//! Issues one GET against the configured URL and decodes the JSON body as a
//! [`BoardData`]. The request carries no parameters, headers or credentials.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{BoardSource, LoadError};
use crate::board::BoardData;
use crate::config::SourceConfig;

/// Board source backed by a remote JSON endpoint.
pub struct HttpBoardSource {
    client: Client,
    url: String,
}

impl HttpBoardSource {
    /// Create a new HTTP source.
    pub fn new(config: SourceConfig) -> Result<Self, LoadError> {
        if config.url.trim().is_empty() {
            return Err(LoadError::NotConfigured(
                "source.url must not be empty".to_string(),
            ));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(u64::from(secs)));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            url: config.url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl BoardSource for HttpBoardSource {
    async fn load(&self) -> Result<BoardData, LoadError> {
        debug!("Fetching board from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LoadError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let data: BoardData = response.json().await.map_err(|e| {
            LoadError::ParseError(format!("Failed to parse board response: {}", e))
        })?;

        debug!(
            "Fetched {} tickets and {} users",
            data.tickets.len(),
            data.users.len()
        );

        Ok(data)
    }

    fn name(&self) -> &str {
        "http"
    }
}
