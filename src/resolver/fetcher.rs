//! Page fetching for generic article sources.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use super::error::FetchError;
use crate::config::FetchSettings;

/// Something that can download a page body
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the body of `url` as text. Non-2xx responses are errors.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher with a fixed timeout and browser user agent
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!(url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
