//! HTTP page fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use guidepost_protocols::{PageFetcher, ProviderError};

use crate::html::html_to_text;

/// Fetches a page over HTTP and returns its readable text.
pub struct HttpPageFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpPageFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, ProviderError> {
        let parsed = url::Url::parse(url)
            .map_err(|e| ProviderError::InvalidRequest(format!("Invalid URL: {}", e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ProviderError::InvalidRequest(format!(
                "Unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        let response = self.client.get(parsed).send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(self.timeout.as_secs())
            } else {
                ProviderError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: format!("Fetching {} failed", url),
            });
        }

        let text = html_to_text(&body);
        debug!(url, html_bytes = body.len(), text_bytes = text.len(), "Fetched page");
        Ok(text)
    }
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
