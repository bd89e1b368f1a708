//! Web search and page fetching protocols used by the tutorial pipeline.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// One organic search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub link: String,
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

/// Trait for web search backends.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn id(&self) -> &str;

    /// Run a query and return at most `limit` organic results, in rank order.
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<SearchHit>, ProviderError>;
}

/// Trait for fetching a web page as readable text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, ProviderError>;
}
