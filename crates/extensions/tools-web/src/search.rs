//! SerpAPI Google search.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use guidepost_protocols::{ProviderError, SearchHit, SearchProvider};

pub const DEFAULT_SEARCH_URL: &str = "https://serpapi.com/search";

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    link: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

/// Search backed by SerpAPI's Google engine.
pub struct SerpApiSearch {
    api_key: String,
    base_url: String,
    client: Client,
}

impl SerpApiSearch {
    pub fn new(api_key: String) -> Self {
        Self::with_url(api_key, DEFAULT_SEARCH_URL.to_string())
    }

    pub fn with_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl SearchProvider for SerpApiSearch {
    fn id(&self) -> &str {
        "serpapi"
    }

    async fn search(&self, query: &str, limit: u32) -> Result<Vec<SearchHit>, ProviderError> {
        let limit_param = limit.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("api_key", self.api_key.as_str()),
                ("num", limit_param.as_str()),
                ("engine", "google"),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<SerpResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or(body);
            return Err(ProviderError::from_status(status.as_u16(), message));
        }

        let parsed: SerpResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        // "No results" arrives as a 200 with an error field.
        if let Some(error) = &parsed.error {
            debug!(query, %error, "Search reported an error");
        }

        let hits: Vec<SearchHit> = parsed
            .organic_results
            .into_iter()
            .filter_map(|r| {
                Some(SearchHit {
                    link: r.link?,
                    title: r.title,
                    snippet: r.snippet,
                })
            })
            .take(limit as usize)
            .collect();

        debug!(query, hits = hits.len(), "Search completed");
        Ok(hits)
    }
}
