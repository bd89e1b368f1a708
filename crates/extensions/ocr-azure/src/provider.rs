//! Azure OCR provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use tracing::{debug, info};

use guidepost_protocols::{OcrDocument, OcrProvider, ProviderError};

use crate::api::{AnalyzeOperation, ErrorEnvelope, OperationStatus};

const KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OPERATION_HEADER: &str = "Operation-Location";

/// Connection settings for a Document Intelligence resource.
#[derive(Debug, Clone)]
pub struct AzureOcrConfig {
    /// Resource endpoint, e.g. `https://<name>.cognitiveservices.azure.com`.
    pub endpoint: String,
    pub api_key: String,
    pub model_id: String,
    pub api_version: String,
    pub poll_interval: Duration,
    pub max_polls: u32,
}

impl AzureOcrConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model_id: "prebuilt-layout".to_string(),
            api_version: "2023-07-31".to_string(),
            poll_interval: Duration::from_secs(1),
            max_polls: 60,
        }
    }

    pub fn analyze_url(&self) -> String {
        format!(
            "{}/formrecognizer/documentModels/{}:analyze?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.model_id,
            self.api_version
        )
    }
}

/// OCR provider backed by the Form Recognizer analyze API.
pub struct AzureOcrProvider {
    config: AzureOcrConfig,
    client: Client,
}

impl AzureOcrProvider {
    pub fn new(config: AzureOcrConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    async fn submit(&self, image: &[u8]) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(self.config.analyze_url())
            .header(KEY_HEADER, &self.config.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), error_message(body)));
        }

        operation_location(response.headers())
    }

    async fn poll(&self, operation_url: &str) -> Result<OcrDocument, ProviderError> {
        for attempt in 1..=self.config.max_polls {
            tokio::time::sleep(self.config.poll_interval).await;

            let response = self
                .client
                .get(operation_url)
                .header(KEY_HEADER, &self.config.api_key)
                .send()
                .await
                .map_err(|e| ProviderError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ProviderError::from_status(status.as_u16(), error_message(body)));
            }

            let operation: AnalyzeOperation = response
                .json()
                .await
                .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

            match operation.status {
                OperationStatus::Succeeded => {
                    let result = operation.analyze_result.ok_or_else(|| {
                        ProviderError::MalformedResponse("succeeded without analyzeResult".to_string())
                    })?;
                    return Ok(result.into());
                }
                OperationStatus::Failed => {
                    let message = operation
                        .error
                        .map(|e| format!("{}: {}", e.code, e.message))
                        .unwrap_or_else(|| "analysis failed".to_string());
                    return Err(ProviderError::AnalysisFailed(message));
                }
                OperationStatus::Unknown => {
                    return Err(ProviderError::MalformedResponse(
                        "unexpected operation status".to_string(),
                    ));
                }
                OperationStatus::NotStarted | OperationStatus::Running => {
                    debug!(attempt, "OCR analysis still running");
                }
            }
        }

        let waited = self.config.poll_interval * self.config.max_polls;
        Err(ProviderError::Timeout(waited.as_secs()))
    }
}

#[async_trait]
impl OcrProvider for AzureOcrProvider {
    fn id(&self) -> &str {
        "azure"
    }

    async fn analyze(&self, image: &[u8]) -> Result<OcrDocument, ProviderError> {
        if image.is_empty() {
            return Err(ProviderError::InvalidRequest("empty image".to_string()));
        }

        let operation_url = self.submit(image).await?;
        let document = self.poll(&operation_url).await?;

        info!(
            pages = document.pages.len(),
            lines = document.line_count(),
            words = document.word_count(),
            "OCR analysis completed"
        );
        Ok(document)
    }
}

fn operation_location(headers: &HeaderMap) -> Result<String, ProviderError> {
    headers
        .get(OPERATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| ProviderError::MalformedResponse("missing Operation-Location header".to_string()))
}

fn error_message(body: String) -> String {
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => format!("{}: {}", envelope.error.code, envelope.error.message),
        Err(_) => body,
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
