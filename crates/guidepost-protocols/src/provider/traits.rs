//! Provider trait definitions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{CompletionRequest, CompletionResponse};
use crate::error::ProviderError;
use crate::types::OcrDocument;

/// What a language-model provider can do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCapabilities {
    pub vision: bool,
    pub json_mode: bool,
}

/// Core trait for language-model providers.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Returns the provider ID.
    fn id(&self) -> &str;

    /// Returns the provider capabilities.
    fn capabilities(&self) -> &ProviderCapabilities;

    /// Generate a completion (non-streaming).
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError>;
}

/// Trait for OCR engines.
///
/// One call per image; the result is the complete document, never partial.
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Returns the provider ID.
    fn id(&self) -> &str;

    /// Analyse raw image bytes.
    async fn analyze(&self, image: &[u8]) -> Result<OcrDocument, ProviderError>;
}
