//! Completion response types.

use serde::{Deserialize, Serialize};

/// Token usage for a completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Response from a completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Model that produced the answer.
    pub model: String,

    /// Assistant text, trimmed. Empty when the model returned no content.
    pub content: String,

    #[serde(default)]
    pub usage: Usage,
}

impl CompletionResponse {
    pub fn new(model: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            content: content.into(),
            usage: Usage::default(),
        }
    }
}
