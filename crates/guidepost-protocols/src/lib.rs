//! # Guidepost Protocols
//!
//! Shared value types and provider traits for the Guidepost service.
//! Contains only plain data and interface definitions - no provider clients.
//!
//! ## Core Traits
//!
//! - [`OcrProvider`] - Turns an image into an [`OcrDocument`]
//! - [`LLMProvider`] - Chat completion, text and vision
//! - [`SearchProvider`] - Web search
//! - [`PageFetcher`] - Fetches a page as plain text

pub mod error;
pub mod provider;
pub mod search;
pub mod types;

pub use error::ProviderError;
pub use provider::{
    CompletionRequest, CompletionResponse, LLMProvider, OcrProvider, ProviderCapabilities,
};
pub use search::{PageFetcher, SearchHit, SearchProvider};
pub use types::*;
