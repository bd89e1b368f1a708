//! OpenAI-compatible chat and vision provider for Guidepost.

mod api;
mod converter;
mod provider;

pub use provider::{OpenAIProvider, DEFAULT_API_URL};
