//! Web collaborators for Guidepost's tutorial pipeline.
//!
//! Provides a SerpAPI-backed [`SearchProvider`](guidepost_protocols::SearchProvider)
//! and an HTTP [`PageFetcher`](guidepost_protocols::PageFetcher) that reduces
//! HTML to readable text.

mod fetch;
mod html;
mod search;

pub use fetch::HttpPageFetcher;
pub use html::html_to_text;
pub use search::{SerpApiSearch, DEFAULT_SEARCH_URL};
