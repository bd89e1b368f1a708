//! # Guidepost Tutorial
//!
//! Finds a tutorial page for a user action and turns it into structured steps.
//!
//! - [`TutorialService::find_website`] - search, then let a chat model pick the link
//! - [`TutorialService::extract_content`] - fetch the page, then let a chat model
//!   extract the title and steps

mod error;
mod parse;
mod prompts;
mod service;

pub use error::TutorialError;
pub use parse::parse_model_json;
pub use service::{TutorialService, TutorialSettings};
