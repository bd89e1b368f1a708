//! Tutorial pipeline errors.

use thiserror::Error;

use guidepost_protocols::ProviderError;

#[derive(Debug, Error)]
pub enum TutorialError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("No content extracted from {0}")]
    EmptyPage(String),

    #[error("Page is not a tutorial matching the query")]
    NotATutorial,

    #[error("Invalid model answer: {0}")]
    InvalidAnswer(String),
}
