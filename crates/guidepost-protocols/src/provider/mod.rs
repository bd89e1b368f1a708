//! Provider protocol definitions.
//!
//! Providers connect Guidepost to hosted services: OCR engines that turn a
//! screenshot into an [`OcrDocument`](crate::types::OcrDocument) and language
//! models that answer text or vision prompts.

mod request;
mod response;
mod traits;

pub use request::*;
pub use response::*;
pub use traits::*;
