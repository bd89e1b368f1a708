//! Azure Document Intelligence (Form Recognizer) OCR provider for Guidepost.
//!
//! Submits a screenshot to a layout model, polls the long-running operation and
//! converts the page geometry into an [`OcrDocument`](guidepost_protocols::OcrDocument).

mod api;
mod provider;

pub use provider::{AzureOcrConfig, AzureOcrProvider};
