//! Location resolution errors.
//!
//! A step whose element cannot be found is not an error; these variants cover
//! bad input data and provider failures that abort the whole request.

use thiserror::Error;

use guidepost_protocols::ProviderError;

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("OCR document has no pages")]
    EmptyDocument,

    #[error("Degenerate OCR page geometry: width={width}, height={height}")]
    DegenerateGeometry { width: f64, height: f64 },

    #[error("Invalid viewport: {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("Vision fallback failed: {0}")]
    Vision(#[from] ProviderError),
}
