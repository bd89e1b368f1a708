//! Common value types used across Guidepost.

mod geometry;
mod ocr;
mod step;

pub use geometry::*;
pub use ocr::*;
pub use step::*;
