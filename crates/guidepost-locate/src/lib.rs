//! # Guidepost Locate
//!
//! Resolves the on-screen region of a named web element from a screenshot's
//! OCR geometry.
//!
//! ## Components
//!
//! - [`is_close_match`] - OCR-tolerant string comparison
//! - [`find_location`] - per-page line-then-word search over an OCR document
//! - [`ScaleFactors`] / [`rescale`] - image-pixel to viewport-pixel mapping
//! - [`VisionFallback`] - asks a vision model for a better label on a miss
//! - [`StepResolver`] - runs the stages above for a batch of steps
//!
//! ## Resolution order
//!
//! ```text
//! step ──► direct lookup ──hit──► rescale ──► location
//!               │
//!              miss
//!               ▼
//!         vision fallback ──"No match found"──► empty
//!               │
//!           candidate
//!               ▼
//!         second lookup ──hit──► rescale ──► location
//!               │
//!              miss ──► empty
//! ```

pub mod error;
pub mod fallback;
pub mod geometry;
pub mod matcher;
pub mod rescale;
pub mod resolver;

pub use error::LocateError;
pub use fallback::{VisionAnswer, VisionFallback, NO_MATCH_SENTINEL};
pub use geometry::{find_location, MatchLevel, SpanMatch};
pub use matcher::is_close_match;
pub use rescale::{rescale, ScaleFactors};
pub use resolver::{ResolutionReport, StepOutcome, StepResolver, UnresolvedReason};
