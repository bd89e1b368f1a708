//! Error types for the Guidepost protocol layer.

mod provider;

pub use provider::*;
