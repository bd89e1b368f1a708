//! HTTP interface module.
//!
//! - Tutorial discovery and extraction
//! - Screenshot element location
//! - Health check

pub mod locate;
pub mod routes;
pub mod tutorial;

pub(crate) mod monitoring;
