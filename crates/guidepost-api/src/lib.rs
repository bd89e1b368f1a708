//! # Guidepost API
//!
//! HTTP surface of the Guidepost service.
//!
//! ```text
//! POST /find_website     {action, software}        -> {url}
//! POST /extract_content  {url}                     -> {tutorial_title, steps}
//! POST /process_image    multipart screenshot+step -> step with location
//! GET  /health                                     -> service status
//! GET  /livez                                      -> liveness probe
//! ```
//!
//! Errors are returned as `{"detail": "..."}` with an HTTP status code.

pub mod error;
pub mod http;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use http::routes::create_router;
pub use server::{InterfaceConfig, InterfaceServer};
pub use state::AppState;
