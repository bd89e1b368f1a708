//! HTTP route definitions.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::http::{locate, monitoring, tutorial};
use crate::state::AppState;

/// Create the main router.
///
/// ```text
/// POST /find_website     - Rank search results for a how-to query
/// POST /extract_content  - Extract tutorial steps from a page
/// POST /process_image    - Locate step elements in a screenshot
/// GET  /health           - Health check
/// GET  /livez            - Liveness probe
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/find_website", post(tutorial::find_website))
        .route("/extract_content", post(tutorial::extract_content))
        .route("/process_image", post(locate::process_image))
        .route("/health", get(monitoring::health_check))
        .route("/livez", get(monitoring::liveness_probe))
        .with_state(state)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
