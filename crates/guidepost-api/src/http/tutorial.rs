//! Tutorial discovery and extraction handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use guidepost_protocols::Tutorial;
use guidepost_tutorial::TutorialService;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FindWebsiteRequest {
    pub action: String,
    pub software: String,
}

#[derive(Debug, Serialize)]
pub struct FindWebsiteResponse {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtractContentRequest {
    pub url: String,
}

fn tutorial_service(state: &AppState) -> Result<&TutorialService, ApiError> {
    state
        .tutorial
        .as_ref()
        .ok_or_else(|| ApiError::Unavailable("Tutorial service is not configured".to_string()))
}

/// Find the most relevant tutorial page.
///
/// POST /find_website
pub async fn find_website(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FindWebsiteRequest>, JsonRejection>,
) -> Result<Json<FindWebsiteResponse>, ApiError> {
    state.increment_requests();
    let Json(req) = payload.map_err(|e| ApiError::Unprocessable(e.body_text()))?;
    info!(action = %req.action, software = %req.software, "Find website request");

    let service = tutorial_service(&state)?;
    match service.find_website(&req.action, &req.software).await? {
        Some(url) => Ok(Json(FindWebsiteResponse { url })),
        None => Err(ApiError::NotFound("No relevant link found".to_string())),
    }
}

/// Extract tutorial steps from a page.
///
/// POST /extract_content
pub async fn extract_content(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExtractContentRequest>, JsonRejection>,
) -> Result<Json<Tutorial>, ApiError> {
    state.increment_requests();
    let Json(req) = payload.map_err(|e| ApiError::Unprocessable(e.body_text()))?;
    info!(url = %req.url, "Extract content request");

    let service = tutorial_service(&state)?;
    let tutorial = service.extract_content(&req.url).await?;
    Ok(Json(tutorial))
}
