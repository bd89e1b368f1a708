//! Screenshot element-location handler.

use std::sync::Arc;

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::Json;
use serde_json::Value;
use tracing::{debug, info};

use guidepost_protocols::{OcrDocument, Step, Viewport};

use crate::error::ApiError;
use crate::state::AppState;

/// The `step_data` field as sent: one step or a list of steps.
#[derive(Debug)]
pub enum StepBatch {
    Single(Step),
    Many(Vec<Step>),
}

impl StepBatch {
    /// Parse and validate the raw `step_data` text.
    ///
    /// Every step must be a JSON object with a `web_element` key.
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| ApiError::BadRequest(format!("JSON parsing error: {}", e)))?;

        match value {
            Value::Array(items) => {
                let steps = items
                    .into_iter()
                    .map(parse_step)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(StepBatch::Many(steps))
            }
            other => parse_step(other).map(StepBatch::Single),
        }
    }

    pub fn steps_mut(&mut self) -> &mut [Step] {
        match self {
            StepBatch::Single(step) => std::slice::from_mut(step),
            StepBatch::Many(steps) => steps,
        }
    }

    pub fn into_json(self) -> Result<Value, ApiError> {
        let value = match self {
            StepBatch::Single(step) => serde_json::to_value(step),
            StepBatch::Many(steps) => serde_json::to_value(steps),
        };
        value.map_err(|e| ApiError::Internal(e.to_string()))
    }
}

fn parse_step(value: Value) -> Result<Step, ApiError> {
    let has_element_key = value
        .as_object()
        .is_some_and(|obj| obj.contains_key("web_element"));
    if !has_element_key {
        return Err(ApiError::BadRequest("Invalid step data".to_string()));
    }
    serde_json::from_value(value).map_err(|e| ApiError::BadRequest(format!("Invalid step data: {}", e)))
}

/// Fields collected from the multipart form.
#[derive(Debug, Default)]
struct ProcessImageForm {
    image: Option<Vec<u8>>,
    step_data: Option<String>,
    viewport_width: Option<String>,
    viewport_height: Option<String>,
}

impl ProcessImageForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        let bad = |e: axum::extract::multipart::MultipartError| ApiError::BadRequest(e.body_text());

        while let Some(field) = multipart.next_field().await.map_err(bad)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match name.as_str() {
                "image" => form.image = Some(field.bytes().await.map_err(bad)?.to_vec()),
                "step_data" => form.step_data = Some(field.text().await.map_err(bad)?),
                "viewport_width" => form.viewport_width = Some(field.text().await.map_err(bad)?),
                "viewport_height" => form.viewport_height = Some(field.text().await.map_err(bad)?),
                other => debug!(field = other, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }
}

fn required<T>(value: Option<T>, name: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::BadRequest(format!("Missing form field: {}", name)))
}

fn parse_dimension(raw: Option<String>, name: &str) -> Result<u32, ApiError> {
    let raw = required(raw, name)?;
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(ApiError::BadRequest(format!("{} must be greater than 0", name))),
        Ok(value) => Ok(value),
        Err(_) => Err(ApiError::BadRequest(format!("{} must be an integer, got {:?}", name, raw))),
    }
}

/// Locate the web element of each step in a screenshot.
///
/// POST /process_image
pub async fn process_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, ApiError> {
    state.increment_requests();
    let multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let form = ProcessImageForm::read(multipart).await?;

    let image = required(form.image, "image")?;
    let step_data = required(form.step_data, "step_data")?;
    let viewport = Viewport::new(
        parse_dimension(form.viewport_width, "viewport_width")?,
        parse_dimension(form.viewport_height, "viewport_height")?,
    );

    let mut batch = StepBatch::parse(&step_data)?;
    let steps = batch.steps_mut();
    info!(
        steps = steps.len(),
        image_bytes = image.len(),
        viewport_width = viewport.width,
        viewport_height = viewport.height,
        "Process image request"
    );

    let document = if steps.iter().any(Step::has_element) {
        let ocr = state
            .ocr
            .as_ref()
            .ok_or_else(|| ApiError::Unavailable("OCR provider is not configured".to_string()))?;
        ocr.analyze(&image).await?
    } else {
        OcrDocument::default()
    };

    let report = state
        .resolver
        .resolve_steps(steps, &image, &document, viewport)
        .await?;
    info!(
        matched = report.matched(),
        vision_calls = report.vision_calls,
        "Steps resolved"
    );

    Ok(Json(batch.into_json()?))
}

#[cfg(test)]
#[path = "locate_tests.rs"]
mod tests;
