//! Health check handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// Health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Service is healthy.
    Healthy,
    /// Service runs with some collaborator missing.
    Degraded,
    /// Service is unhealthy.
    Unhealthy,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    /// Requests handled since startup.
    pub requests: u64,
    pub components: Vec<ComponentHealth>,
}

/// Component health status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentHealth {
    fn configured(name: &str, configured: bool, missing: &str) -> Self {
        if configured {
            Self {
                name: name.to_string(),
                status: HealthStatus::Healthy,
                message: None,
            }
        } else {
            Self {
                name: name.to_string(),
                status: HealthStatus::Degraded,
                message: Some(missing.to_string()),
            }
        }
    }
}

fn overall_status(components: &[ComponentHealth]) -> HealthStatus {
    if components.iter().any(|c| c.status == HealthStatus::Unhealthy) {
        HealthStatus::Unhealthy
    } else if components.iter().any(|c| c.status == HealthStatus::Degraded) {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    }
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let components = vec![
        ComponentHealth::configured("ocr", state.ocr.is_some(), "OCR provider not configured"),
        ComponentHealth::configured(
            "vision",
            state.resolver.has_fallback(),
            "vision fallback disabled",
        ),
        ComponentHealth::configured(
            "tutorial",
            state.tutorial.is_some(),
            "tutorial service not configured",
        ),
    ];

    Json(HealthResponse {
        status: overall_status(&components),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime().as_secs(),
        requests: state.request_count(),
        components,
    })
}

/// Liveness probe.
pub async fn liveness_probe() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialize() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Degraded).unwrap(),
            "\"degraded\""
        );
    }

    #[test]
    fn test_component_message_skipped_when_healthy() {
        let component = ComponentHealth::configured("ocr", true, "unused");
        let json = serde_json::to_value(&component).unwrap();
        assert_eq!(json["status"], "healthy");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_overall_status_degraded_when_any_missing() {
        let components = vec![
            ComponentHealth::configured("ocr", true, ""),
            ComponentHealth::configured("tutorial", false, "missing"),
        ];
        assert_eq!(overall_status(&components), HealthStatus::Degraded);
    }

    #[test]
    fn test_overall_status_healthy_when_empty() {
        assert_eq!(overall_status(&[]), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn test_health_check_default_state() {
        let state = Arc::new(AppState::default());
        state.increment_requests();

        let Json(response) = health_check(State(state)).await;
        assert_eq!(response.status, HealthStatus::Degraded);
        assert_eq!(response.requests, 1);
        assert_eq!(response.components.len(), 3);
        assert!(response
            .components
            .iter()
            .all(|c| c.status == HealthStatus::Degraded));
    }
}
