//! Health check handlers for Kubernetes health checks.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses for Kubernetes liveness and readiness checks.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Number of named features loaded (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features_loaded: Option<usize>,

    /// Number of route chat notes posted so far (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_stored: Option<usize>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            features_loaded: None,
            notes_stored: None,
        }
    }

    /// Create a ready status with dataset information.
    pub fn ready(service: &str, version: &str, features: usize, notes: usize) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            features_loaded: Some(features),
            notes_stored: Some(notes),
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            features_loaded: None,
            notes_stored: None,
        }
    }
}

/// Liveness handler.
///
/// Returns 200 OK if the service is running.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"routeguide","version":"0.1.0"}
/// ```
pub async fn health_live(State(state): State<AppState>) -> impl IntoResponse {
    let status = HealthStatus::alive(state.service_name(), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness handler.
///
/// Returns 503 when the dataset holds no named features, since every lookup
/// would then miss.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"routeguide","version":"0.1.0","features_loaded":100,"notes_stored":0}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = state.service_name();
    let version = env!("CARGO_PKG_VERSION");

    let feature_count = state.store().len();
    if feature_count == 0 {
        let status = HealthStatus::not_ready(service, version, "no features loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(service, version, feature_count, state.notes().len());
    (StatusCode::OK, Json(status)).into_response()
}
