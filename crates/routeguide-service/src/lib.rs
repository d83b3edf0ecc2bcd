//! Route guide HTTP service.
//!
//! # Endpoints
//!
//! - `POST /api/v1/feature` - Feature at an exact point (JSON in, JSON out)
//! - `POST /api/v1/features` - Features inside a rectangle (JSON in, NDJSON out)
//! - `POST /api/v1/route` - Summarize a recorded route (NDJSON in, JSON out)
//! - `POST /api/v1/route/chat` - Exchange notes by location (NDJSON in, NDJSON out)
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness check
//! - `GET /health/ready` - Kubernetes readiness check

#![deny(warnings)]

pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use routeguide_service_shared::{
    AppState, MetricsLayer, health_live, health_ready, metrics_handler,
};

/// Default path for the Prometheus scrape endpoint.
pub const DEFAULT_METRICS_PATH: &str = "/metrics";

/// Build the service router with the metrics endpoint at its default path.
pub fn router(state: AppState) -> Router {
    router_with_metrics_path(state, DEFAULT_METRICS_PATH)
}

/// Build the service router, serving Prometheus metrics at `metrics_path`.
pub fn router_with_metrics_path(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route("/api/v1/feature", post(handlers::get_feature))
        .route("/api/v1/features", post(handlers::list_features))
        .route("/api/v1/route", post(handlers::record_route))
        .route("/api/v1/route/chat", post(handlers::route_chat))
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(MetricsLayer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
