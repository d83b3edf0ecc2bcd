//! Shared infrastructure for the route guide HTTP service.
//!
//! This crate provides common functionality used by the service binary:
//!
//! - [`AppState`]: Pre-loaded feature dataset and the route chat note log
//! - [`health`]: Health check handlers for Kubernetes liveness/readiness checks
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`ServiceResponse`]: Wrapper for successful responses with content type
//! - [`NdjsonBody`]: Streaming `application/x-ndjson` response bodies
//! - [`ServiceConfig`]: Bind address and dataset location from the environment
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//!
//! # Architecture
//!
//! The service follows a thin-handler pattern where all business logic resides
//! in `routeguide-lib`. This crate provides only HTTP glue:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Decode JSON / NDJSON request                             │
//! │  - Call routeguide-lib APIs                                 │
//! │  - Encode or stream the response                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides test fixtures and mock state for handler
//! testing. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod config;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigError, ServiceConfig};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_feature_lookup, record_features_listed,
    record_notes_exchanged, record_route_recorded, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_MALFORMED_STREAM, PROBLEM_SERVICE_UNAVAILABLE,
};
pub use response::{NdjsonBody, ServiceResponse};
pub use state::{AppState, AppStateError};
