//! Route guide HTTP service binary.
//!
//! # Configuration
//!
//! - `ROUTEGUIDE_DATA_PATH` - Path to the feature dataset JSON (default: `route_guide_db.json`)
//! - `SERVICE_HOST` - Bind address (default: 0.0.0.0)
//! - `SERVICE_PORT` - HTTP port (default: 50051)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` / `METRICS_PATH` - Prometheus exporter settings

use tracing::{error, info, warn};

use routeguide_service::router_with_metrics_path;
use routeguide_service_shared::{
    AppState, LoggingConfig, MetricsConfig, ServiceConfig, init_logging, init_metrics,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env();
    init_logging(&logging_config)?;

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Metrics are optional
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env()?;
    info!(
        data_path = %config.data_path.display(),
        addr = %config.bind_addr(),
        "starting route guide service"
    );

    let state = AppState::load(&config.data_path).map_err(|e| {
        error!(error = %e, path = %config.data_path.display(), "failed to load feature dataset");
        e
    })?
    .with_service(logging_config.service.as_str());

    info!(features = state.store().len(), "feature dataset loaded");

    let app = router_with_metrics_path(state, &metrics_config.path);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %config.bind_addr(), "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
