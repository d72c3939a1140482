//! Wayfinder route planning HTTP microservice.
//!
//! # Configuration
//!
//! - `WAYFINDER_DATA_PATH` - Building JSON file or directory (default: platform data dir)
//! - `WAYFINDER_ID_SCHEME` - `prefixed` (default) or `flat`
//! - `WAYFINDER_HEURISTIC` - `degrees` (default) or `metres`
//! - `WAYFINDER_MAX_EXPANSIONS` - Optional A* expansion limit
//! - `SERVICE_PORT` - HTTP port (default: 8000)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` - Set to `false` to disable Prometheus metrics
//! - `METRICS_PATH` - Metrics endpoint path (default: /metrics)

use std::net::SocketAddr;

use tracing::{error, info};

use wayfinder_service_route::app_with_metrics_path;
use wayfinder_service_shared::{
    AppState, LoggingConfig, MetricsConfig, ServiceConfig, init_logging, init_metrics,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("route");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env().inspect_err(|e| {
        error!(error = %e, "invalid service configuration");
    })?;

    info!(
        data_path = %config.data_path.display(),
        port = config.port,
        id_scheme = %config.load.id_scheme,
        "starting route service"
    );

    let state = AppState::load(&config.data_path, &config.load, config.route).inspect_err(|e| {
        error!(error = %e, path = %config.data_path.display(), "failed to load application state");
    })?;

    info!(
        buildings = state.site().buildings().len(),
        nodes = state.site().graph().node_count(),
        "application state loaded"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app_with_metrics_path(state, &metrics_config.path)).await?;

    Ok(())
}
