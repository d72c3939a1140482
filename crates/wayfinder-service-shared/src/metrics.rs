//! Prometheus metrics for the wayfinder services.
//!
//! - [`init_metrics`] installs the global recorder once per process
//! - [`metrics_handler`] renders the `/metrics` exposition text
//! - `record_*` helpers publish routing counters and histograms
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use wayfinder_service_shared::metrics::{init_metrics, metrics_handler, MetricsConfig};
//!
//! init_metrics(&MetricsConfig::default()).expect("metrics recorder");
//! let app: Router = Router::new().route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Paths already routed by the service; mounting metrics on one would clash.
pub const RESERVED_PATHS: &[&str] = &["/path", "/buildings", "/health/live", "/health/ready"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Path the exposition endpoint is mounted on.
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Read `METRICS_ENABLED` (anything but `false` enables) and `METRICS_PATH`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = lookup("METRICS_ENABLED")
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        let path = lookup("METRICS_PATH")
            .map(|v| v.trim().to_string())
            .filter(|v| {
                let usable = is_usable_path(v);
                if !usable {
                    tracing::warn!(path = %v, "ignoring METRICS_PATH, using /metrics");
                }
                usable
            })
            .unwrap_or_else(|| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// A static absolute path that no service route already uses.
fn is_usable_path(path: &str) -> bool {
    path.len() > 1
        && path.starts_with('/')
        && !path.contains(['{', '}', '*'])
        && !RESERVED_PATHS.contains(&path.trim_end_matches('/'))
}

/// Install the Prometheus recorder.
///
/// # Errors
///
/// Fails when metrics are disabled, when a recorder is already installed, or
/// when the exporter cannot be built.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// Handle of the installed recorder, if any.
pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Axum handler for the metrics endpoint.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

/// Count a successfully planned route.
///
/// `kind` is `normal` or `emergency`; `service` names the calling endpoint.
pub fn record_route_calculated(kind: &str, service: &str) {
    metrics::counter!(
        "wayfinder_routes_calculated_total",
        "kind" => kind.to_string(),
        "service" => service.to_string()
    )
    .increment(1);
}

/// Count a failed route request by reason (`no_path`, `node_not_found`, ...).
pub fn record_route_failed(reason: &str, service: &str) {
    metrics::counter!(
        "wayfinder_routes_failed_total",
        "reason" => reason.to_string(),
        "service" => service.to_string()
    )
    .increment(1);
}

/// Record how many waypoints a returned route has.
pub fn record_route_waypoints(count: usize, kind: &str) {
    metrics::histogram!(
        "wayfinder_route_waypoints",
        "kind" => kind.to_string()
    )
    .record(count as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_config_default() {
        let config = MetricsConfig::default();
        assert!(config.enabled);
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn test_metrics_config_from_lookup() {
        let config = MetricsConfig::from_lookup(|key| match key {
            "METRICS_ENABLED" => Some("FALSE".to_string()),
            "METRICS_PATH" => Some("/prom".to_string()),
            _ => None,
        });
        assert!(!config.enabled);
        assert_eq!(config.path, "/prom");

        let config = MetricsConfig::from_lookup(|key| match key {
            "METRICS_PATH" => Some("no-slash".to_string()),
            _ => None,
        });
        assert!(config.enabled);
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn test_metrics_path_cannot_shadow_service_routes() {
        for path in ["/path", "/buildings", "/health/ready", "/path/", "/{id}", "/"] {
            let config = MetricsConfig::from_lookup(|key| match key {
                "METRICS_PATH" => Some(path.to_string()),
                _ => None,
            });
            assert_eq!(config.path, "/metrics", "{path} should be rejected");
        }
    }

    #[test]
    fn test_disabled_config_is_rejected() {
        let config = MetricsConfig {
            enabled: false,
            ..MetricsConfig::default()
        };
        assert_eq!(init_metrics(&config), Err(MetricsError::Disabled));
    }

    #[tokio::test]
    async fn test_metrics_handler_returns_exposition_text() {
        let output = metrics_handler().await;
        assert!(output.is_empty() || output.contains('#') || output.contains("wayfinder_"));
    }

    #[test]
    fn test_route_helpers_without_recorder() {
        record_route_calculated("normal", "route");
        record_route_calculated("emergency", "route");
        record_route_failed("no_path", "route");
        record_route_waypoints(12, "normal");
    }

    #[test]
    fn test_metrics_error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        assert!(MetricsError::InstallFailed("boom".to_string())
            .to_string()
            .contains("boom"));
    }
}
