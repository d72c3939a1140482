//! `/health/live` and `/health/ready`.
//!
//! Liveness only says the process answers. Readiness reports how much of the
//! site was loaded and turns 503 while the waypoint graph is empty, since
//! every route request would fail with `node not found`.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use wayfinder_lib::Site;

use crate::AppState;

const SERVICE: &str = "wayfinder";
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Body of both health endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `ok`, or `not_ready: <reason>`.
    pub status: String,
    pub service: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buildings_loaded: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes_loaded: Option<usize>,
}

impl HealthStatus {
    fn base(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            service: SERVICE.to_string(),
            version: VERSION.to_string(),
            buildings_loaded: None,
            nodes_loaded: None,
        }
    }

    /// The process is up; nothing about the site is reported.
    pub fn alive() -> Self {
        Self::base("ok")
    }

    /// Readiness of a loaded site, with its building and node counts.
    pub fn for_site(site: &Site) -> Self {
        let nodes = site.graph().node_count();
        let mut status = if nodes == 0 {
            Self::base("not_ready: no waypoint nodes loaded")
        } else {
            Self::base("ok")
        };
        status.buildings_loaded = Some(site.buildings().len());
        status.nodes_loaded = Some(nodes);
        status
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ok"
    }
}

pub async fn health_live() -> Json<HealthStatus> {
    Json(HealthStatus::alive())
}

pub async fn health_ready(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let status = HealthStatus::for_site(state.site());
    let code = if status.is_ready() {
        StatusCode::OK
    } else {
        tracing::warn!(status = %status.status, "readiness check failed");
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use axum_test::TestServer;
    use wayfinder_lib::RouteOptions;

    #[test]
    fn alive_omits_site_counts() {
        let json = serde_json::to_value(HealthStatus::alive()).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "wayfinder");
        assert!(json.get("nodes_loaded").is_none());
    }

    #[test]
    fn empty_site_reports_zero_nodes() {
        let status = HealthStatus::for_site(&Site::default());
        assert!(!status.is_ready());
        assert!(status.status.starts_with("not_ready:"));
        assert_eq!(status.nodes_loaded, Some(0));
        assert_eq!(status.buildings_loaded, Some(0));
    }

    #[tokio::test]
    async fn empty_site_answers_503() {
        let state = AppState::from_site(Site::default(), RouteOptions::default());
        let app = Router::new()
            .route("/health/ready", get(health_ready))
            .with_state(state);
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health/ready").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: serde_json::Value = response.json();
        assert_eq!(body["nodes_loaded"], 0);
    }
}
