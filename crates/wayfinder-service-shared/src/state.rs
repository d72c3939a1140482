//! Application state for HTTP microservices.
//!
//! This module provides the shared state structure that axum handlers use to
//! access the loaded building site.

use std::path::Path;
use std::sync::Arc;

use wayfinder_lib::{load_site, Error as LibError, LoadOptions, Navigator, RouteOptions, Site};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to load or assemble the building data.
    SiteLoad(LibError),

    /// Building data path does not exist.
    DataNotFound(String),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SiteLoad(e) => write!(f, "failed to load building data: {}", e),
            Self::DataNotFound(path) => write!(f, "building data not found: {}", path),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SiteLoad(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::SiteLoad(err)
    }
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use wayfinder_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let site = state.site();
///     // ... use site
/// }
///
/// let state = AppState::load("path/to/buildings", &Default::default(), Default::default()).unwrap();
/// let app = Router::new()
///     .route("/buildings", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    navigator: Navigator,
}

impl AppState {
    /// Load application state from a building file or directory.
    pub fn load(
        data_path: impl AsRef<Path>,
        load: &LoadOptions,
        route: RouteOptions,
    ) -> Result<Self, AppStateError> {
        let data_path = data_path.as_ref();

        if !data_path.exists() {
            return Err(AppStateError::DataNotFound(
                data_path.display().to_string(),
            ));
        }

        tracing::info!(path = %data_path.display(), "loading building data");
        let site = load_site(data_path, load)?;
        tracing::info!(
            buildings = site.buildings().len(),
            nodes = site.graph().node_count(),
            "building data loaded successfully"
        );

        Ok(Self::from_site(site, route))
    }

    /// Create application state from an already-assembled site.
    ///
    /// This is useful for testing or when building graphs programmatically.
    pub fn from_site(site: Site, route: RouteOptions) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                navigator: Navigator::with_options(Arc::new(site), route),
            }),
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.inner.navigator
    }

    pub fn site(&self) -> &Site {
        self.inner.navigator.site()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let site = self.site();
        f.debug_struct("AppState")
            .field("building_count", &site.buildings().len())
            .field("node_count", &site.graph().node_count())
            .field("heuristic", &self.navigator().options().heuristic)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_lib::{BuildingProfile, NodeData, WaypointGraph};

    fn tiny_site() -> Site {
        let mut graph = WaypointGraph::new();
        graph.add_node("kiosk-1", NodeData::new(0.0, 0.0, "G").with_building("kiosk"));
        Site::new(graph, vec![BuildingProfile::new("kiosk")])
    }

    #[test]
    fn test_app_state_from_site() {
        let state = AppState::from_site(tiny_site(), RouteOptions::default());
        assert_eq!(state.site().graph().node_count(), 1);
        assert_eq!(state.site().buildings().len(), 1);
    }

    #[test]
    fn test_app_state_clone_shares_site() {
        let state1 = AppState::from_site(tiny_site(), RouteOptions::default());
        let state2 = state1.clone();
        assert!(std::ptr::eq(state1.site(), state2.site()));
    }

    #[test]
    fn test_app_state_debug() {
        let state = AppState::from_site(tiny_site(), RouteOptions::default());
        let debug = format!("{:?}", state);

        assert!(debug.contains("AppState"));
        assert!(debug.contains("building_count"));
        assert!(debug.contains("node_count"));
    }

    #[test]
    fn test_app_state_load_nonexistent() {
        let result = AppState::load(
            "/nonexistent/path/to/buildings",
            &LoadOptions::default(),
            RouteOptions::default(),
        );

        match result.unwrap_err() {
            AppStateError::DataNotFound(path) => {
                assert!(path.contains("nonexistent"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
