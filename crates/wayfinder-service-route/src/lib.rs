//! Wayfinder route planning HTTP microservice.
//!
//! # Endpoints
//!
//! - `GET /path?start=&end=&emergency=true&floor=` - Route between two nodes,
//!   or to the nearest exit when `emergency=true`
//! - `POST /path/building/{building_id}` - Same, with node ids relative to one building
//! - `GET /buildings` - Loaded buildings with their POIs, exits and lifts
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use wayfinder_lib::RouteRequest;
use wayfinder_service_shared::{
    ApiError, AppState, BuildingPathRequest, BuildingSummary, PathQuery, PathResponse, Validate,
    failure_reason, from_lib_error, health_live, health_ready, metrics_handler,
    record_route_calculated, record_route_failed, record_route_waypoints, track_requests,
};

/// Build the service router around a loaded state.
pub fn app(state: AppState) -> Router {
    app_with_metrics_path(state, "/metrics")
}

/// Same as [`app`], serving Prometheus metrics at `metrics_path`.
pub fn app_with_metrics_path(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route("/path", get(path_handler))
        .route("/path/building/{building_id}", post(building_path_handler))
        .route("/buildings", get(buildings_handler))
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Handle `GET /path`.
async fn path_handler(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<PathResponse>, ApiError> {
    if let Err(err) = query.validate() {
        record_route_failed("validation_error", "path");
        return Err(*err);
    }

    plan(&state, &query.to_route_request(), "path")
}

/// Handle `POST /path/building/{building_id}`.
async fn building_path_handler(
    Path(building_id): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<BuildingPathRequest>, JsonRejection>,
) -> Result<Json<PathResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        record_route_failed("validation_error", "building_path");
        ApiError::bad_request(rejection.body_text())
    })?;

    if let Err(err) = request.validate() {
        record_route_failed("validation_error", "building_path");
        return Err(*err);
    }

    let resolve = |id: &str| {
        state.site().resolve_node(&building_id, id).map_err(|e| {
            record_route_failed(failure_reason(&e), "building_path");
            from_lib_error(&e)
        })
    };

    let start = resolve(request.start.as_deref().unwrap_or_default())?;
    let end = match (request.emergency, request.end.as_deref()) {
        (false, Some(end)) => Some(resolve(end)?.to_string()),
        _ => None,
    };

    let route_request = request.to_route_request(start.to_string(), end);
    plan(&state, &route_request, "building_path")
}

/// Handle `GET /buildings`.
async fn buildings_handler(State(state): State<AppState>) -> Json<Vec<BuildingSummary>> {
    Json(
        state
            .site()
            .buildings()
            .iter()
            .map(BuildingSummary::from)
            .collect(),
    )
}

fn plan(
    state: &AppState,
    request: &RouteRequest,
    service: &str,
) -> Result<Json<PathResponse>, ApiError> {
    info!(
        start = %request.start,
        goal = request.goal.as_deref().unwrap_or("-"),
        emergency = request.emergency,
        floor = request.current_floor.as_deref().unwrap_or("-"),
        "handling path request"
    );

    let plan = state.navigator().plan(request).map_err(|e| {
        warn!(error = %e, start = %request.start, "route planning failed");
        record_route_failed(failure_reason(&e), service);
        from_lib_error(&e)
    })?;

    let kind = plan.kind.to_string();
    record_route_calculated(&kind, service);
    record_route_waypoints(plan.waypoints.len(), &kind);

    info!(
        kind = %kind,
        waypoints = plan.waypoints.len(),
        distance_m = plan.distance_m,
        "route computed successfully"
    );

    Ok(Json(PathResponse::from(plan)))
}
