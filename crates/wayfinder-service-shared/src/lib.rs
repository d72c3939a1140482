//! Shared infrastructure for Wayfinder HTTP microservices.
//!
//! This crate provides common functionality used by the service binaries:
//!
//! - [`AppState`]: Pre-loaded building site and navigator shared by handlers
//! - [`ServiceConfig`]: Environment-driven service configuration
//! - [`health`]: Health check handlers for liveness/readiness probes
//! - [`ApiError`]: `{"error": "..."}` responses and library error mapping
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request id propagation and HTTP metrics
//! - Request types with validation for each endpoint
//!
//! # Architecture
//!
//! The services follow a thin-handler pattern where all routing logic resides
//! in `wayfinder-lib`. This crate provides only HTTP glue:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse query string / JSON body                           │
//! │  - Validate parameters                                      │
//! │  - Call wayfinder-lib Navigator                             │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a fixture-backed state for handler
//! testing. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod config;
mod error;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigError, ServiceConfig, DEFAULT_PORT};
pub use error::{failure_reason, from_lib_error, ApiError};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_route_calculated, record_route_failed,
    record_route_waypoints, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, track_requests, RequestId};
pub use request::{BuildingPathRequest, PathQuery, Validate};
pub use response::{BuildingSummary, PathResponse};
pub use state::{AppState, AppStateError};
