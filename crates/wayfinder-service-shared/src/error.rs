//! Error responses for the HTTP services.
//!
//! Every failure is returned as `{"error": "<message>"}` with a status code
//! derived from the library error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use wayfinder_lib::Error as LibError;

/// Error payload and status returned to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request for missing or malformed input.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 404 Not Found for unknown ids and unreachable destinations.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 500 Internal Server Error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Convert library errors to API errors.
///
/// Requests naming unknown nodes or buildings, and requests with no route,
/// are 404s; everything else is a server-side failure.
pub fn from_lib_error(error: &LibError) -> ApiError {
    match error {
        LibError::NodeNotFound { .. }
        | LibError::NoPathFound { .. }
        | LibError::NoExitReachable { .. }
        | LibError::UnknownBuilding { .. } => ApiError::not_found(error.to_string()),
        LibError::MissingDestination => ApiError::bad_request(error.to_string()),
        _ => ApiError::internal(error.to_string()),
    }
}

/// Short label for a library error, used as a metric dimension.
pub fn failure_reason(error: &LibError) -> &'static str {
    match error {
        LibError::NodeNotFound { .. } => "node_not_found",
        LibError::NoPathFound { .. } => "no_path",
        LibError::NoExitReachable { .. } => "no_exit_reachable",
        LibError::UnknownBuilding { .. } => "unknown_building",
        LibError::NoExitsConfigured { .. } | LibError::NoTransferConfigured { .. } => {
            "configuration"
        }
        LibError::SearchLimitExceeded { .. } => "search_limit",
        _ => "internal_error",
    }
}
