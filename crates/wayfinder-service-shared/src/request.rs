//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use wayfinder_lib::RouteRequest;

use crate::ApiError;

/// Validation trait for request types.
///
/// Implementations should check all fields and return an [`ApiError`] for
/// invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// Returns a boxed `ApiError` to avoid large `Result::Err` variants.
    fn validate(&self) -> Result<(), Box<ApiError>>;
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// Query string of `GET /path`.
///
/// All fields are optional at the extractor level so that missing values
/// produce a validation error rather than an extractor rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    /// `true` in any letter case requests an evacuation route.
    pub emergency: Option<String>,
    /// Floor the client is currently showing.
    pub floor: Option<String>,
}

impl PathQuery {
    pub fn is_emergency(&self) -> bool {
        self.emergency
            .as_deref()
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }

    /// Convert into a library request. Call after [`Validate::validate`].
    pub fn to_route_request(&self) -> RouteRequest {
        RouteRequest {
            start: self.start.clone().unwrap_or_default(),
            goal: self.end.clone(),
            emergency: self.is_emergency(),
            current_floor: self.floor.clone(),
        }
    }
}

impl Validate for PathQuery {
    fn validate(&self) -> Result<(), Box<ApiError>> {
        if is_blank(&self.start) {
            return Err(Box::new(ApiError::bad_request(
                "Please provide start parameter.",
            )));
        }

        if !self.is_emergency() && is_blank(&self.end) {
            return Err(Box::new(ApiError::bad_request(
                "Please provide end parameter for normal navigation.",
            )));
        }

        Ok(())
    }
}

/// JSON body of `POST /path/building/{building_id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildingPathRequest {
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub emergency: bool,
    #[serde(default)]
    pub floor: Option<String>,
}

impl BuildingPathRequest {
    /// Convert into a library request using already-resolved node ids.
    pub fn to_route_request(&self, start: String, end: Option<String>) -> RouteRequest {
        RouteRequest {
            start,
            goal: end,
            emergency: self.emergency,
            current_floor: self.floor.clone(),
        }
    }
}

impl Validate for BuildingPathRequest {
    fn validate(&self) -> Result<(), Box<ApiError>> {
        if is_blank(&self.start) {
            return Err(Box::new(ApiError::bad_request("Start node is required")));
        }

        if !self.emergency && is_blank(&self.end) {
            return Err(Box::new(ApiError::bad_request(
                "End node is required for normal navigation",
            )));
        }

        Ok(())
    }
}
