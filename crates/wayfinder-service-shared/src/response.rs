//! Success payloads for HTTP responses.

use serde::{Deserialize, Serialize};

use wayfinder_lib::{BuildingProfile, Poi, RouteKind, RoutePlan, Waypoint};

/// Body of a successful path request: `{"path": [...], "type": "normal"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResponse {
    pub path: Vec<Waypoint>,
    #[serde(rename = "type")]
    pub kind: RouteKind,
}

impl From<RoutePlan> for PathResponse {
    fn from(plan: RoutePlan) -> Self {
        Self {
            path: plan.waypoints,
            kind: plan.kind,
        }
    }
}

/// Entry of the `GET /buildings` listing.
#[derive(Debug, Clone, Serialize)]
pub struct BuildingSummary {
    pub id: String,
    pub name: String,
    pub floors: Vec<String>,
    pub pois: Vec<Poi>,
    pub exits: Vec<String>,
    pub transfers: Vec<String>,
}

impl From<&BuildingProfile> for BuildingSummary {
    fn from(profile: &BuildingProfile) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            floors: profile.floors.iter().map(ToString::to_string).collect(),
            pois: profile.pois.clone(),
            exits: profile.exits.iter().map(ToString::to_string).collect(),
            transfers: profile.transfers.iter().map(ToString::to_string).collect(),
        }
    }
}
