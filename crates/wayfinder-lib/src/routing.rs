use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::building::Site;
use crate::distance::HeuristicUnits;
use crate::emergency::nearest_exit;
use crate::error::{Error, Result};
use crate::floors::{FloorRoute, FloorRouter};
use crate::graph::{Floor, NodeId};
use crate::output::Waypoint;
use crate::path::SearchLimits;

/// Average walking speed used for time estimates, in metres per second.
pub const WALKING_SPEED_MPS: f64 = 1.4;

/// Kind of route that was planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Normal,
    Emergency,
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RouteKind::Normal => "normal",
            RouteKind::Emergency => "emergency",
        })
    }
}

/// High-level route planning request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRequest {
    pub start: String,
    /// Required unless `emergency` is set, in which case it is ignored.
    pub goal: Option<String>,
    pub emergency: bool,
    /// Floor the user is currently viewing; selects one leg of a cross-floor route.
    pub current_floor: Option<String>,
}

impl RouteRequest {
    pub fn normal(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: Some(goal.into()),
            ..Self::default()
        }
    }

    pub fn emergency(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            emergency: true,
            ..Self::default()
        }
    }

    pub fn on_floor(mut self, floor: impl Into<String>) -> Self {
        self.current_floor = Some(floor.into());
        self
    }
}

/// Tuning knobs shared by every search a navigator runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteOptions {
    pub heuristic: HeuristicUnits,
    pub limits: SearchLimits,
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub kind: RouteKind,
    pub waypoints: Vec<Waypoint>,
    /// Transfer node used to change floors, if the route crosses floors.
    pub transfer: Option<NodeId>,
    /// Exit reached by an emergency route.
    pub exit: Option<NodeId>,
    /// Walking distance along the returned waypoints.
    pub distance_m: f64,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<&Waypoint> {
        self.waypoints.first()
    }

    pub fn goal(&self) -> Option<&Waypoint> {
        self.waypoints.last()
    }

    /// Walking time in whole minutes, never less than one.
    pub fn estimated_walk_minutes(&self) -> u64 {
        let minutes = (self.distance_m / WALKING_SPEED_MPS / 60.0).ceil();
        if minutes.is_finite() && minutes > 1.0 {
            minutes as u64
        } else {
            1
        }
    }
}

/// Route planner over a shared, read-only site.
///
/// Cloning is cheap; clones share the same site.
#[derive(Debug, Clone)]
pub struct Navigator {
    site: Arc<Site>,
    options: RouteOptions,
}

impl Navigator {
    pub fn new(site: Arc<Site>) -> Self {
        Self::with_options(site, RouteOptions::default())
    }

    pub fn with_options(site: Arc<Site>, options: RouteOptions) -> Self {
        Self { site, options }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn options(&self) -> &RouteOptions {
        &self.options
    }

    /// Route from `start` to `end`, optionally limited to the leg on `floor_hint`.
    pub fn find_path(&self, start: &str, end: &str, floor_hint: Option<&str>) -> Result<RoutePlan> {
        find_path(&self.site, &self.options, start, end, floor_hint)
    }

    /// Route from `start` to the nearest exit of its building.
    pub fn find_emergency_path(&self, start: &str) -> Result<RoutePlan> {
        find_emergency_path(&self.site, &self.options, start)
    }

    pub fn plan(&self, request: &RouteRequest) -> Result<RoutePlan> {
        plan_with(&self.site, &self.options, request)
    }
}

/// Compute a route for `request` using default options.
pub fn plan_route(site: &Site, request: &RouteRequest) -> Result<RoutePlan> {
    plan_with(site, &RouteOptions::default(), request)
}

fn plan_with(site: &Site, options: &RouteOptions, request: &RouteRequest) -> Result<RoutePlan> {
    if request.emergency {
        return find_emergency_path(site, options, &request.start);
    }

    let goal = request.goal.as_deref().ok_or(Error::MissingDestination)?;
    find_path(
        site,
        options,
        &request.start,
        goal,
        request.current_floor.as_deref(),
    )
}

fn find_path(
    site: &Site,
    options: &RouteOptions,
    start: &str,
    end: &str,
    floor_hint: Option<&str>,
) -> Result<RoutePlan> {
    let graph = site.graph();
    let start_node = graph.require(start)?;
    graph.require(end)?;
    let profile = site.profile_for(start_node)?;

    let router = FloorRouter::new(graph, options.heuristic.cost_model(), options.limits);
    let hint = floor_hint.map(Floor::from);
    let route = router.route(start, end, &profile.id, &profile.transfers, hint.as_ref())?;

    tracing::debug!(
        start,
        end,
        building = %profile.id,
        waypoints = route.len(),
        "planned route"
    );
    Ok(to_plan(site, RouteKind::Normal, route, None))
}

fn find_emergency_path(site: &Site, options: &RouteOptions, start: &str) -> Result<RoutePlan> {
    let graph = site.graph();
    let start_node = graph.require(start)?;
    let profile = site.profile_for(start_node)?;

    let router = FloorRouter::new(graph, options.heuristic.cost_model(), options.limits);
    let found = nearest_exit(&router, start, &profile.id, &profile.transfers, &profile.exits)?;

    tracing::info!(
        start,
        building = %profile.id,
        exit = %found.exit,
        waypoints = found.route.len(),
        "planned emergency route"
    );
    Ok(to_plan(site, RouteKind::Emergency, found.route, Some(found.exit)))
}

fn to_plan(site: &Site, kind: RouteKind, route: FloorRoute, exit: Option<NodeId>) -> RoutePlan {
    let waypoints = route
        .steps
        .iter()
        .map(|step| Waypoint::from_step(site.graph(), step))
        .collect();
    RoutePlan {
        kind,
        waypoints,
        transfer: route.transfer,
        exit,
        distance_m: route.cost,
    }
}
