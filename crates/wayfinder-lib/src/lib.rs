//! Wayfinder library entry points.
//!
//! This crate loads building definitions into a waypoint graph and plans
//! walking routes over it: same-floor A* searches, cross-floor routes through
//! lift landings and emergency routes to the nearest exit. Higher-level
//! consumers (CLI, HTTP services) should only depend on the items exported
//! here instead of reimplementing behavior.

#![deny(warnings)]

pub mod building;
pub mod dataset;
pub mod distance;
pub mod emergency;
pub mod error;
pub mod floors;
pub mod graph;
pub mod output;
pub mod path;
pub mod routing;
pub mod session;

pub use building::{BuildingData, BuildingProfile, IdScheme, LoadOptions, Poi, Site};
pub use dataset::{default_data_path, load_building_file, load_site, resolve_data_path, DATA_PATH_ENV};
pub use distance::{CostModel, DegreeCostModel, HeuristicUnits, MetricCostModel, METERS_PER_DEGREE};
pub use emergency::{nearest_exit, ExitRoute};
pub use error::{Error, Result};
pub use floors::{FloorRoute, FloorRouter, RouteSpan, RouteStep};
pub use graph::{Floor, NodeData, NodeId, Position, WaypointGraph};
pub use output::{render_plan, RouteRenderMode, Waypoint, WaypointCoordinates};
pub use path::{find_shortest_path, path_cost, SearchLimits};
pub use routing::{plan_route, Navigator, RouteKind, RouteOptions, RoutePlan, RouteRequest};
pub use session::{NavigationSession, SessionState};
