use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::floors::RouteStep;
use crate::graph::WaypointGraph;
use crate::routing::{RouteKind, RoutePlan};

/// Position and floor of a waypoint as sent to clients.
///
/// `x`/`y` are `null` for nodes without coordinates; `floor` is always a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointCoordinates {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub floor: String,
}

/// One entry of a route as sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: String,
    pub name: String,
    pub coordinates: WaypointCoordinates,
}

impl Waypoint {
    /// Build the wire form of `step`, naming it after its id when the node has
    /// no display name.
    pub fn from_step(graph: &WaypointGraph, step: &RouteStep) -> Self {
        let node = graph.node(step.id.as_str());
        let position = node.and_then(|node| node.position);
        let name = node
            .and_then(|node| node.name.clone())
            .unwrap_or_else(|| step.id.to_string());

        Self {
            id: step.id.to_string(),
            name,
            coordinates: WaypointCoordinates {
                x: position.map(|p| p.x),
                y: position.map(|p| p.y),
                floor: step.floor.to_string(),
            },
        }
    }
}

/// Presentation style for turning a [`RoutePlan`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteRenderMode {
    /// Header plus one numbered line per waypoint.
    #[default]
    PlainText,
    /// Single line of waypoint names joined by arrows.
    Compact,
}

/// Render a plan for terminal output.
pub fn render_plan(plan: &RoutePlan, mode: RouteRenderMode) -> String {
    match mode {
        RouteRenderMode::PlainText => render_plain(plan),
        RouteRenderMode::Compact => plan
            .waypoints
            .iter()
            .map(|waypoint| waypoint.name.as_str())
            .collect::<Vec<_>>()
            .join(" -> "),
    }
}

fn render_plain(plan: &RoutePlan) -> String {
    let mut out = String::new();
    let label = match plan.kind {
        RouteKind::Normal => "Route",
        RouteKind::Emergency => "Emergency route",
    };
    let start = plan.start().map_or("<none>", |w| w.name.as_str());
    let goal = plan.goal().map_or("<none>", |w| w.name.as_str());

    let _ = writeln!(
        out,
        "{label} from {start} to {goal} ({} hops, {:.0} m, ~{} min walk):",
        plan.hop_count(),
        plan.distance_m,
        plan.estimated_walk_minutes()
    );
    for (index, waypoint) in plan.waypoints.iter().enumerate() {
        let _ = write!(
            out,
            "{:>3}. {} [floor {}]",
            index + 1,
            waypoint.name,
            waypoint.coordinates.floor
        );
        if plan.transfer.as_ref().is_some_and(|t| t.as_str() == waypoint.id) {
            out.push_str(" (change floors)");
        }
        if plan.exit.as_ref().is_some_and(|e| e.as_str() == waypoint.id) {
            out.push_str(" (exit)");
        }
        out.push('\n');
    }
    out
}
