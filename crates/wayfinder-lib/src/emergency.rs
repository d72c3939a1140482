use crate::error::{Error, Result};
use crate::floors::{FloorRoute, FloorRouter};
use crate::graph::NodeId;

/// Route to the exit that won the emergency search.
#[derive(Debug, Clone, PartialEq)]
pub struct ExitRoute {
    pub exit: NodeId,
    pub route: FloorRoute,
}

/// Route from `start` to whichever exit is reachable in the fewest waypoints.
///
/// Exits are tried in the given order. An exit that cannot be reached, or
/// one on another floor when the building has no transfer node, is skipped;
/// any other routing error aborts the search. On equal waypoint
/// counts the earlier exit is kept.
pub fn nearest_exit(
    router: &FloorRouter<'_>,
    start: &str,
    building: &str,
    transfers: &[NodeId],
    exits: &[NodeId],
) -> Result<ExitRoute> {
    if exits.is_empty() {
        return Err(Error::NoExitsConfigured {
            building: building.to_string(),
        });
    }

    let mut best: Option<ExitRoute> = None;
    for exit in exits {
        let route = match router.route(start, exit.as_str(), building, transfers, None) {
            Ok(route) => route,
            Err(err @ (Error::NoPathFound { .. } | Error::NoTransferConfigured { .. })) => {
                tracing::debug!(start, exit = %exit, error = %err, "exit unreachable");
                continue;
            }
            Err(err) => return Err(err),
        };

        if best
            .as_ref()
            .is_none_or(|current| route.len() < current.route.len())
        {
            best = Some(ExitRoute {
                exit: exit.clone(),
                route,
            });
        }
    }

    best.ok_or_else(|| {
        tracing::warn!(start, building, "no exit reachable");
        Error::NoExitReachable {
            start: start.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DegreeCostModel;
    use crate::graph::{NodeData, WaypointGraph};
    use crate::path::SearchLimits;

    /// `start` sits three hops from `near` and five hops from `far`; `sealed`
    /// has no connections at all.
    fn corridor() -> WaypointGraph {
        let mut graph = WaypointGraph::new();
        let names = ["far", "w4", "w3", "w2", "w1", "start", "e1", "e2", "near"];
        for (index, name) in names.iter().enumerate() {
            graph.add_node(*name, NodeData::new(index as f64, 0.0, "G"));
        }
        for pair in names.windows(2) {
            graph.add_edge(pair[0], pair[1]).unwrap();
        }
        graph.add_node("sealed", NodeData::new(50.0, 50.0, "G"));
        graph
    }

    fn run(graph: &WaypointGraph, start: &str, exits: &[&str]) -> Result<ExitRoute> {
        let exits: Vec<NodeId> = exits.iter().map(|id| NodeId::from(*id)).collect();
        let router = FloorRouter::new(graph, &DegreeCostModel, SearchLimits::unlimited());
        nearest_exit(&router, start, "hall", &[], &exits)
    }

    #[test]
    fn picks_exit_with_fewest_waypoints() {
        let graph = corridor();
        let found = run(&graph, "start", &["far", "near"]).unwrap();
        assert_eq!(found.exit, NodeId::from("near"));
        assert_eq!(found.route.len(), 4);
    }

    #[test]
    fn unreachable_exits_are_skipped() {
        let graph = corridor();
        let found = run(&graph, "start", &["sealed", "far"]).unwrap();
        assert_eq!(found.exit, NodeId::from("far"));
    }

    #[test]
    fn start_on_an_exit_is_a_single_waypoint() {
        let graph = corridor();
        let found = run(&graph, "near", &["far", "near"]).unwrap();
        assert_eq!(found.exit, NodeId::from("near"));
        assert_eq!(found.route.len(), 1);
    }

    #[test]
    fn no_reachable_exit_is_reported() {
        let graph = corridor();
        let err = run(&graph, "start", &["sealed"]).unwrap_err();
        assert!(matches!(err, Error::NoExitReachable { start } if start == "start"));
    }

    #[test]
    fn empty_exit_list_is_a_configuration_error() {
        let graph = corridor();
        let err = run(&graph, "start", &[]).unwrap_err();
        assert!(matches!(err, Error::NoExitsConfigured { building } if building == "hall"));
    }

    #[test]
    fn exit_on_another_floor_without_transfers_is_skipped() {
        let mut graph = WaypointGraph::new();
        graph.add_node("start", NodeData::new(0.0, 0.0, "G"));
        graph.add_node("door", NodeData::new(1.0, 0.0, "G"));
        graph.add_node("roof", NodeData::new(0.0, 1.0, "R"));
        graph.add_edge("start", "door").unwrap();

        let found = run(&graph, "start", &["roof", "door"]).unwrap();
        assert_eq!(found.exit, NodeId::from("door"));
        assert_eq!(found.route.len(), 2);

        let err = run(&graph, "start", &["roof"]).unwrap_err();
        assert!(matches!(err, Error::NoExitReachable { start } if start == "start"));
    }

    #[test]
    fn unknown_exit_propagates_not_found() {
        let graph = corridor();
        let err = run(&graph, "start", &["near", "ghost"]).unwrap_err();
        assert!(matches!(err, Error::NodeNotFound { id } if id == "ghost"));
    }
}
