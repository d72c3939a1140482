//! Routing across floors through designated transfer nodes.
//!
//! A route between two floors is composed from two same-floor legs joined at
//! a transfer node (a lift landing). Each leg is an independent A* search;
//! when several transfer nodes are configured the cheapest composition wins.

use crate::distance::CostModel;
use crate::error::{Error, Result};
use crate::graph::{Floor, NodeId, WaypointGraph};
use crate::path::{find_shortest_path, path_cost, SearchLimits};

/// One node of a composed route together with the floor it is shown on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteStep {
    pub id: NodeId,
    pub floor: Floor,
}

/// Which part of a cross-floor route was returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSpan {
    /// Single-floor route, or both legs of a cross-floor route.
    Full,
    /// Only the leg on the start floor, ending at the transfer node.
    StartFloor,
    /// Only the leg on the destination floor, starting at the transfer node.
    GoalFloor,
}

/// Result of routing between two nodes that may sit on different floors.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorRoute {
    pub steps: Vec<RouteStep>,
    /// Transfer node used to change floors, if any.
    pub transfer: Option<NodeId>,
    pub span: RouteSpan,
    /// Summed edge cost of the returned steps, in metres.
    pub cost: f64,
}

impl FloorRoute {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
        self.steps.iter().map(|step| &step.id)
    }
}

/// Floor-aware router over a borrowed graph.
pub struct FloorRouter<'a> {
    graph: &'a WaypointGraph,
    model: &'a dyn CostModel,
    limits: SearchLimits,
}

struct Candidate {
    transfer: NodeId,
    to_transfer: Vec<NodeId>,
    from_transfer: Vec<NodeId>,
    cost: f64,
}

impl<'a> FloorRouter<'a> {
    pub fn new(graph: &'a WaypointGraph, model: &'a dyn CostModel, limits: SearchLimits) -> Self {
        Self {
            graph,
            model,
            limits,
        }
    }

    pub fn graph(&self) -> &'a WaypointGraph {
        self.graph
    }

    /// Route from `start` to `goal`.
    ///
    /// `building` only labels errors; `transfers` lists the candidate
    /// transfer nodes. When `floor_hint` names the start or goal floor of a
    /// cross-floor route, only that floor's leg is returned.
    pub fn route(
        &self,
        start: &str,
        goal: &str,
        building: &str,
        transfers: &[NodeId],
        floor_hint: Option<&Floor>,
    ) -> Result<FloorRoute> {
        let start_floor = self.graph.require(start)?.floor.clone();
        let goal_floor = self.graph.require(goal)?.floor.clone();

        if start_floor == goal_floor {
            return self.same_floor(start, goal);
        }

        if transfers.is_empty() {
            return Err(Error::NoTransferConfigured {
                building: building.to_string(),
            });
        }

        let mut best: Option<Candidate> = None;
        for transfer in transfers {
            self.graph.require(transfer.as_str())?;

            let to_transfer = self.search(start, transfer.as_str())?;
            if to_transfer.is_empty() {
                tracing::debug!(start, transfer = %transfer, "transfer unreachable from start");
                continue;
            }
            let from_transfer = self.search(transfer.as_str(), goal)?;
            if from_transfer.is_empty() {
                tracing::debug!(goal, transfer = %transfer, "goal unreachable from transfer");
                continue;
            }

            let cost = path_cost(self.graph, self.model, &to_transfer)
                + path_cost(self.graph, self.model, &from_transfer);
            if best.as_ref().is_none_or(|current| cost < current.cost) {
                best = Some(Candidate {
                    transfer: transfer.clone(),
                    to_transfer,
                    from_transfer,
                    cost,
                });
            }
        }

        let Some(chosen) = best else {
            return Err(Error::NoPathFound {
                start: start.to_string(),
                goal: goal.to_string(),
            });
        };

        tracing::debug!(
            start,
            goal,
            transfer = %chosen.transfer,
            start_floor = %start_floor,
            goal_floor = %goal_floor,
            "composed cross-floor route"
        );

        let leg_one = self.tag_own_floor(&chosen.to_transfer);
        // The destination leg is labelled with the goal floor throughout,
        // including nodes that are stored on another floor.
        let leg_two: Vec<RouteStep> = chosen
            .from_transfer
            .iter()
            .map(|id| RouteStep {
                id: id.clone(),
                floor: goal_floor.clone(),
            })
            .collect();

        match floor_hint {
            Some(hint) if *hint == start_floor => Ok(FloorRoute {
                cost: path_cost(self.graph, self.model, &chosen.to_transfer),
                steps: leg_one,
                transfer: Some(chosen.transfer),
                span: RouteSpan::StartFloor,
            }),
            Some(hint) if *hint == goal_floor => Ok(FloorRoute {
                cost: path_cost(self.graph, self.model, &chosen.from_transfer),
                steps: leg_two,
                transfer: Some(chosen.transfer),
                span: RouteSpan::GoalFloor,
            }),
            _ => {
                // The transfer node closes leg one and opens leg two; keep it
                // once, as the head of leg two.
                let mut steps = leg_one;
                steps.pop();
                steps.extend(leg_two);
                Ok(FloorRoute {
                    steps,
                    transfer: Some(chosen.transfer),
                    span: RouteSpan::Full,
                    cost: chosen.cost,
                })
            }
        }
    }

    fn same_floor(&self, start: &str, goal: &str) -> Result<FloorRoute> {
        let path = self.search(start, goal)?;
        if path.is_empty() {
            return Err(Error::NoPathFound {
                start: start.to_string(),
                goal: goal.to_string(),
            });
        }
        Ok(FloorRoute {
            cost: path_cost(self.graph, self.model, &path),
            steps: self.tag_own_floor(&path),
            transfer: None,
            span: RouteSpan::Full,
        })
    }

    fn search(&self, start: &str, goal: &str) -> Result<Vec<NodeId>> {
        find_shortest_path(self.graph, self.model, start, goal, &self.limits)
    }

    fn tag_own_floor(&self, path: &[NodeId]) -> Vec<RouteStep> {
        path.iter()
            .filter_map(|id| {
                self.graph.node(id.as_str()).map(|node| RouteStep {
                    id: id.clone(),
                    floor: node.floor.clone(),
                })
            })
            .collect()
    }
}
