use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::distance::CostModel;
use crate::error::{Error, Result};
use crate::graph::{NodeId, WaypointGraph};

/// Bounds applied to a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of nodes the search may expand before giving up.
    pub max_expansions: Option<usize>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(max_expansions: usize) -> Self {
        Self {
            max_expansions: Some(max_expansions),
        }
    }
}

/// Run A* from `start` to `goal`.
///
/// Returns the node sequence from start to goal inclusive, a single-element
/// path when `start == goal`, or an empty vector when both nodes exist but
/// are not connected. Unknown ids are [`Error::NodeNotFound`].
///
/// Open-set ties are broken by lower heuristic, then by earlier insertion,
/// so repeated searches over the same graph return the same path.
pub fn find_shortest_path(
    graph: &WaypointGraph,
    model: &dyn CostModel,
    start: &str,
    goal: &str,
    limits: &SearchLimits,
) -> Result<Vec<NodeId>> {
    let start_id = graph
        .node_id(start)
        .cloned()
        .ok_or_else(|| Error::node_not_found(start))?;
    let goal_data = graph.require(goal)?;

    if start == goal {
        return Ok(vec![start_id]);
    }

    let start_data = graph.require(start)?;
    let mut g_score: HashMap<NodeId, f64> = HashMap::new();
    let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
    let mut closed: HashSet<NodeId> = HashSet::new();
    let mut queue = BinaryHeap::new();
    let mut sequence = 0u64;
    let mut expanded = 0usize;

    g_score.insert(start_id.clone(), 0.0);
    let start_estimate = model.heuristic(start_data, goal_data);
    queue.push(OpenEntry::new(start_id, 0.0, start_estimate, sequence));

    while let Some(entry) = queue.pop() {
        if closed.contains(&entry.node) {
            continue;
        }
        if entry.node.as_str() == goal {
            return Ok(reconstruct_path(&parents, entry.node));
        }

        if let Some(limit) = limits.max_expansions {
            if expanded >= limit {
                tracing::warn!(start, goal, limit, "search expansion limit reached");
                return Err(Error::SearchLimitExceeded { limit });
            }
        }
        expanded += 1;

        let Some(current) = graph.node(entry.node.as_str()) else {
            continue;
        };
        let current_score = entry.cost.0;

        for next in graph.neighbours(entry.node.as_str()) {
            if closed.contains(next) {
                continue;
            }
            let Some(next_data) = graph.node(next.as_str()) else {
                continue;
            };

            let tentative_g = current_score + model.edge_cost(current, next_data);
            if tentative_g < *g_score.get(next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next.clone(), tentative_g);
                parents.insert(next.clone(), entry.node.clone());
                let heuristic = model.heuristic(next_data, goal_data);
                sequence += 1;
                queue.push(OpenEntry::new(next.clone(), tentative_g, heuristic, sequence));
            }
        }

        closed.insert(entry.node);
    }

    tracing::debug!(start, goal, expanded, "no path between nodes");
    Ok(Vec::new())
}

/// Sum of edge costs along consecutive nodes of `path`.
pub fn path_cost(graph: &WaypointGraph, model: &dyn CostModel, path: &[NodeId]) -> f64 {
    path.windows(2)
        .filter_map(|pair| {
            let from = graph.node(pair[0].as_str())?;
            let to = graph.node(pair[1].as_str())?;
            Some(model.edge_cost(from, to))
        })
        .sum()
}

fn reconstruct_path(parents: &HashMap<NodeId, NodeId>, goal: NodeId) -> Vec<NodeId> {
    let mut path = vec![goal];
    while let Some(parent) = path.last().and_then(|node| parents.get(node)) {
        path.push(parent.clone());
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct OpenEntry {
    node: NodeId,
    cost: FloatOrd,
    estimate: FloatOrd,
    heuristic: FloatOrd,
    sequence: u64,
}

impl OpenEntry {
    fn new(node: NodeId, cost: f64, heuristic: f64, sequence: u64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
            heuristic: FloatOrd(heuristic),
            sequence,
        }
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest estimate first.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.heuristic.cmp(&self.heuristic))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
