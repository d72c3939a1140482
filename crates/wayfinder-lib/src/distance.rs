//! Cost and heuristic functions used by the A* engine.
//!
//! Node positions are stored in coordinate degrees. Edge costs are scaled to
//! approximate metres; the default heuristic is left in degrees, which keeps
//! it admissible but makes it far weaker than the edge costs. That mismatch is
//! the long-standing routing behaviour and changing it can change which of two
//! near-equal routes is returned, so [`MetricCostModel`] is opt-in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::graph::NodeData;

/// Metres per coordinate degree at the equator.
pub const METERS_PER_DEGREE: f64 = 111_319.9;

/// Pair of functions consumed by the shortest-path engine.
pub trait CostModel: Send + Sync {
    /// Cost of walking directly from `from` to `to`.
    fn edge_cost(&self, from: &NodeData, to: &NodeData) -> f64;

    /// Estimated remaining cost from `from` to the goal `to`.
    fn heuristic(&self, from: &NodeData, to: &NodeData) -> f64;
}

/// Default model: metre edge costs, degree heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreeCostModel;

impl CostModel for DegreeCostModel {
    fn edge_cost(&self, from: &NodeData, to: &NodeData) -> f64 {
        degree_distance(from, to) * METERS_PER_DEGREE
    }

    fn heuristic(&self, from: &NodeData, to: &NodeData) -> f64 {
        degree_distance(from, to)
    }
}

/// Metre edge costs with a heuristic in the same unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricCostModel;

impl CostModel for MetricCostModel {
    fn edge_cost(&self, from: &NodeData, to: &NodeData) -> f64 {
        degree_distance(from, to) * METERS_PER_DEGREE
    }

    fn heuristic(&self, from: &NodeData, to: &NodeData) -> f64 {
        degree_distance(from, to) * METERS_PER_DEGREE
    }
}

/// Unit the search heuristic is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicUnits {
    #[default]
    Degrees,
    Metres,
}

impl HeuristicUnits {
    pub fn cost_model(self) -> &'static dyn CostModel {
        match self {
            HeuristicUnits::Degrees => &DegreeCostModel,
            HeuristicUnits::Metres => &MetricCostModel,
        }
    }
}

impl fmt::Display for HeuristicUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HeuristicUnits::Degrees => "degrees",
            HeuristicUnits::Metres => "metres",
        })
    }
}

impl FromStr for HeuristicUnits {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "degrees" | "degree" => Ok(HeuristicUnits::Degrees),
            "metres" | "meters" | "metre" | "meter" => Ok(HeuristicUnits::Metres),
            other => Err(format!("unknown heuristic unit '{other}'")),
        }
    }
}

/// Euclidean distance in degrees, or zero when either node has no position.
fn degree_distance(from: &NodeData, to: &NodeData) -> f64 {
    match (from.position, to.position) {
        (Some(a), Some(b)) => a.distance_to(&b),
        _ => {
            tracing::debug!(
                from_floor = %from.floor,
                to_floor = %to.floor,
                "node without coordinates; treating distance as zero"
            );
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_cost_scales_degrees_to_metres() {
        let a = NodeData::new(0.0, 0.0, "G");
        let b = NodeData::new(3.0, 4.0, "G");

        let cost = DegreeCostModel.edge_cost(&a, &b);
        assert!((cost - 5.0 * METERS_PER_DEGREE).abs() < 1e-6);
    }

    #[test]
    fn default_heuristic_stays_in_degrees() {
        let a = NodeData::new(0.0, 0.0, "G");
        let b = NodeData::new(3.0, 4.0, "G");

        assert!((DegreeCostModel.heuristic(&a, &b) - 5.0).abs() < 1e-12);
        assert!(
            (MetricCostModel.heuristic(&a, &b) - MetricCostModel.edge_cost(&a, &b)).abs() < 1e-6
        );
    }

    #[test]
    fn missing_position_costs_nothing() {
        let placed = NodeData::new(1.0, 1.0, "G");
        let unplaced = NodeData::unplaced("G");

        assert_eq!(DegreeCostModel.edge_cost(&placed, &unplaced), 0.0);
        assert_eq!(DegreeCostModel.heuristic(&unplaced, &placed), 0.0);
        assert_eq!(MetricCostModel.edge_cost(&unplaced, &unplaced), 0.0);
    }

    #[test]
    fn heuristic_units_parse_both_spellings() {
        assert_eq!("meters".parse::<HeuristicUnits>(), Ok(HeuristicUnits::Metres));
        assert_eq!("Metres".parse::<HeuristicUnits>(), Ok(HeuristicUnits::Metres));
        assert_eq!("degrees".parse::<HeuristicUnits>(), Ok(HeuristicUnits::Degrees));
        assert!("furlongs".parse::<HeuristicUnits>().is_err());
    }
}
