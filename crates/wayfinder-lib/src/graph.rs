use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Identifier of a node within the graph namespace.
///
/// Under the prefixed id scheme this is `"<building>-<raw id>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Floor label such as `"G"`, `"1"` or `"B2"`.
///
/// Labels are compared as strings and carry no ordering. Numeric labels in
/// source data are coerced to their decimal form, so `1` and `"1"` name the
/// same floor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Floor(String);

impl Floor {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Floor {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for Floor {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawFloor {
            Text(String),
            Integer(i64),
            Real(f64),
        }

        Ok(match RawFloor::deserialize(deserializer)? {
            RawFloor::Text(label) => Floor(label),
            RawFloor::Integer(level) => Floor(level.to_string()),
            RawFloor::Real(level) => Floor(level.to_string()),
        })
    }
}

/// Planar position in coordinate degrees (`x` longitude-like, `y` latitude-like).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Euclidean distance in coordinate degrees.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Data carried by each node in the waypoint graph.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// `None` when the source data lacked a usable coordinate.
    pub position: Option<Position>,
    pub floor: Floor,
    pub name: Option<String>,
    pub building: Option<String>,
}

impl NodeData {
    pub fn new(x: f64, y: f64, floor: impl Into<Floor>) -> Self {
        Self {
            position: Some(Position { x, y }),
            floor: floor.into(),
            name: None,
            building: None,
        }
    }

    /// A node on `floor` whose coordinates are unknown.
    pub fn unplaced(floor: impl Into<Floor>) -> Self {
        Self {
            position: None,
            floor: floor.into(),
            name: None,
            building: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_building(mut self, building: impl Into<String>) -> Self {
        self.building = Some(building.into());
        self
    }
}

/// Waypoint graph: nodes keyed by id plus a symmetric adjacency list.
///
/// Edges carry no weight; costs are derived from node positions at query
/// time. Neighbour lists keep insertion order so searches are reproducible.
#[derive(Debug, Clone, Default)]
pub struct WaypointGraph {
    nodes: HashMap<NodeId, NodeData>,
    adjacency: HashMap<NodeId, Vec<NodeId>>,
    edge_count: usize,
}

impl WaypointGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Re-adding an id replaces its data and keeps its edges.
    pub fn add_node(&mut self, id: impl Into<NodeId>, data: NodeData) {
        let id = id.into();
        self.adjacency.entry(id.clone()).or_default();
        self.nodes.insert(id, data);
    }

    /// Connect two existing nodes in both directions.
    ///
    /// Inserting an edge that already exists is a no-op, as is a self-loop.
    pub fn add_edge(&mut self, a: &str, b: &str) -> Result<()> {
        let a = self.known_id(a)?;
        let b = self.known_id(b)?;
        if a == b {
            return Ok(());
        }

        let forward = self.adjacency.entry(a.clone()).or_default();
        if forward.contains(&b) {
            return Ok(());
        }
        forward.push(b.clone());
        self.adjacency.entry(b).or_default().push(a);
        self.edge_count += 1;
        Ok(())
    }

    /// Look up a node's data. Absence is reported as `None`, never a panic.
    pub fn node(&self, id: &str) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Look up a node's data, treating absence as [`Error::NodeNotFound`].
    pub fn require(&self, id: &str) -> Result<&NodeData> {
        self.node(id).ok_or_else(|| Error::node_not_found(id))
    }

    /// Resolve `id` to the stored key.
    pub fn node_id(&self, id: &str) -> Option<&NodeId> {
        self.nodes.get_key_value(id).map(|(key, _)| key)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Return the neighbours of a node in insertion order.
    pub fn neighbours(&self, id: &str) -> &[NodeId] {
        self.adjacency
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `a` and `b` share a direct edge.
    pub fn is_adjacent(&self, a: &str, b: &str) -> bool {
        self.neighbours(a).iter().any(|n| n.as_str() == b)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, &NodeData)> {
        self.nodes.iter()
    }

    fn known_id(&self, id: &str) -> Result<NodeId> {
        self.node_id(id)
            .cloned()
            .ok_or_else(|| Error::node_not_found(id))
    }
}
