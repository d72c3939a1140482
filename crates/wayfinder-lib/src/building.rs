//! Building definitions and the site they are assembled into.
//!
//! A [`BuildingData`] is the on-disk description of one building: its nodes,
//! the connections between them, points of interest, and the exit and
//! transfer node lists. [`Site::from_buildings`] merges any number of them
//! into a single [`WaypointGraph`] plus one [`BuildingProfile`] per building.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::graph::{Floor, NodeData, NodeId, Position, WaypointGraph};

/// Node identifier as written in building files; numbers are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RawId(String);

impl RawId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RawId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for RawId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Label {
            Text(String),
            Integer(i64),
        }

        Ok(match Label::deserialize(deserializer)? {
            Label::Text(id) => RawId(id),
            Label::Integer(id) => RawId(id.to_string()),
        })
    }
}

/// Node entry inside a building file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    pub floor: Floor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Point of interest attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoiRecord {
    pub id: RawId,
    pub name: String,
    /// Node the POI sits on; defaults to `id`.
    #[serde(default, alias = "nodeId", skip_serializing_if = "Option::is_none")]
    pub node: Option<RawId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// One building as described on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingData {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub floors: Vec<Floor>,
    pub nodes: BTreeMap<String, NodeRecord>,
    #[serde(default)]
    pub connections: Vec<(RawId, RawId)>,
    #[serde(default)]
    pub pois: Vec<PoiRecord>,
    #[serde(default)]
    pub exits: Vec<RawId>,
    #[serde(default, alias = "lifts")]
    pub transfers: Vec<RawId>,
}

/// How raw node ids are mapped into the shared graph namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    /// `"<building>-<raw id>"`, keeping buildings apart.
    #[default]
    Prefixed,
    /// Raw ids as written; suited to single-building data.
    Flat,
}

impl IdScheme {
    pub fn node_id(self, building: &str, raw: &str) -> NodeId {
        match self {
            IdScheme::Prefixed => NodeId::new(format!("{building}-{raw}")),
            IdScheme::Flat => NodeId::from(raw),
        }
    }
}

impl fmt::Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IdScheme::Prefixed => "prefixed",
            IdScheme::Flat => "flat",
        })
    }
}

impl FromStr for IdScheme {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "prefixed" => Ok(IdScheme::Prefixed),
            "flat" => Ok(IdScheme::Flat),
            other => Err(format!("unknown id scheme '{other}'")),
        }
    }
}

/// Options applied while assembling a site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub id_scheme: IdScheme,
}

impl LoadOptions {
    pub fn with_id_scheme(id_scheme: IdScheme) -> Self {
        Self { id_scheme }
    }
}

/// Point of interest with its node id resolved into the graph namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Poi {
    pub id: NodeId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Per-building routing configuration, ids already namespaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildingProfile {
    pub id: String,
    pub name: String,
    pub floors: Vec<Floor>,
    pub pois: Vec<Poi>,
    pub exits: Vec<NodeId>,
    pub transfers: Vec<NodeId>,
}

impl BuildingProfile {
    /// Profile with no POIs, exits or transfers.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            floors: Vec::new(),
            pois: Vec::new(),
            exits: Vec::new(),
            transfers: Vec::new(),
        }
    }

    pub fn with_exits<I, T>(mut self, exits: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        self.exits = exits.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_transfers<I, T>(mut self, transfers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        self.transfers = transfers.into_iter().map(Into::into).collect();
        self
    }
}

/// Every loaded building: one graph and the matching profiles.
///
/// Built once and then only read.
#[derive(Debug, Clone, Default)]
pub struct Site {
    graph: WaypointGraph,
    buildings: Vec<BuildingProfile>,
}

impl Site {
    /// Wrap an already-built graph. Node `building` fields should name one of
    /// `buildings`.
    pub fn new(graph: WaypointGraph, buildings: Vec<BuildingProfile>) -> Self {
        Self { graph, buildings }
    }

    /// Assemble a site from building definitions, in order.
    pub fn from_buildings(buildings: Vec<BuildingData>, options: &LoadOptions) -> Result<Self> {
        let mut site = Site::default();
        let mut seen = HashSet::new();
        for building in buildings {
            if !seen.insert(building.id.clone()) {
                return Err(Error::DuplicateBuilding { id: building.id });
            }
            site.add_building(building, options.id_scheme)?;
        }
        Ok(site)
    }

    pub fn graph(&self) -> &WaypointGraph {
        &self.graph
    }

    pub fn buildings(&self) -> &[BuildingProfile] {
        &self.buildings
    }

    pub fn building(&self, id: &str) -> Option<&BuildingProfile> {
        self.buildings.iter().find(|building| building.id == id)
    }

    /// Profile governing routes that start at `node`.
    ///
    /// Nodes without a building fall back to the only building of a
    /// single-building site.
    pub fn profile_for(&self, node: &NodeData) -> Result<&BuildingProfile> {
        match node.building.as_deref() {
            Some(id) => self
                .building(id)
                .ok_or_else(|| Error::UnknownBuilding { id: id.to_string() }),
            None => match self.buildings.as_slice() {
                [only] => Ok(only),
                _ => Err(Error::UnknownBuilding {
                    id: "<unassigned>".to_string(),
                }),
            },
        }
    }

    /// Resolve a node id given relative to `building`.
    ///
    /// Accepts either a full graph id belonging to the building or a raw id
    /// that becomes `"<building>-<raw>"` under the prefixed scheme.
    pub fn resolve_node(&self, building: &str, id: &str) -> Result<NodeId> {
        if self.building(building).is_none() {
            return Err(Error::UnknownBuilding {
                id: building.to_string(),
            });
        }

        let belongs = |candidate: &str| {
            self.graph
                .node(candidate)
                .is_some_and(|node| node.building.as_deref() == Some(building))
        };

        if belongs(id) {
            return Ok(NodeId::from(id));
        }
        let prefixed = IdScheme::Prefixed.node_id(building, id);
        if belongs(prefixed.as_str()) {
            return Ok(prefixed);
        }
        Err(Error::NodeNotFound { id: id.to_string() })
    }

    fn add_building(&mut self, data: BuildingData, scheme: IdScheme) -> Result<()> {
        let building_id = data.id;
        let ns = |raw: &str| scheme.node_id(&building_id, raw);

        let poi_names: HashMap<&str, &str> = data
            .pois
            .iter()
            .map(|poi| {
                let node = poi.node.as_ref().unwrap_or(&poi.id);
                (node.as_str(), poi.name.as_str())
            })
            .collect();

        for (raw, record) in &data.nodes {
            let position = match (record.x, record.y) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(Position { x, y }),
                _ => {
                    warn!(building = %building_id, node = %raw, "node has no usable coordinates");
                    None
                }
            };
            let name = record
                .name
                .clone()
                .or_else(|| poi_names.get(raw.as_str()).map(|name| name.to_string()));

            self.graph.add_node(
                ns(raw),
                NodeData {
                    position,
                    floor: record.floor.clone(),
                    name,
                    building: Some(building_id.clone()),
                },
            );
        }

        for (a, b) in &data.connections {
            for endpoint in [a, b] {
                if !data.nodes.contains_key(endpoint.as_str()) {
                    return Err(Error::InvalidBuildingData {
                        building: building_id.clone(),
                        message: format!("connection references undeclared node {}", endpoint.as_str()),
                    });
                }
            }
            self.graph
                .add_edge(ns(a.as_str()).as_str(), ns(b.as_str()).as_str())?;
        }

        let exits = self.known_ids(&building_id, "exit", &data.exits, &ns);
        let transfers = self.known_ids(&building_id, "transfer", &data.transfers, &ns);
        let pois = data
            .pois
            .into_iter()
            .map(|poi| Poi {
                id: ns(poi.node.as_ref().unwrap_or(&poi.id).as_str()),
                name: poi.name,
                icon: poi.icon,
                status: poi.status,
                color: poi.color,
            })
            .collect();

        info!(
            building = %building_id,
            nodes = data.nodes.len(),
            connections = data.connections.len(),
            exits = exits.len(),
            transfers = transfers.len(),
            "loaded building"
        );

        self.buildings.push(BuildingProfile {
            name: data.name.unwrap_or_else(|| building_id.clone()),
            id: building_id,
            floors: data.floors,
            pois,
            exits,
            transfers,
        });
        Ok(())
    }

    /// Namespace `raw` ids, warning about any that are not in the graph.
    ///
    /// Unknown ids are kept; they surface as `NodeNotFound` when routed to.
    fn known_ids(
        &self,
        building: &str,
        role: &str,
        raw: &[RawId],
        ns: &dyn Fn(&str) -> NodeId,
    ) -> Vec<NodeId> {
        raw.iter()
            .map(|id| {
                let node = ns(id.as_str());
                if !self.graph.contains(node.as_str()) {
                    warn!(building, role, node = %node, "configured node is not in the graph");
                } else {
                    debug!(building, role, node = %node, "registered node");
                }
                node
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOBBY: &str = r#"{
        "id": "lobby",
        "name": "Lobby Block",
        "floors": ["G", 1],
        "nodes": {
            "1": {"x": 0.0, "y": 0.0, "floor": "G", "name": "Front Door"},
            "2": {"x": 1.0, "y": 0.0, "floor": "G"},
            "3": {"x": 1.0, "y": 1.0, "floor": 1},
            "4": {"floor": "G"}
        },
        "connections": [["1", "2"], [2, 3]],
        "pois": [{"id": "2", "name": "Reception", "icon": "desk"}],
        "exits": ["1"],
        "lifts": ["2", "99"]
    }"#;

    fn lobby() -> BuildingData {
        serde_json::from_str(LOBBY).unwrap()
    }

    #[test]
    fn prefixed_scheme_namespaces_every_id() {
        let site = Site::from_buildings(vec![lobby()], &LoadOptions::default()).unwrap();
        let graph = site.graph();

        assert!(graph.contains("lobby-1"));
        assert!(!graph.contains("1"));
        assert!(graph.is_adjacent("lobby-2", "lobby-3"));

        let profile = site.building("lobby").unwrap();
        assert_eq!(profile.name, "Lobby Block");
        assert_eq!(profile.exits, vec![NodeId::from("lobby-1")]);
        assert_eq!(profile.pois[0].id, NodeId::from("lobby-2"));
        assert_eq!(profile.floors, vec![Floor::from("G"), Floor::from("1")]);
    }

    #[test]
    fn flat_scheme_keeps_raw_ids() {
        let options = LoadOptions::with_id_scheme(IdScheme::Flat);
        let site = Site::from_buildings(vec![lobby()], &options).unwrap();
        assert!(site.graph().contains("3"));
        assert_eq!(site.graph().node("3").unwrap().floor.as_str(), "1");
    }

    #[test]
    fn lifts_alias_and_unknown_transfer_are_kept() {
        let site = Site::from_buildings(vec![lobby()], &LoadOptions::default()).unwrap();
        let profile = site.building("lobby").unwrap();
        assert_eq!(
            profile.transfers,
            vec![NodeId::from("lobby-2"), NodeId::from("lobby-99")]
        );
    }

    #[test]
    fn names_fall_back_to_poi_then_none() {
        let site = Site::from_buildings(vec![lobby()], &LoadOptions::default()).unwrap();
        let graph = site.graph();
        assert_eq!(graph.node("lobby-1").unwrap().name.as_deref(), Some("Front Door"));
        assert_eq!(graph.node("lobby-2").unwrap().name.as_deref(), Some("Reception"));
        assert_eq!(graph.node("lobby-3").unwrap().name, None);
    }

    #[test]
    fn missing_coordinates_leave_node_unplaced() {
        let site = Site::from_buildings(vec![lobby()], &LoadOptions::default()).unwrap();
        assert!(site.graph().node("lobby-4").unwrap().position.is_none());
    }

    #[test]
    fn connection_to_undeclared_node_is_invalid() {
        let mut data = lobby();
        data.connections.push((RawId::from("1"), RawId::from("404")));
        let err = Site::from_buildings(vec![data], &LoadOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidBuildingData { building, message }
                if building == "lobby" && message.contains("404")
        ));
    }

    #[test]
    fn duplicate_building_ids_are_rejected() {
        let err = Site::from_buildings(vec![lobby(), lobby()], &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateBuilding { id } if id == "lobby"));
    }

    #[test]
    fn profile_resolution_uses_node_building() {
        let site = Site::from_buildings(vec![lobby()], &LoadOptions::default()).unwrap();
        let node = site.graph().node("lobby-1").unwrap();
        assert_eq!(site.profile_for(node).unwrap().id, "lobby");

        let orphan = NodeData::new(0.0, 0.0, "G");
        assert_eq!(site.profile_for(&orphan).unwrap().id, "lobby");

        let stray = NodeData::new(0.0, 0.0, "G").with_building("elsewhere");
        assert!(matches!(
            site.profile_for(&stray),
            Err(Error::UnknownBuilding { id }) if id == "elsewhere"
        ));
    }

    #[test]
    fn resolve_node_accepts_raw_and_full_ids() {
        let site = Site::from_buildings(vec![lobby()], &LoadOptions::default()).unwrap();
        assert_eq!(site.resolve_node("lobby", "3").unwrap(), NodeId::from("lobby-3"));
        assert_eq!(site.resolve_node("lobby", "lobby-3").unwrap(), NodeId::from("lobby-3"));
        assert!(matches!(
            site.resolve_node("lobby", "42"),
            Err(Error::NodeNotFound { id }) if id == "42"
        ));
        assert!(matches!(
            site.resolve_node("attic", "1"),
            Err(Error::UnknownBuilding { .. })
        ));

        let flat = LoadOptions::with_id_scheme(IdScheme::Flat);
        let site = Site::from_buildings(vec![lobby()], &flat).unwrap();
        assert_eq!(site.resolve_node("lobby", "3").unwrap(), NodeId::from("3"));
    }

    #[test]
    fn id_scheme_parses_case_insensitively() {
        assert_eq!("FLAT".parse::<IdScheme>(), Ok(IdScheme::Flat));
        assert_eq!("prefixed".parse::<IdScheme>(), Ok(IdScheme::Prefixed));
        assert!("nested".parse::<IdScheme>().is_err());
    }
}
