mod common;

use std::fs;

use wayfinder_lib::{load_site, Error, IdScheme, LoadOptions};

use common::{campus, fixtures_dir, main_block_flat};

#[test]
fn fixture_directory_loads_both_buildings_in_name_order() {
    let site = campus();
    let ids: Vec<&str> = site.buildings().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["annex", "main"]);
    assert_eq!(site.graph().node_count(), 32 + 13);
}

#[test]
fn main_block_matches_fixture_shape() {
    let site = main_block_flat();
    let graph = site.graph();

    assert_eq!(graph.node_count(), 32);
    assert_eq!(graph.edge_count(), 33);
    assert_eq!(graph.node("32").unwrap().floor.as_str(), "1");
    assert_eq!(graph.node("10").unwrap().name.as_deref(), Some("Conference Room"));
    assert_eq!(graph.node("33").unwrap().name, None);

    let profile = site.building("main").unwrap();
    assert_eq!(profile.name, "Main Block");
    assert_eq!(profile.exits.len(), 1);
    assert_eq!(profile.transfers[0].as_str(), "36");
    assert_eq!(profile.pois.len(), 6);
}

#[test]
fn same_file_twice_is_a_duplicate_building() {
    let dir = tempfile::tempdir().unwrap();
    let contents = fs::read_to_string(fixtures_dir().join("annex.json")).unwrap();
    fs::write(dir.path().join("a.json"), &contents).unwrap();
    fs::write(dir.path().join("b.json"), &contents).unwrap();

    let err = load_site(dir.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, Error::DuplicateBuilding { id } if id == "annex"));
}

#[test]
fn connection_to_missing_node_rejects_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.json");
    fs::write(
        &file,
        r#"{"id": "shed", "nodes": {"1": {"x": 0, "y": 0, "floor": "G"}}, "connections": [[1, 2]]}"#,
    )
    .unwrap();

    let err = load_site(&file, &LoadOptions::with_id_scheme(IdScheme::Flat)).unwrap_err();
    assert!(matches!(err, Error::InvalidBuildingData { building, .. } if building == "shed"));
}
