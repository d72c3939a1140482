use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/buildings")
        .canonicalize()
        .expect("fixture buildings present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("wayfinder-cli");
    cmd.env("RUST_LOG", "error").env_remove("WAYFINDER_DATA_PATH");
    cmd
}

/// Command over the main block alone with raw ids.
fn main_block() -> Command {
    let mut cmd = cli();
    cmd.arg("--data-path")
        .arg(fixtures_dir().join("main-block.json"))
        .arg("--id-scheme")
        .arg("flat");
    cmd
}

/// Command over every fixture building with prefixed ids.
fn campus() -> Command {
    let mut cmd = cli();
    cmd.arg("--data-path").arg(fixtures_dir());
    cmd
}

fn json_ids(stdout: &[u8]) -> Vec<String> {
    let value: serde_json::Value = serde_json::from_slice(stdout).expect("valid JSON");
    value["waypoints"]
        .as_array()
        .expect("waypoints array")
        .iter()
        .map(|w| w["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn route_prints_numbered_waypoints() {
    main_block()
        .args(["route", "--from", "5", "--to", "26"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Route from Main Door to Wing Commander (2 hops",
        ))
        .stdout(predicate::str::contains("  1. Main Door [floor G]"));
}

#[test]
fn compact_format_joins_names() {
    main_block()
        .args(["--format", "compact", "route", "--from", "5", "--to", "26"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Main Door -> "))
        .stdout(predicate::str::ends_with("Wing Commander\n"));
}

#[test]
fn json_format_lists_waypoint_ids() {
    let output = main_block()
        .args(["--format", "json", "route", "--from", "5", "--to", "26"])
        .output()
        .expect("command runs");

    assert!(output.status.success());
    assert_eq!(json_ids(&output.stdout), vec!["5", "7", "26"]);
}

#[test]
fn cross_floor_route_marks_the_lift() {
    main_block()
        .args(["route", "--from", "24", "--to", "32"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(11 hops"))
        .stdout(predicate::str::contains("(change floors)"))
        .stdout(predicate::str::contains("Makers Lab 005 [floor 1]"));
}

#[test]
fn floor_flag_limits_output_to_one_leg() {
    let output = main_block()
        .args([
            "--format", "json", "route", "--from", "24", "--to", "32", "--floor", "1",
        ])
        .output()
        .expect("command runs");

    assert!(output.status.success());
    let ids = json_ids(&output.stdout);
    assert_eq!(ids.first().map(String::as_str), Some("36"));
    assert_eq!(ids.last().map(String::as_str), Some("32"));
    assert_eq!(ids.len(), 7);
}

#[test]
fn emergency_routes_to_nearest_exit() {
    campus()
        .args(["emergency", "--from", "annex-g2"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Emergency route from annex-g2 to West Door",
        ))
        .stdout(predicate::str::contains("West Door [floor G] (exit)"));
}

#[test]
fn buildings_lists_every_fixture() {
    campus()
        .arg("buildings")
        .assert()
        .success()
        .stdout(predicate::str::contains("Annex (annex)"))
        .stdout(predicate::str::contains("Main Block (main)"))
        .stdout(predicate::str::contains("  exits: main-5\n"))
        .stdout(predicate::str::contains("  lifts: annex-lift-w, annex-lift-e\n"));
}

#[test]
fn unknown_node_fails_with_message() {
    main_block()
        .args(["route", "--from", "5", "--to", "doesNotExist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("doesNotExist"));
}

#[test]
fn route_between_buildings_fails() {
    campus()
        .args(["route", "--from", "main-5", "--to", "annex-g3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("main-5"));
}

#[test]
fn missing_data_path_fails() {
    let temp = tempdir().expect("create temp dir");
    cli()
        .arg("--data-path")
        .arg(temp.path().join("nowhere"))
        .arg("buildings")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load building data"));
}

#[test]
fn invalid_id_scheme_is_rejected() {
    cli()
        .args(["--id-scheme", "nested", "buildings"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown id scheme"));
}
