//! Test utilities for handler testing.
//!
//! Provides an [`AppState`] loaded from the building fixtures under
//! `docs/fixtures/buildings`.

use std::path::PathBuf;
use std::sync::OnceLock;

use wayfinder_lib::{LoadOptions, RouteOptions};

use crate::state::AppState;

/// Directory holding the fixture building files.
pub const TEST_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/buildings"
);

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Shared state with both fixture buildings loaded using prefixed node ids.
///
/// # Panics
///
/// Panics if the fixtures cannot be loaded.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| {
            let path = fixture_dir();
            AppState::load(&path, &LoadOptions::default(), RouteOptions::default())
                .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", path, e))
        })
        .clone()
}

pub fn fixture_dir() -> PathBuf {
    PathBuf::from(TEST_FIXTURE_PATH)
}

/// Node ids present in the fixtures.
pub mod fixture_nodes {
    /// Main entrance of the main block, its only exit.
    pub const MAIN_ENTRANCE: &str = "main-5";
    pub const MAIN_26: &str = "main-26";
    pub const MAIN_24: &str = "main-24";
    /// First-floor node of the main block.
    pub const MAIN_UPSTAIRS: &str = "main-32";
    /// Lift of the main block.
    pub const MAIN_LIFT: &str = "main-36";
    pub const ANNEX_G2: &str = "annex-g2";
    pub const ANNEX_STUDIO: &str = "annex-m1";
}
