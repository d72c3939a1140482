#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use wayfinder_lib::{load_site, IdScheme, LoadOptions, Navigator, Site};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/buildings")
}

pub fn main_block_path() -> PathBuf {
    fixtures_dir().join("main-block.json")
}

/// Every fixture building, prefixed ids.
pub fn campus() -> Site {
    load_site(&fixtures_dir(), &LoadOptions::default()).expect("fixture buildings load")
}

/// The main block alone with raw ids such as `"5"`.
pub fn main_block_flat() -> Site {
    load_site(
        &main_block_path(),
        &LoadOptions::with_id_scheme(IdScheme::Flat),
    )
    .expect("main block loads")
}

pub fn navigator(site: Site) -> Navigator {
    Navigator::new(Arc::new(site))
}
