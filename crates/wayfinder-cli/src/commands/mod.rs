// Module exports for CLI subcommands.
//
// Each module handles one subcommand; main.rs parses arguments and dispatches.

pub mod buildings;
pub mod emergency;
pub mod route;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use wayfinder_lib::{
    load_site, resolve_data_path, HeuristicUnits, IdScheme, LoadOptions, Navigator, RouteOptions,
    Site,
};

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteArgs<'a> {
    pub data_path: Option<&'a Path>,
    pub id_scheme: IdScheme,
    pub heuristic: HeuristicUnits,
}

/// Resolve the data location and load every building found there.
pub fn load(args: &SiteArgs<'_>) -> Result<Site> {
    let path = resolve_data_path(args.data_path)
        .context("failed to resolve the building data location")?;
    load_site(&path, &LoadOptions::with_id_scheme(args.id_scheme))
        .with_context(|| format!("failed to load building data from {}", path.display()))
}

pub fn navigator(args: &SiteArgs<'_>) -> Result<Navigator> {
    let site = load(args)?;
    let options = RouteOptions {
        heuristic: args.heuristic,
        ..RouteOptions::default()
    };
    Ok(Navigator::with_options(Arc::new(site), options))
}
