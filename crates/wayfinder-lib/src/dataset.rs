use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, info};

use crate::building::{BuildingData, LoadOptions, Site};
use crate::error::{Error, Result};

/// Environment variable overriding the building data location.
pub const DATA_PATH_ENV: &str = "WAYFINDER_DATA_PATH";

/// Directory name used under the platform data directory.
const BUILDINGS_DIR: &str = "buildings";

/// Resolve the default building data directory using platform-specific project directories.
pub fn default_data_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("org", "wayfinder", "wayfinder")
        .ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(BUILDINGS_DIR))
}

/// Decide where building data is read from.
///
/// Resolution order:
/// 1. Explicit `target` argument when provided.
/// 2. `WAYFINDER_DATA_PATH` environment variable.
/// 3. Platform-specific project data directory.
///
/// The returned path is not checked for existence.
pub fn resolve_data_path(target: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = target {
        return Ok(explicit.to_path_buf());
    }

    if let Some(env_path) = env::var_os(DATA_PATH_ENV) {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }

    default_data_path()
}

/// Parse one building definition file.
pub fn load_building_file(path: &Path) -> Result<BuildingData> {
    let contents = fs::read_to_string(path)?;
    let building: BuildingData = serde_json::from_str(&contents)?;
    debug!(path = %path.display(), building = %building.id, "parsed building file");
    Ok(building)
}

/// Load a site from a single building file or a directory of them.
///
/// Directories contribute every `*.json` file they directly contain, in file
/// name order.
pub fn load_site(path: &Path, options: &LoadOptions) -> Result<Site> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    let files = if path.is_dir() {
        building_files(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let buildings = files
        .iter()
        .map(|file| load_building_file(file))
        .collect::<Result<Vec<_>>>()?;

    let site = Site::from_buildings(buildings, options)?;
    info!(
        path = %path.display(),
        buildings = site.buildings().len(),
        nodes = site.graph().node_count(),
        edges = site.graph().edge_count(),
        id_scheme = %options.id_scheme,
        "building data loaded"
    );
    Ok(site)
}

fn building_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if path.is_file() && is_json {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
