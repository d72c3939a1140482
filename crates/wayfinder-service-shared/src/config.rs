//! Environment-driven configuration for the HTTP services.
//!
//! # Environment Variables
//!
//! - `WAYFINDER_DATA_PATH`: building file or directory (default: platform data dir)
//! - `WAYFINDER_ID_SCHEME`: `prefixed` (default) or `flat`
//! - `WAYFINDER_HEURISTIC`: `degrees` (default) or `metres`
//! - `WAYFINDER_MAX_EXPANSIONS`: per-search node expansion limit (default: none)
//! - `SERVICE_PORT`: HTTP port (default: 8000)

use std::fmt;
use std::path::PathBuf;

use wayfinder_lib::{
    resolve_data_path, Error as LibError, HeuristicUnits, IdScheme, LoadOptions, RouteOptions,
    SearchLimits,
};

/// Port the services listen on when `SERVICE_PORT` is unset.
pub const DEFAULT_PORT: u16 = 8000;

/// Invalid configuration value.
#[derive(Debug)]
pub enum ConfigError {
    /// A variable was set to a value that could not be parsed.
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    /// No data path could be resolved.
    DataPath(LibError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid value '{}' for {}: {}", value, key, reason)
            }
            Self::DataPath(e) => write!(f, "failed to resolve building data path: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DataPath(e) => Some(e),
            _ => None,
        }
    }
}

/// Resolved service configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub data_path: PathBuf,
    pub port: u16,
    pub load: LoadOptions,
    pub route: RouteOptions,
}

impl ServiceConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_path = match get("WAYFINDER_DATA_PATH") {
            Some(path) => PathBuf::from(path),
            None => resolve_data_path(None).map_err(ConfigError::DataPath)?,
        };

        let port = match get("SERVICE_PORT") {
            Some(value) => parse_value("SERVICE_PORT", &value)?,
            None => DEFAULT_PORT,
        };

        let id_scheme: IdScheme = match get("WAYFINDER_ID_SCHEME") {
            Some(value) => parse_value("WAYFINDER_ID_SCHEME", &value)?,
            None => IdScheme::default(),
        };

        let heuristic: HeuristicUnits = match get("WAYFINDER_HEURISTIC") {
            Some(value) => parse_value("WAYFINDER_HEURISTIC", &value)?,
            None => HeuristicUnits::default(),
        };

        let limits = match get("WAYFINDER_MAX_EXPANSIONS") {
            Some(value) => {
                SearchLimits::with_max_expansions(parse_value("WAYFINDER_MAX_EXPANSIONS", &value)?)
            }
            None => SearchLimits::unlimited(),
        };

        Ok(Self {
            data_path,
            port,
            load: LoadOptions::with_id_scheme(id_scheme),
            route: RouteOptions { heuristic, limits },
        })
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply_when_only_data_path_is_set() {
        let cfg = config(&[("WAYFINDER_DATA_PATH", "/srv/buildings")]).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("/srv/buildings"));
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.load.id_scheme, IdScheme::Prefixed);
        assert_eq!(cfg.route.heuristic, HeuristicUnits::Degrees);
        assert_eq!(cfg.route.limits.max_expansions, None);
    }

    #[test]
    fn test_all_overrides_are_parsed() {
        let cfg = config(&[
            ("WAYFINDER_DATA_PATH", "/data/main.json"),
            ("SERVICE_PORT", "9100"),
            ("WAYFINDER_ID_SCHEME", "flat"),
            ("WAYFINDER_HEURISTIC", "metres"),
            ("WAYFINDER_MAX_EXPANSIONS", "5000"),
        ])
        .unwrap();
        assert_eq!(cfg.port, 9100);
        assert_eq!(cfg.load.id_scheme, IdScheme::Flat);
        assert_eq!(cfg.route.heuristic, HeuristicUnits::Metres);
        assert_eq!(cfg.route.limits.max_expansions, Some(5000));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config(&[("WAYFINDER_DATA_PATH", "/x"), ("SERVICE_PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("SERVICE_PORT"));
        assert!(err.to_string().contains("eighty"));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let cfg = config(&[("WAYFINDER_DATA_PATH", "/x"), ("SERVICE_PORT", "  ")]).unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
    }
}
