use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the Wayfinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A start, goal, transfer or exit id has no entry in the graph store.
    #[error("node not found: {id}")]
    NodeNotFound { id: String },

    /// Both endpoints exist but no walkable connection joins them.
    #[error("no path found between {start} and {goal}")]
    NoPathFound { start: String, goal: String },

    /// Emergency routing could not reach any configured exit.
    #[error("no exit reachable from {start}")]
    NoExitReachable { start: String },

    /// The building owning the start node lists no exits.
    #[error("no exits defined for building {building}")]
    NoExitsConfigured { building: String },

    /// A cross-floor route was requested in a building without transfer nodes.
    #[error("no transfer nodes defined for building {building}")]
    NoTransferConfigured { building: String },

    /// A building id could not be resolved.
    #[error("unknown building: {id}")]
    UnknownBuilding { id: String },

    /// A normal (non-emergency) route request omitted its destination.
    #[error("a destination is required for normal navigation")]
    MissingDestination,

    /// The A* search expanded more nodes than the configured limit.
    #[error("search aborted after expanding {limit} nodes")]
    SearchLimitExceeded { limit: usize },

    /// Building data could not be located at the resolved path.
    #[error("building data not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// A building definition is internally inconsistent.
    #[error("invalid building data for {building}: {message}")]
    InvalidBuildingData { building: String, message: String },

    /// Two building definitions share the same id.
    #[error("duplicate building id encountered: {id}")]
    DuplicateBuilding { id: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for building data")]
    ProjectDirsUnavailable,

    /// A navigation session was asked to perform an action its state forbids.
    #[error("cannot {action} a navigation session that is {from}")]
    InvalidTransition { from: &'static str, action: &'static str },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn node_not_found(id: impl Into<String>) -> Self {
        Error::NodeNotFound { id: id.into() }
    }

    /// Whether this error means "the request referenced valid data but no
    /// route exists", as opposed to bad input or broken configuration.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            Error::NoPathFound { .. } | Error::NoExitReachable { .. }
        )
    }
}
