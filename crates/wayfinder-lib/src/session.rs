//! Per-user navigation state.
//!
//! A [`NavigationSession`] tracks whether a user is following a route. Each
//! client owns its own session; nothing here is shared or global.

use crate::error::{Error, Result};
use crate::routing::RoutePlan;

/// State of a navigation session.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Navigating {
        plan: RoutePlan,
    },
    Completed {
        plan: RoutePlan,
    },
    Cancelled,
    Failed {
        reason: String,
    },
}

impl SessionState {
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Navigating { .. } => "navigating",
            SessionState::Completed { .. } => "completed",
            SessionState::Cancelled => "cancelled",
            SessionState::Failed { .. } => "failed",
        }
    }
}

/// Explicit navigation state machine.
///
/// `Idle -> Navigating -> Completed | Cancelled | Failed`, and `reset` returns
/// any state to `Idle`. A plan can only be started from a state that is not
/// already navigating.
#[derive(Debug, Clone, Default)]
pub struct NavigationSession {
    state: SessionState,
}

impl NavigationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_navigating(&self) -> bool {
        matches!(self.state, SessionState::Navigating { .. })
    }

    /// Plan currently being followed.
    pub fn current_plan(&self) -> Option<&RoutePlan> {
        match &self.state {
            SessionState::Navigating { plan } => Some(plan),
            _ => None,
        }
    }

    pub fn begin(&mut self, plan: RoutePlan) -> Result<()> {
        if self.is_navigating() {
            return Err(self.invalid("begin"));
        }
        tracing::debug!(kind = %plan.kind, waypoints = plan.waypoints.len(), "navigation started");
        self.state = SessionState::Navigating { plan };
        Ok(())
    }

    /// Mark the destination as reached.
    pub fn complete(&mut self) -> Result<()> {
        match std::mem::take(&mut self.state) {
            SessionState::Navigating { plan } => {
                self.state = SessionState::Completed { plan };
                Ok(())
            }
            other => {
                self.state = other;
                Err(self.invalid("complete"))
            }
        }
    }

    pub fn cancel(&mut self) -> Result<()> {
        if !self.is_navigating() {
            return Err(self.invalid("cancel"));
        }
        self.state = SessionState::Cancelled;
        Ok(())
    }

    /// Abandon the current route because it can no longer be followed.
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<()> {
        if !self.is_navigating() {
            return Err(self.invalid("fail"));
        }
        let reason = reason.into();
        tracing::warn!(%reason, "navigation failed");
        self.state = SessionState::Failed { reason };
        Ok(())
    }

    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }

    fn invalid(&self, action: &'static str) -> Error {
        Error::InvalidTransition {
            from: self.state.label(),
            action,
        }
    }
}
