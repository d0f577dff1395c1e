//! Page Load State Machine
//!
//! ```text
//! Idle ──allow──▶ Loading ──finish──▶ Finished
//!   │                │                   │
//!   └──cancel──▶ Cancelled ◀──cancel─────┘
//! ```
//! A finished or cancelled page goes back to Loading on the next allowed
//! navigation.

use serde::{Deserialize, Serialize};

use crate::error::NavigationError;
use crate::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// An allowed navigation is in flight
    Loading,
    /// The loader reported completion
    Finished,
    /// The last navigation was blocked by the policy
    Cancelled,
}

impl LoadState {
    pub fn can_transition_to(&self, target: LoadState) -> bool {
        match (self, target) {
            (LoadState::Idle, LoadState::Loading) => true,
            (LoadState::Finished, LoadState::Loading) => true,
            (LoadState::Cancelled, LoadState::Loading) => true,
            (LoadState::Loading, LoadState::Finished) => true,
            (LoadState::Idle, LoadState::Cancelled) => true,
            (LoadState::Loading, LoadState::Cancelled) => true,
            (LoadState::Finished, LoadState::Cancelled) => true,
            (a, b) if *a == b => true,
            _ => false,
        }
    }

    /// Transition in place, rejecting moves the machine does not allow.
    pub fn transition_to(&mut self, target: LoadState) -> Result<()> {
        if !self.can_transition_to(target) {
            return Err(NavigationError::InvalidTransition {
                from: self.to_string(),
                to: target.to_string(),
            });
        }

        tracing::debug!(from = %self, to = %target, "Load state transition");
        *self = target;
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Finished => "finished",
            LoadState::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LoadState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(LoadState::Idle),
            "loading" => Ok(LoadState::Loading),
            "finished" => Ok(LoadState::Finished),
            "cancelled" => Ok(LoadState::Cancelled),
            _ => Err(format!("Unknown load state: {}", s)),
        }
    }
}
