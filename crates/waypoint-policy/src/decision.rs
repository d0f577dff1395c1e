//! Policy decisions and the single-use decision callback

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyDecision {
    /// Let the navigation proceed
    Allow,
    /// Block the navigation
    Cancel,
}

impl PolicyDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, PolicyDecision::Allow)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyDecision::Allow => "allow",
            PolicyDecision::Cancel => "cancel",
        }
    }
}

impl std::fmt::Display for PolicyDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

type Callback = Box<dyn FnOnce(PolicyDecision) + Send + 'static>;

/// Callback the page loader hands over with each navigation request.
///
/// It runs exactly once: [`DecisionHandler::decide`] consumes the handler,
/// and a handler dropped without a decision reports `Cancel`.
pub struct DecisionHandler {
    callback: Option<Callback>,
}

impl DecisionHandler {
    pub fn new<F>(callback: F) -> Self
    where
        F: FnOnce(PolicyDecision) + Send + 'static,
    {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// Report the decision back to the loader.
    pub fn decide(mut self, decision: PolicyDecision) {
        if let Some(callback) = self.callback.take() {
            callback(decision);
        }
    }
}

impl Drop for DecisionHandler {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            tracing::warn!("Decision handler dropped without a decision, cancelling");
            callback(PolicyDecision::Cancel);
        }
    }
}

impl std::fmt::Debug for DecisionHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionHandler")
            .field("pending", &self.callback.is_some())
            .finish()
    }
}
