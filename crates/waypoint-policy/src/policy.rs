//! Navigation policy
//!
//! Decides allow/cancel for a requested URL. Evaluation is synchronous,
//! deterministic and reads nothing but its arguments.

use url::Url;

use crate::allow_list::{AllowList, MatchMode};
use crate::decision::PolicyDecision;
use crate::request::NavigationRequest;

/// Evaluate a URL against an allow-list with substring matching.
pub fn evaluate(url: Option<&Url>, allow_list: &AllowList) -> PolicyDecision {
    evaluate_with(url, allow_list, MatchMode::Substring)
}

fn evaluate_with(url: Option<&Url>, allow_list: &AllowList, mode: MatchMode) -> PolicyDecision {
    let Some(host) = url.and_then(Url::host_str).filter(|h| !h.is_empty()) else {
        return PolicyDecision::Cancel;
    };

    match allow_list.first_match_with(host, mode) {
        Some(entry) => {
            tracing::debug!(host = %host, entry = %entry, "Host matched allow-list");
            PolicyDecision::Allow
        }
        None => {
            tracing::debug!(host = %host, "Host not in allow-list");
            PolicyDecision::Cancel
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavigationPolicy {
    allow_list: AllowList,
    match_mode: MatchMode,
}

impl NavigationPolicy {
    pub fn new(allow_list: AllowList) -> Self {
        Self {
            allow_list,
            match_mode: MatchMode::Substring,
        }
    }

    pub fn with_match_mode(allow_list: AllowList, match_mode: MatchMode) -> Self {
        Self {
            allow_list,
            match_mode,
        }
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    pub fn evaluate(&self, url: Option<&Url>) -> PolicyDecision {
        evaluate_with(url, &self.allow_list, self.match_mode)
    }

    /// Decide a request from the loader, logging why it was cancelled.
    pub fn decide(&self, request: &NavigationRequest) -> PolicyDecision {
        if let Err(e) = request.host() {
            tracing::debug!(request_id = %request.id, error = %e, "Navigation cancelled");
            return PolicyDecision::Cancel;
        }

        let decision = self.evaluate(request.url.as_ref());
        tracing::debug!(
            request_id = %request.id,
            url = %request.raw,
            decision = %decision,
            "Navigation evaluated"
        );
        decision
    }
}
