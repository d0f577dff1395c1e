//! Waypoint Navigation Policy
//!
//! Every navigation the page loader wants to perform is checked against a
//! fixed allow-list of trusted domains:
//! - URL without a host → cancel
//! - Host containing an allow-list entry → allow (first match wins)
//! - Anything else → cancel
//!
//! The decision is handed back through a single-use [`DecisionHandler`].

mod allow_list;
mod decision;
mod error;
mod policy;
mod request;

pub use allow_list::{AllowList, MatchMode};
pub use decision::{DecisionHandler, PolicyDecision};
pub use error::PolicyError;
pub use policy::{evaluate, NavigationPolicy};
pub use request::NavigationRequest;

pub type Result<T> = std::result::Result<T, PolicyError>;
