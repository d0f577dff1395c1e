//! Waypoint Core
//!
//! Toolkit-independent core of a single-screen browser shell that only
//! visits allow-listed sites. The host's web view reports navigation,
//! progress and completion through [`NavigationDelegate`]; the [`Shell`]
//! answers and pushes display updates through [`Presenter`].

mod config;
mod delegate;
mod error;
mod shell;

pub use config::Config;
pub use delegate::{NavigationDelegate, PageLoader, Presenter};
pub use error::CoreError;
pub use shell::{PageLoad, Shell};

// Re-export core components
pub use waypoint_navigation::{
    DisplayFraction, LoadState, NavigationError, PageSelector, ProgressObserver,
};
pub use waypoint_policy::{
    evaluate, AllowList, DecisionHandler, MatchMode, NavigationPolicy, NavigationRequest,
    PolicyDecision, PolicyError,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
