//! Seams to the host environment
//!
//! The page loader calls into the shell through [`NavigationDelegate`]; the
//! shell drives the loader and the display surface through [`PageLoader`]
//! and [`Presenter`].

use url::Url;
use waypoint_navigation::DisplayFraction;
use waypoint_policy::{DecisionHandler, NavigationRequest};

/// Events delivered by the page loader.
pub trait NavigationDelegate: Send + Sync {
    /// A navigation wants to proceed. `decision_handler` must be resolved
    /// exactly once.
    fn on_navigation_requested(
        &self,
        request: NavigationRequest,
        decision_handler: DecisionHandler,
    );

    /// A new page load began.
    fn on_load_started(&self);

    /// Estimated progress changed, nominally in `[0.0, 1.0]`.
    fn on_progress_changed(&self, new_value: f64);

    /// The page finished loading.
    fn on_load_finished(&self, title: &str);
}

/// Commands sent to the page loader.
pub trait PageLoader: Send + Sync {
    fn load(&self, url: &Url);

    fn reload(&self);

    fn go_back(&self);

    fn go_forward(&self);

    fn set_back_forward_gestures(&self, _enabled: bool) {}
}

/// Display surface for the chooser, progress bar and title.
pub trait Presenter: Send + Sync {
    fn present_choices(&self, title: &str, choices: &[String]);

    fn update_progress(&self, fraction: DisplayFraction);

    fn update_title(&self, title: &str);
}
