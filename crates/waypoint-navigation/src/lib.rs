//! Waypoint Navigation
//!
//! - Page selection: allow-list entries become `https://` load requests
//! - Page load state machine: Idle → Loading → {Finished, Cancelled}
//! - Progress: loader progress signal → display fraction

mod error;
mod load_state;
mod progress;
mod selector;

pub use error::NavigationError;
pub use load_state::LoadState;
pub use progress::{DisplayFraction, ProgressObserver};
pub use selector::PageSelector;

pub type Result<T> = std::result::Result<T, NavigationError>;
