//! Load progress
//!
//! The loader reports an estimated progress in `[0.0, 1.0]`. Values are
//! passed through as-is: no clamping, smoothing or debouncing.

use serde::{Deserialize, Serialize};

/// Progress in the unit a progress bar expects
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct DisplayFraction(f32);

impl DisplayFraction {
    pub fn value(&self) -> f32 {
        self.0
    }

    pub fn as_percent(&self) -> f32 {
        self.0 * 100.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProgressObserver {
    current: f64,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_progress_changed(&mut self, new_value: f64) -> DisplayFraction {
        if !(0.0..=1.0).contains(&new_value) {
            tracing::trace!(value = new_value, "Progress outside [0, 1], passing through");
        }

        self.current = new_value;
        DisplayFraction(new_value as f32)
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn reset(&mut self) -> DisplayFraction {
        self.current = 0.0;
        DisplayFraction(0.0)
    }
}
