//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid load state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}
