//! Policy error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    #[error("URL has no host: {0}")]
    NoHost(String),

    #[error("Allow-list must contain at least one entry")]
    EmptyAllowList,

    #[error("Allow-list entry {index} is empty")]
    EmptyEntry { index: usize },
}
