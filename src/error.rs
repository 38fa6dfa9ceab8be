//! Error types for the progression core

use thiserror::Error;

/// Error raised by the pure progression and projection functions.
///
/// There is a single kind: a numeric input outside its stated domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProgressError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ProgressError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ProgressError::InvalidArgument(msg.into())
    }
}

/// Result alias used across the core
pub type Result<T> = std::result::Result<T, ProgressError>;
