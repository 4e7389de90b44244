//! Error types for the dispatch core
//!
//! Only caller-input errors surface here: a malformed registration or a
//! queue with no remaining capacity. An unknown identifier at retrieval time
//! is not an error (see [`crate::protocol::Retrieval`]), and a handler
//! failure is absorbed into a terminal result at the dispatch boundary.

use crate::config::ConfigError;
use crate::protocol::{Priority, Request};
use thiserror::Error;

/// Main error type for transactor operations
#[derive(Debug, Error)]
pub enum TransactorError {
    #[error("invalid request: {message}")]
    Validation { message: String },

    /// Every lane at or below the wanted level was at capacity. The request
    /// was not inserted anywhere and is handed back to the caller.
    #[error("queue exhausted: no capacity at or below {want}")]
    QueueExhausted { want: Priority, request: Request },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl TransactorError {
    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Result type for transactor operations
pub type TransactorResult<T> = Result<T, TransactorError>;
