//! Pluggable handler capability invoked by the arbiter
//!
//! The arbiter hands each dequeued request to a [`Handler`] and records
//! whatever comes back. Failure is part of the signature: a handler returns
//! `Err(HandlerFailure)` instead of panicking, and the clerk converts that
//! into a terminal result with [`crate::protocol::FAILURE_CODE`] so a
//! producer spinning on the outcome always observes completion.

use crate::protocol::{Completion, Envelope};
use thiserror::Error;

/// Failure reported by a handler for a single request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("handler failed: {message}")]
pub struct HandlerFailure {
    message: String,
}

impl HandlerFailure {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Capability supplied by the consumer side: turn one dispatched request
/// into a result value and status code.
///
/// Implementations must be thread-safe; the same handler instance may be
/// driven from several dispatcher threads.
pub trait Handler: Send + Sync {
    fn handle(&self, envelope: Envelope) -> Result<Completion, HandlerFailure>;
}

/// Closures with the right shape are handlers too.
impl<F> Handler for F
where
    F: Fn(Envelope) -> Result<Completion, HandlerFailure> + Send + Sync,
{
    fn handle(&self, envelope: Envelope) -> Result<Completion, HandlerFailure> {
        self(envelope)
    }
}
