//! Mock handlers for exercising the dispatch path without real work

use crate::handler::{Handler, HandlerFailure};
use crate::protocol::{Completion, Envelope};
use std::sync::Mutex;

/// Echoes the request payload back with a fixed status code.
#[derive(Debug)]
pub struct EchoHandler {
    code: i32,
}

impl EchoHandler {
    pub fn new() -> Self {
        Self { code: 200 }
    }

    pub fn with_code(code: i32) -> Self {
        Self { code }
    }
}

impl Default for EchoHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for EchoHandler {
    fn handle(&self, envelope: Envelope) -> Result<Completion, HandlerFailure> {
        Ok(Completion::new(envelope.request, self.code))
    }
}

/// Always fails, for exercising the terminal-failure path.
#[derive(Debug)]
pub struct FailingHandler {
    message: String,
}

impl FailingHandler {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Handler for FailingHandler {
    fn handle(&self, _envelope: Envelope) -> Result<Completion, HandlerFailure> {
        Err(HandlerFailure::new(self.message.clone()))
    }
}

/// Records every envelope it sees, then echoes like [`EchoHandler`].
#[derive(Debug, Default)]
pub struct RecordingHandler {
    seen: Mutex<Vec<Envelope>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> Vec<Envelope> {
        self.seen
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Handler for RecordingHandler {
    fn handle(&self, envelope: Envelope) -> Result<Completion, HandlerFailure> {
        let completion = Completion::new(envelope.request.clone(), 200);
        self.seen
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(envelope);
        Ok(completion)
    }
}
