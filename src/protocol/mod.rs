//! Core request/response types for the dispatch engine

pub mod messages;
pub mod priority;

pub use messages::{
    Completion, Envelope, Request, Retrieval, StatusDescriptor, Timing, FAILURE_CODE,
};
pub use priority::{ParsePriorityError, Priority};
