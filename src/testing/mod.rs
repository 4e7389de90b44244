//! Test and demo support utilities

pub mod keys;
pub mod mocks;

pub use keys::{random_key, KeySequence};
pub use mocks::{EchoHandler, FailingHandler, RecordingHandler};
