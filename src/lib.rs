//! Transactor - in-process admission and dispatch engine
//!
//! Producers register tagged work items carrying a priority hint; an arbiter
//! loop drains them in priority order, invokes a pluggable [`Handler`], and
//! publishes each result under the request's identifier for the producer to
//! collect later.
//!
//! # Overview
//!
//! The engine is built from two independent pieces composed by
//! [`RequestClerk`]:
//! - a [`BoundedPriorityQueue`] of five FIFO lanes with per-level occupancy
//!   caps and settle-down degradation when an urgent lane is full
//! - a [`PendingStore`] correlating completed responses and status
//!   descriptors back to their identifiers
//!
//! Waiting is always a cooperative spin (yield and re-poll); there is no
//! blocking primitive anywhere in the core.
//!
//! # Quick Start
//!
//! ```rust
//! use transactor::protocol::{Priority, Request, Retrieval};
//! use transactor::testing::mocks::EchoHandler;
//! use transactor::RequestClerk;
//! use serde_json::json;
//!
//! let clerk = RequestClerk::new();
//!
//! let placed = clerk
//!     .register(Request::new("job-1", json!({"table": "users"})).with_priority(Priority::High))
//!     .unwrap();
//! assert_eq!(placed, Priority::High);
//!
//! let handler = EchoHandler::new();
//! let served = clerk.dispatch_one(&handler, false, false);
//! assert!(served.is_some());
//!
//! match clerk.get_response("job-1", false, false) {
//!     Retrieval::Ready(value) => assert_eq!(value, json!({"table": "users"})),
//!     other => panic!("expected a ready response, got {other:?}"),
//! }
//! ```

pub mod clerk;
pub mod config;
pub mod error;
pub mod handler;
pub mod observability;
pub mod protocol;
pub mod queue;
pub mod store;
pub mod testing;

pub use clerk::{ReadClerk, RequestClerk, WriteClerk};
pub use config::{ConfigError, TransactorConfig};
pub use error::{TransactorError, TransactorResult};
pub use handler::{Handler, HandlerFailure};
pub use protocol::{
    Completion, Envelope, Priority, Request, Retrieval, StatusDescriptor, Timing, FAILURE_CODE,
};
pub use queue::{BoundedPriorityQueue, CapacityMap, OrderPolicy, QueueFull};
pub use store::PendingStore;
