//! Request admission and arbiter dispatch
//!
//! [`RequestClerk`] composes the bounded priority queue with the pending
//! store and exposes both sides of the engine: producers register work and
//! poll for results; the arbiter drains the queue and invokes the handler.
//!
//! The only wait mechanism is a cooperative spin: callers that ask to block
//! yield the thread and re-poll until state changes. There is no timeout;
//! spinning on a request that is never dispatched blocks forever, which is a
//! documented property of the design rather than a defect to paper over.

use crate::error::{TransactorError, TransactorResult};
use crate::handler::Handler;
use crate::observability::metrics::metrics;
use crate::protocol::{
    Completion, Envelope, Priority, Request, Retrieval, StatusDescriptor, Timing, FAILURE_CODE,
};
use crate::queue::{BoundedPriorityQueue, CapacityMap, OrderPolicy};
use crate::store::PendingStore;
use chrono::Utc;
use serde_json::{json, Value};
use std::thread;
use tracing::{debug, warn};

mod roles;
pub use roles::{ReadClerk, WriteClerk};

/// Queue entry: the correlation key plus the opaque payload. The priority is
/// tracked by the lane the entry occupies, not by the entry itself.
#[derive(Debug, Clone)]
struct QueuedRequest {
    id: String,
    payload: Value,
}

/// The dispatch core. One clerk owns one queue and one store; any number of
/// producer threads and dispatcher threads may share it.
#[derive(Debug, Default)]
pub struct RequestClerk {
    queue: BoundedPriorityQueue<QueuedRequest>,
    store: PendingStore,
}

impl RequestClerk {
    /// Create a clerk with the default capacity policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacities(capacities: CapacityMap) -> Self {
        Self {
            queue: BoundedPriorityQueue::with_capacities(capacities),
            store: PendingStore::new(),
        }
    }

    /// Admit a request into the queue at its wanted level, settling down
    /// when that lane is full. Returns the level actually assigned.
    ///
    /// The identifier becomes known only after successful placement, so a
    /// rejected registration leaves no trace and no producer can end up
    /// spinning on a request that was never queued.
    #[tracing::instrument(skip(self, request), fields(id = %request.id, want = %request.priority))]
    pub fn register(&self, request: Request) -> TransactorResult<Priority> {
        if request.id.is_empty() {
            return Err(TransactorError::validation(
                "request identifier must not be empty",
            ));
        }

        let want = request.priority;
        let id = request.id;
        let entry = QueuedRequest {
            id: id.clone(),
            payload: request.payload,
        };

        match self.queue.push(entry, want) {
            Ok(placed) => {
                self.store.admit(&id);
                metrics().record_registered();
                if placed != want {
                    metrics().record_settled();
                    debug!(%placed, "request settled below wanted level");
                }
                Ok(placed)
            }
            Err(full) => {
                metrics().record_rejected();
                warn!("queue exhausted, request rejected");
                Err(TransactorError::QueueExhausted {
                    want,
                    request: Request {
                        id: full.item.id,
                        priority: want,
                        payload: full.item.payload,
                    },
                })
            }
        }
    }

    /// Non-blocking or spinning fetch of a completed response value.
    pub fn get_response(&self, id: &str, spin: bool, keep: bool) -> Retrieval<Value> {
        self.retrieve(id, spin, || self.store.take_response(id, keep))
    }

    /// Non-blocking or spinning fetch of a completed status descriptor.
    pub fn get_status(&self, id: &str, spin: bool, keep: bool) -> Retrieval<StatusDescriptor> {
        self.retrieve(id, spin, || self.store.take_status(id, keep))
    }

    fn retrieve<T>(
        &self,
        id: &str,
        spin: bool,
        mut fetch: impl FnMut() -> Option<T>,
    ) -> Retrieval<T> {
        if !self.store.is_known(id) {
            return Retrieval::Unknown;
        }
        loop {
            if let Some(value) = fetch() {
                metrics().record_claimed();
                return Retrieval::Ready(value);
            }
            if !spin {
                return Retrieval::Pending;
            }
            thread::yield_now();
        }
    }

    /// Is any request waiting, at any level? Non-consuming.
    pub fn have_waiting(&self) -> bool {
        self.queue.has_waiting()
    }

    /// Number of requests currently queued across all levels.
    pub fn waiting(&self) -> usize {
        self.queue.len()
    }

    /// Take the most urgent waiting request, run the handler on it, and
    /// publish the outcome to the store.
    ///
    /// With `spin` false an empty queue returns `None` immediately; with
    /// `spin` true the call yields and re-polls until work arrives. With
    /// `keep` true the request is peeked rather than popped and stays
    /// queued.
    ///
    /// A handler failure never propagates: it is converted into a terminal
    /// result with [`FAILURE_CODE`] so every dispatched identifier
    /// completes and any producer spinning on it terminates.
    pub fn dispatch_one(
        &self,
        handler: &dyn Handler,
        spin: bool,
        keep: bool,
    ) -> Option<(Value, StatusDescriptor)> {
        self.dispatch_one_with(handler, OrderPolicy::Descending, spin, keep)
    }

    /// [`dispatch_one`](Self::dispatch_one) with an explicit lane visiting
    /// order, for dispatchers that trade strict priority for fairness.
    #[tracing::instrument(skip(self, handler))]
    pub fn dispatch_one_with(
        &self,
        handler: &dyn Handler,
        policy: OrderPolicy,
        spin: bool,
        keep: bool,
    ) -> Option<(Value, StatusDescriptor)> {
        let (entry, level) = loop {
            let next = if keep {
                self.queue.peek(policy)
            } else {
                self.queue.pop(policy)
            };
            match next {
                Some(found) => break found,
                None if !spin => return None,
                None => thread::yield_now(),
            }
        };

        let issued = Utc::now();
        let envelope = Envelope {
            id: entry.id.clone(),
            request: entry.payload,
            priority: level,
            issued,
        };

        let start = Utc::now();
        let outcome = handler.handle(envelope);
        let end = Utc::now();

        let completion = match outcome {
            Ok(completion) => completion,
            Err(failure) => {
                metrics().record_handler_failure();
                warn!(id = %entry.id, error = %failure, "handler failed, recording terminal result");
                Completion::new(json!({ "error": failure.message() }), FAILURE_CODE)
            }
        };

        let descriptor = StatusDescriptor {
            id: entry.id.clone(),
            code: completion.code,
            timing: Timing { issued, start, end },
        };

        // Status lands first so a producer that just observed the response
        // can immediately read the status as well.
        self.store.record_status(descriptor.clone());
        self.store.record_response(&entry.id, completion.value.clone());
        metrics().record_dispatched();
        debug!(id = %entry.id, code = completion.code, "dispatch complete");

        Some((completion.value, descriptor))
    }
}
