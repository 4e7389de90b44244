//! Pending-request bookkeeping and completed-result hand-off
//!
//! Three tables behind one mutex: the set of identifiers ever admitted, the
//! completed response values, and the completed status descriptors. The
//! known set is what lets retrieval distinguish a caller error (identifier
//! never registered) from the ordinary not-yet-complete state. Identifiers
//! stay known for the life of the process; only response and status entries
//! are freed, by non-`keep` reads.
//!
//! This mutex is independent of the queue's. No operation holds both.

use crate::protocol::StatusDescriptor;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Tables {
    known: HashSet<String>,
    responses: HashMap<String, Value>,
    statuses: HashMap<String, StatusDescriptor>,
}

/// Identifier-keyed store connecting the arbiter's results back to the
/// producers polling for them.
#[derive(Debug, Default)]
pub struct PendingStore {
    tables: Mutex<Tables>,
}

impl PendingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark an identifier as registered. Idempotent.
    pub fn admit(&self, id: &str) {
        self.lock().known.insert(id.to_string());
    }

    pub fn is_known(&self, id: &str) -> bool {
        self.lock().known.contains(id)
    }

    /// Record the handler's result value. Set once per identifier by the
    /// arbiter; a later write overwrites.
    pub fn record_response(&self, id: &str, value: Value) {
        self.lock().responses.insert(id.to_string(), value);
    }

    /// Record the terminal status descriptor, keyed by its identifier.
    pub fn record_status(&self, descriptor: StatusDescriptor) {
        self.lock()
            .statuses
            .insert(descriptor.id.clone(), descriptor);
    }

    /// Fetch a completed response. Removed on read unless `keep`: the
    /// single-consumer hand-off, with `keep` reads inspecting only.
    pub fn take_response(&self, id: &str, keep: bool) -> Option<Value> {
        let mut tables = self.lock();
        if keep {
            tables.responses.get(id).cloned()
        } else {
            tables.responses.remove(id)
        }
    }

    /// Fetch a completed status descriptor; same `keep` semantics as
    /// [`take_response`](Self::take_response).
    pub fn take_status(&self, id: &str, keep: bool) -> Option<StatusDescriptor> {
        let mut tables = self.lock();
        if keep {
            tables.statuses.get(id).cloned()
        } else {
            tables.statuses.remove(id)
        }
    }

    /// Number of identifiers ever admitted.
    pub fn known_count(&self) -> usize {
        self.lock().known.len()
    }
}
