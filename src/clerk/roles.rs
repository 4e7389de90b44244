//! Role-specialized clerk views
//!
//! Read and write traffic often run through separate pools. These wrappers
//! give each role its own registration verb while sharing the clerk
//! mechanics unchanged.

use crate::error::TransactorResult;
use crate::handler::Handler;
use crate::protocol::{Priority, Request, Retrieval, StatusDescriptor};
use crate::queue::CapacityMap;
use serde_json::Value;

use super::RequestClerk;

/// Clerk view for read-side traffic.
#[derive(Debug, Default)]
pub struct ReadClerk {
    inner: RequestClerk,
}

impl ReadClerk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacities(capacities: CapacityMap) -> Self {
        Self {
            inner: RequestClerk::with_capacities(capacities),
        }
    }

    pub fn register_read(&self, request: Request) -> TransactorResult<Priority> {
        self.inner.register(request)
    }

    pub fn get_response(&self, id: &str, spin: bool, keep: bool) -> Retrieval<Value> {
        self.inner.get_response(id, spin, keep)
    }

    pub fn get_status(&self, id: &str, spin: bool, keep: bool) -> Retrieval<StatusDescriptor> {
        self.inner.get_status(id, spin, keep)
    }

    pub fn have_waiting(&self) -> bool {
        self.inner.have_waiting()
    }

    pub fn dispatch_one(
        &self,
        handler: &dyn Handler,
        spin: bool,
        keep: bool,
    ) -> Option<(Value, StatusDescriptor)> {
        self.inner.dispatch_one(handler, spin, keep)
    }

    /// The underlying clerk, for operations without a role-specific verb.
    pub fn clerk(&self) -> &RequestClerk {
        &self.inner
    }
}

/// Clerk view for write-side traffic.
#[derive(Debug, Default)]
pub struct WriteClerk {
    inner: RequestClerk,
}

impl WriteClerk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacities(capacities: CapacityMap) -> Self {
        Self {
            inner: RequestClerk::with_capacities(capacities),
        }
    }

    pub fn register_write(&self, request: Request) -> TransactorResult<Priority> {
        self.inner.register(request)
    }

    pub fn get_response(&self, id: &str, spin: bool, keep: bool) -> Retrieval<Value> {
        self.inner.get_response(id, spin, keep)
    }

    pub fn get_status(&self, id: &str, spin: bool, keep: bool) -> Retrieval<StatusDescriptor> {
        self.inner.get_status(id, spin, keep)
    }

    pub fn have_waiting(&self) -> bool {
        self.inner.have_waiting()
    }

    pub fn dispatch_one(
        &self,
        handler: &dyn Handler,
        spin: bool,
        keep: bool,
    ) -> Option<(Value, StatusDescriptor)> {
        self.inner.dispatch_one(handler, spin, keep)
    }

    /// The underlying clerk, for operations without a role-specific verb.
    pub fn clerk(&self) -> &RequestClerk {
        &self.inner
    }
}
