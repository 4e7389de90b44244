//! Request and result types exchanged through the dispatch core
//!
//! Every registration carries a caller-supplied identifier that correlates
//! the request with its eventual response and status descriptor. The payload
//! itself is opaque to the core and forwarded verbatim to the handler.

use crate::error::{TransactorError, TransactorResult};
use crate::protocol::priority::Priority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status code recorded when a handler fails. All other codes are opaque to
/// the core and follow whatever convention the caller adopts (e.g. 200 for
/// success).
pub const FAILURE_CODE: i32 = -1;

/// A unit of work submitted by a producer.
///
/// The identifier must be unique among concurrently outstanding requests;
/// uniqueness is a caller contract, the core neither generates nor validates
/// it beyond requiring a non-empty string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Request {
    /// Correlation key between registration, dispatch, and retrieval.
    pub id: String,
    /// Wanted urgency class; the assigned level may settle lower.
    #[serde(default)]
    pub priority: Priority,
    /// Opaque payload forwarded verbatim to the handler.
    #[serde(default)]
    pub payload: Value,
}

impl Request {
    /// Create a request at the default (`Undefined`) priority.
    pub fn new(id: impl Into<String>, payload: Value) -> Self {
        Self {
            id: id.into(),
            priority: Priority::default(),
            payload,
        }
    }

    /// Set the wanted priority level.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Parse a request from a caller-supplied JSON mapping.
    ///
    /// Surfaces a `Validation` error for a missing or malformed `id` and for
    /// an unrecognized `priority` name, instead of a deserialization fault.
    pub fn from_value(value: Value) -> TransactorResult<Self> {
        let Value::Object(map) = value else {
            return Err(TransactorError::validation("request must be a JSON object"));
        };

        let id = match map.get("id") {
            None => {
                return Err(TransactorError::validation(
                    "request is missing the 'id' field",
                ))
            }
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(_) => {
                return Err(TransactorError::validation(
                    "'id' must be a non-empty string",
                ))
            }
        };

        let priority = match map.get("priority") {
            None | Some(Value::Null) => Priority::default(),
            Some(value) => serde_json::from_value(value.clone()).map_err(|_| {
                TransactorError::validation(format!("unrecognized priority: {value}"))
            })?,
        };

        let payload = map.get("payload").cloned().unwrap_or(Value::Null);

        Ok(Self {
            id,
            priority,
            payload,
        })
    }
}

/// Handler input: the dispatched payload together with its assigned priority
/// and the instant the arbiter pulled it off the queue.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Envelope {
    pub id: String,
    pub request: Value,
    pub priority: Priority,
    pub issued: DateTime<Utc>,
}

/// Handler output: a result value plus a caller-defined status code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Completion {
    pub value: Value,
    pub code: i32,
}

impl Completion {
    pub fn new(value: Value, code: i32) -> Self {
        Self { value, code }
    }
}

/// Dispatch timestamps: dequeued, handler entered, handler returned.
/// `issued <= start <= end` always holds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Timing {
    pub issued: DateTime<Utc>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Terminal status record produced exactly once per dispatched request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusDescriptor {
    pub id: String,
    pub code: i32,
    pub timing: Timing,
}

/// Outcome of a retrieval call.
///
/// `Unknown` (identifier never registered) and `Pending` (registered but not
/// yet completed) are ordinary values a polling caller branches on, not
/// errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Retrieval<T> {
    Ready(T),
    Pending,
    Unknown,
}

impl<T> Retrieval<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Retrieval::Ready(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Retrieval::Pending)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Retrieval::Unknown)
    }

    /// Extract the ready value, discarding the pending/unknown distinction.
    pub fn ready(self) -> Option<T> {
        match self {
            Retrieval::Ready(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_full_request() {
        let request = Request::from_value(json!({
            "id": "req-1",
            "priority": "high",
            "payload": {"table": "users"}
        }))
        .unwrap();

        assert_eq!(request.id, "req-1");
        assert_eq!(request.priority, Priority::High);
        assert_eq!(request.payload, json!({"table": "users"}));
    }

    #[test]
    fn test_from_value_defaults() {
        let request = Request::from_value(json!({"id": "req-2"})).unwrap();
        assert_eq!(request.priority, Priority::Undefined);
        assert_eq!(request.payload, Value::Null);
    }

    #[test]
    fn test_from_value_missing_id_is_validation_error() {
        let err = Request::from_value(json!({"priority": "low"})).unwrap_err();
        assert!(matches!(err, TransactorError::Validation { .. }));
    }

    #[test]
    fn test_from_value_empty_id_is_validation_error() {
        let err = Request::from_value(json!({"id": ""})).unwrap_err();
        assert!(matches!(err, TransactorError::Validation { .. }));
    }

    #[test]
    fn test_from_value_bad_priority_is_validation_error() {
        let err = Request::from_value(json!({"id": "x", "priority": "urgent"})).unwrap_err();
        assert!(matches!(err, TransactorError::Validation { .. }));
    }

    #[test]
    fn test_from_value_non_object_is_validation_error() {
        let err = Request::from_value(json!("just a string")).unwrap_err();
        assert!(matches!(err, TransactorError::Validation { .. }));
    }

    #[test]
    fn test_retrieval_accessors() {
        let ready: Retrieval<i32> = Retrieval::Ready(7);
        assert!(ready.is_ready());
        assert_eq!(ready.ready(), Some(7));

        let pending: Retrieval<i32> = Retrieval::Pending;
        assert!(pending.is_pending());
        assert_eq!(pending.ready(), None);

        let unknown: Retrieval<i32> = Retrieval::Unknown;
        assert!(unknown.is_unknown());
        assert_eq!(unknown.ready(), None);
    }
}
