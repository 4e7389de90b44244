//! Tests for clerk registration and retrieval
//!
//! Covers the producer-facing surface:
//! - registration returns the assigned level, honoring settle-down
//! - validation and exhaustion errors
//! - the unknown / pending / ready retrieval distinction
//! - consume-once vs keep read semantics
//! - the role-specialized clerk views


use serde_json::json;
use test_helpers::{closed_capacities, request};
use transactor::protocol::{Priority, Request, Retrieval};
use transactor::queue::CapacityMap;
use transactor::testing::mocks::EchoHandler;
use transactor::{ReadClerk, RequestClerk, TransactorError, WriteClerk};

#[test]
fn test_register_returns_assigned_level() {
    let clerk = RequestClerk::new();
    let placed = clerk.register(request("r1", Priority::High)).unwrap();
    assert_eq!(placed, Priority::High);
    assert!(clerk.have_waiting());
    assert_eq!(clerk.waiting(), 1);
}

#[test]
fn test_register_defaults_to_undefined_priority() {
    let clerk = RequestClerk::new();
    let placed = clerk
        .register(Request::new("r1", json!({"anything": true})))
        .unwrap();
    assert_eq!(placed, Priority::Undefined);
}

#[test]
fn test_register_settles_down_when_wanted_lane_is_full() {
    let caps = CapacityMap::default().with(Priority::Airmail, Some(1));
    let clerk = RequestClerk::with_capacities(caps);

    assert_eq!(
        clerk.register(request("r1", Priority::Airmail)).unwrap(),
        Priority::Airmail
    );
    assert_eq!(
        clerk.register(request("r2", Priority::Airmail)).unwrap(),
        Priority::High
    );
}

#[test]
fn test_register_empty_id_is_validation_error() {
    let clerk = RequestClerk::new();
    let err = clerk.register(Request::new("", json!(null))).unwrap_err();
    assert!(matches!(err, TransactorError::Validation { .. }));
}

#[test]
fn test_register_exhausted_queue_hands_request_back() {
    let clerk = RequestClerk::with_capacities(closed_capacities());

    let err = clerk.register(request("r1", Priority::Normal)).unwrap_err();
    match err {
        TransactorError::QueueExhausted { want, request } => {
            assert_eq!(want, Priority::Normal);
            assert_eq!(request.id, "r1");
        }
        other => panic!("unexpected error: {other}"),
    }

    // The rejected identifier must not be known: nothing will ever complete
    // it, so a spinning producer must not be able to latch onto it.
    assert!(clerk.get_response("r1", false, false).is_unknown());
}

#[test]
fn test_retrieval_for_unregistered_id_is_unknown_not_pending() {
    let clerk = RequestClerk::new();
    assert_eq!(
        clerk.get_response("never-registered", false, false),
        Retrieval::Unknown
    );
    assert!(clerk.get_status("never-registered", false, false).is_unknown());
}

#[test]
fn test_retrieval_before_dispatch_is_pending() {
    let clerk = RequestClerk::new();
    clerk.register(request("r1", Priority::Normal)).unwrap();

    assert_eq!(clerk.get_response("r1", false, false), Retrieval::Pending);
    assert!(clerk.get_status("r1", false, false).is_pending());
}

#[test]
fn test_consume_once_semantics() {
    let clerk = RequestClerk::new();
    clerk.register(request("r1", Priority::Normal)).unwrap();
    clerk.dispatch_one(&EchoHandler::new(), false, false).unwrap();

    assert!(clerk.get_response("r1", false, false).is_ready());
    // Removed on read: a second non-keep read finds nothing.
    assert_eq!(clerk.get_response("r1", false, false), Retrieval::Pending);
}

#[test]
fn test_keep_reads_are_idempotent() {
    let clerk = RequestClerk::new();
    clerk.register(request("r1", Priority::Normal)).unwrap();
    clerk.dispatch_one(&EchoHandler::new(), false, false).unwrap();

    let first = clerk.get_response("r1", false, true);
    let second = clerk.get_response("r1", false, true);
    assert!(first.is_ready());
    assert_eq!(first, second);

    assert!(clerk.get_status("r1", false, true).is_ready());
    assert!(clerk.get_status("r1", false, true).is_ready());

    // A later consuming read still works and frees the entry.
    assert!(clerk.get_response("r1", false, false).is_ready());
    assert!(clerk.get_response("r1", false, false).is_pending());
}

#[test]
fn test_identifier_stays_known_after_consumption() {
    let clerk = RequestClerk::new();
    clerk.register(request("r1", Priority::Normal)).unwrap();
    clerk.dispatch_one(&EchoHandler::new(), false, false).unwrap();
    clerk.get_response("r1", false, false);

    // Completed and consumed is still "known", not "unknown".
    assert!(clerk.get_response("r1", false, false).is_pending());
}

#[test]
fn test_read_clerk_role_view() {
    let clerk = ReadClerk::new();
    clerk.register_read(request("q1", Priority::High)).unwrap();
    assert!(clerk.have_waiting());

    clerk.dispatch_one(&EchoHandler::new(), false, false).unwrap();
    assert!(clerk.get_response("q1", false, false).is_ready());
}

#[test]
fn test_write_clerk_role_view() {
    let clerk = WriteClerk::with_capacities(CapacityMap::default());
    clerk.register_write(request("w1", Priority::Low)).unwrap();

    clerk.dispatch_one(&EchoHandler::new(), false, false).unwrap();
    let status = clerk.get_status("w1", false, false).ready().unwrap();
    assert_eq!(status.id, "w1");
    assert_eq!(status.code, 200);
    assert!(clerk.clerk().waiting() == 0);
}
