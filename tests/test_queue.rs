//! Behavioral tests for the bounded priority queue
//!
//! Covers the queue's externally observable contract:
//! - FIFO within a level
//! - strict priority precedence under the default order
//! - settle-down degradation when urgent lanes fill
//! - deterministic exhaustion with nothing inserted
//! - force-push, peek, and clear semantics


use test_helpers::closed_capacities;
use transactor::protocol::Priority;
use transactor::queue::{BoundedPriorityQueue, CapacityMap, OrderPolicy, QueueFull};

#[test]
fn test_fifo_within_forced_level() {
    let queue = BoundedPriorityQueue::new();
    for n in 0..10 {
        queue.push(n, Priority::Low).unwrap();
    }

    let drained: Vec<i32> = std::iter::from_fn(|| queue.pop_level(Priority::Low)).collect();
    assert_eq!(drained, (0..10).collect::<Vec<i32>>());
}

#[test]
fn test_priority_precedence() {
    let queue = BoundedPriorityQueue::new();
    queue.push("slow", Priority::Low).unwrap();
    queue.push("urgent", Priority::Airmail).unwrap();

    let (first, level) = queue.pop(OrderPolicy::Descending).unwrap();
    assert_eq!(first, "urgent");
    assert_eq!(level, Priority::Airmail);

    let (second, level) = queue.pop(OrderPolicy::Descending).unwrap();
    assert_eq!(second, "slow");
    assert_eq!(level, Priority::Low);
}

#[test]
fn test_settle_down_lands_in_first_open_lane_below() {
    let caps = CapacityMap::default().with(Priority::Airmail, Some(1));
    let queue = BoundedPriorityQueue::with_capacities(caps);

    assert_eq!(queue.push("first", Priority::Airmail), Ok(Priority::Airmail));
    // High has room by default, so the overflow settles exactly one level
    // down.
    assert_eq!(queue.push("second", Priority::Airmail), Ok(Priority::High));

    assert_eq!(queue.pop_level(Priority::Airmail), Some("first"));
    assert_eq!(queue.pop_level(Priority::High), Some("second"));
}

#[test]
fn test_settle_down_reaches_normal_when_high_is_closed() {
    let caps = CapacityMap::default()
        .with(Priority::Airmail, Some(1))
        .with(Priority::High, Some(0));
    let queue = BoundedPriorityQueue::with_capacities(caps);

    assert_eq!(queue.push("first", Priority::Airmail), Ok(Priority::Airmail));
    assert_eq!(queue.push("second", Priority::Airmail), Ok(Priority::Normal));

    // Both items remain retrievable.
    assert!(queue.pop(OrderPolicy::Descending).is_some());
    assert!(queue.pop(OrderPolicy::Descending).is_some());
    assert!(queue.is_empty());
}

#[test]
fn test_exhaustion_is_deterministic_and_non_destructive() {
    let queue = BoundedPriorityQueue::with_capacities(closed_capacities());

    let result = queue.push("doomed", Priority::Airmail);
    assert_eq!(
        result,
        Err(QueueFull {
            item: "doomed",
            want: Priority::Airmail
        })
    );
    assert!(queue.is_empty());
    assert_eq!(queue.len(), 0);
}

#[test]
fn test_force_push_bypasses_full_lane() {
    let queue = BoundedPriorityQueue::with_capacities(closed_capacities());

    assert_eq!(queue.force_push("vip", Priority::Airmail), Priority::Airmail);
    assert_eq!(queue.level_len(Priority::Airmail), 1);
    assert_eq!(queue.pop_level(Priority::Airmail), Some("vip"));
}

#[test]
fn test_ascending_order_reverses_precedence() {
    let queue = BoundedPriorityQueue::new();
    queue.push("slow", Priority::Low).unwrap();
    queue.push("urgent", Priority::Airmail).unwrap();

    let (first, _) = queue.pop(OrderPolicy::Ascending).unwrap();
    assert_eq!(first, "slow");
}

#[test]
fn test_shuffled_order_still_drains_everything() {
    let queue = BoundedPriorityQueue::new();
    for level in Priority::ALL {
        queue.push(level.as_str(), level).unwrap();
    }

    let mut drained = 0;
    while queue.pop(OrderPolicy::Shuffled).is_some() {
        drained += 1;
    }
    assert_eq!(drained, Priority::COUNT);
}

#[test]
fn test_peek_is_a_liveness_check_not_a_consumer() {
    let queue = BoundedPriorityQueue::new();
    assert!(queue.peek(OrderPolicy::Descending).is_none());
    assert!(!queue.has_waiting());

    queue.push("pending", Priority::Normal).unwrap();

    assert_eq!(
        queue.peek(OrderPolicy::Descending),
        Some(("pending", Priority::Normal))
    );
    assert!(queue.has_waiting());
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_clear_level_and_clear_all() {
    let queue = BoundedPriorityQueue::new();
    queue.push(1, Priority::Low).unwrap();
    queue.push(2, Priority::Low).unwrap();
    queue.push(3, Priority::Airmail).unwrap();

    assert_eq!(queue.clear_level(Priority::Low), vec![1, 2]);
    assert_eq!(queue.len(), 1);

    let drained = queue.clear_all();
    assert!(queue.is_empty());
    assert_eq!(drained[0], (Priority::Airmail, vec![3]));
}

#[test]
fn test_pop_level_ignores_other_lanes() {
    let queue = BoundedPriorityQueue::new();
    queue.push("urgent", Priority::Airmail).unwrap();

    assert_eq!(queue.pop_level(Priority::Normal), None);
    assert_eq!(queue.level_len(Priority::Airmail), 1);
}
