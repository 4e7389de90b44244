//! Bounded priority queue with graceful degradation
//!
//! Five FIFO lanes, one per [`Priority`] level, each with an optional
//! occupancy cap. A push that finds its wanted lane full settles down to the
//! first lane with room strictly below it; only when every eligible lane is
//! full is the item handed back. The default caps keep High and Airmail
//! small so excess urgent traffic settles into the unbounded middle lanes
//! instead of starving them; this is the engine's backpressure mechanism.
//!
//! Every mutating operation runs under one queue-wide mutex: the capacity
//! check and the insertion or removal are a single atomic unit.

use crate::protocol::Priority;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Default cap for the High lane.
pub const DEFAULT_HIGH_CAPACITY: usize = 50;
/// Default cap for the Airmail lane, tighter than High.
pub const DEFAULT_AIRMAIL_CAPACITY: usize = 10;

/// Per-level occupancy caps. `None` means unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub undefined: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airmail: Option<usize>,
}

impl Default for CapacityMap {
    fn default() -> Self {
        Self {
            undefined: None,
            low: None,
            normal: None,
            high: Some(DEFAULT_HIGH_CAPACITY),
            airmail: Some(DEFAULT_AIRMAIL_CAPACITY),
        }
    }
}

impl CapacityMap {
    /// Every lane unbounded.
    pub fn unbounded() -> Self {
        Self {
            undefined: None,
            low: None,
            normal: None,
            high: None,
            airmail: None,
        }
    }

    /// Override the cap for one level.
    pub fn with(mut self, level: Priority, cap: Option<usize>) -> Self {
        match level {
            Priority::Undefined => self.undefined = cap,
            Priority::Low => self.low = cap,
            Priority::Normal => self.normal = cap,
            Priority::High => self.high = cap,
            Priority::Airmail => self.airmail = cap,
        }
        self
    }

    pub fn get(&self, level: Priority) -> Option<usize> {
        match level {
            Priority::Undefined => self.undefined,
            Priority::Low => self.low,
            Priority::Normal => self.normal,
            Priority::High => self.high,
            Priority::Airmail => self.airmail,
        }
    }
}

/// Lane visiting order for pop and peek.
///
/// `Descending` preserves strict priority; the alternatives trade it for
/// fairness or anti-starvation at the caller's discretion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderPolicy {
    #[default]
    Descending,
    Ascending,
    Shuffled,
}

impl OrderPolicy {
    fn visiting_order(self) -> [Priority; 5] {
        match self {
            OrderPolicy::Descending => Priority::descending(),
            OrderPolicy::Ascending => Priority::ascending(),
            OrderPolicy::Shuffled => {
                let mut order = Priority::ALL;
                order.shuffle(&mut rand::thread_rng());
                order
            }
        }
    }
}

/// Push outcome when every lane at or below the wanted level is full.
/// Carries the item back to the caller; nothing was inserted.
#[derive(Debug, PartialEq, Eq)]
pub struct QueueFull<T> {
    pub item: T,
    pub want: Priority,
}

impl<T> fmt::Display for QueueFull<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no capacity at or below {}", self.want)
    }
}

impl<T: fmt::Debug> std::error::Error for QueueFull<T> {}

/// Thread-safe bounded multi-level FIFO queue.
///
/// Within a lane, arrival order is preserved: items enter at the back and
/// leave from the front.
#[derive(Debug)]
pub struct BoundedPriorityQueue<T> {
    lanes: Mutex<[VecDeque<T>; 5]>,
    capacities: CapacityMap,
}

impl<T> BoundedPriorityQueue<T> {
    /// Create a queue with the default capacity policy.
    pub fn new() -> Self {
        Self::with_capacities(CapacityMap::default())
    }

    pub fn with_capacities(capacities: CapacityMap) -> Self {
        Self {
            lanes: Mutex::new(std::array::from_fn(|_| VecDeque::new())),
            capacities,
        }
    }

    pub fn capacities(&self) -> &CapacityMap {
        &self.capacities
    }

    fn lock(&self) -> MutexGuard<'_, [VecDeque<T>; 5]> {
        // a poisoned lock still guards structurally sound lanes
        self.lanes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fits(&self, lanes: &[VecDeque<T>; 5], level: Priority) -> bool {
        match self.capacities.get(level) {
            None => true,
            Some(cap) => lanes[level.lane()].len() < cap,
        }
    }

    /// Insert at `want`, settling down to the first lane with room strictly
    /// below it when `want` is full. Returns the lane the item landed in, or
    /// hands the item back when every eligible lane is at capacity.
    pub fn push(&self, item: T, want: Priority) -> Result<Priority, QueueFull<T>> {
        let mut lanes = self.lock();
        if self.fits(&lanes, want) {
            lanes[want.lane()].push_back(item);
            return Ok(want);
        }
        for level in want.below() {
            if self.fits(&lanes, level) {
                lanes[level.lane()].push_back(item);
                return Ok(level);
            }
        }
        Err(QueueFull { item, want })
    }

    /// Insert at exactly `level`, ignoring its cap.
    pub fn force_push(&self, item: T, level: Priority) -> Priority {
        self.lock()[level.lane()].push_back(item);
        level
    }

    /// Remove and return the oldest item of the first non-empty lane in the
    /// policy's visiting order.
    pub fn pop(&self, policy: OrderPolicy) -> Option<(T, Priority)> {
        let mut lanes = self.lock();
        for level in policy.visiting_order() {
            if let Some(item) = lanes[level.lane()].pop_front() {
                return Some((item, level));
            }
        }
        None
    }

    /// Remove from exactly `level`, without consulting other lanes.
    pub fn pop_level(&self, level: Priority) -> Option<T> {
        self.lock()[level.lane()].pop_front()
    }

    pub fn has_waiting(&self) -> bool {
        self.lock().iter().any(|lane| !lane.is_empty())
    }

    pub fn len(&self) -> usize {
        self.lock().iter().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_waiting()
    }

    pub fn level_len(&self, level: Priority) -> usize {
        self.lock()[level.lane()].len()
    }

    /// Atomically empty one lane, returning what was removed in arrival
    /// order.
    pub fn clear_level(&self, level: Priority) -> Vec<T> {
        self.lock()[level.lane()].drain(..).collect()
    }

    /// Atomically empty every lane, most urgent first.
    pub fn clear_all(&self) -> Vec<(Priority, Vec<T>)> {
        let mut lanes = self.lock();
        Priority::descending()
            .into_iter()
            .map(|level| (level, lanes[level.lane()].drain(..).collect()))
            .collect()
    }
}

impl<T: Clone> BoundedPriorityQueue<T> {
    /// Same selection as [`pop`](Self::pop) without removing the item.
    pub fn peek(&self, policy: OrderPolicy) -> Option<(T, Priority)> {
        let lanes = self.lock();
        for level in policy.visiting_order() {
            if let Some(item) = lanes[level.lane()].front() {
                return Some((item.clone(), level));
            }
        }
        None
    }

    /// View the oldest item of exactly `level`.
    pub fn peek_level(&self, level: Priority) -> Option<T> {
        self.lock()[level.lane()].front().cloned()
    }
}

impl<T> Default for BoundedPriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
