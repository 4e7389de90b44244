//! Priority levels for admission and dispatch
//!
//! Five totally-ordered urgency classes. The order drives two things: which
//! queue lane a request is placed in, and which lane the arbiter drains
//! first. A greater value always means more urgent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Urgency class attached to every registered request.
///
/// `Undefined` is the default for requests that carry no priority hint; it is
/// a real level (the lowest), not an error state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Undefined = 0,
    Low = 1,
    Normal = 2,
    High = 3,
    Airmail = 4,
}

impl Priority {
    /// All levels, lowest to highest.
    pub const ALL: [Priority; 5] = [
        Priority::Undefined,
        Priority::Low,
        Priority::Normal,
        Priority::High,
        Priority::Airmail,
    ];

    /// Number of defined levels.
    pub const COUNT: usize = 5;

    /// Levels from most to least urgent, the default dispatch order.
    pub fn descending() -> [Priority; 5] {
        [
            Priority::Airmail,
            Priority::High,
            Priority::Normal,
            Priority::Low,
            Priority::Undefined,
        ]
    }

    /// Levels from least to most urgent.
    pub fn ascending() -> [Priority; 5] {
        Priority::ALL
    }

    /// The lowest defined level.
    pub fn lowest() -> Priority {
        Priority::Undefined
    }

    /// The highest defined level.
    pub fn highest() -> Priority {
        Priority::Airmail
    }

    /// Levels strictly below this one, most urgent first. This is the
    /// settle-down scan order used when a wanted lane is at capacity.
    pub fn below(self) -> impl Iterator<Item = Priority> {
        Priority::descending().into_iter().filter(move |p| *p < self)
    }

    /// Lane index for per-level storage.
    pub(crate) fn lane(self) -> usize {
        self as usize
    }

    /// Canonical lowercase name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Undefined => "undefined",
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Airmail => "airmail",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a priority level from a string fails.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized priority level: '{0}'")]
pub struct ParsePriorityError(pub String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "undefined" => Ok(Priority::Undefined),
            "low" => Ok(Priority::Low),
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            "airmail" => Ok(Priority::Airmail),
            other => Err(ParsePriorityError(other.to_string())),
        }
    }
}
