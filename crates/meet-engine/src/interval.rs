//! The half-open time interval shared by the availability and layout engines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A time range `[start, end)`.
///
/// `start <= end` is assumed but not checked. Zero-length intervals are legal,
/// and a reversed interval is carried through the algorithms unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whole minutes between `start` and `end` (negative for reversed input).
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Strict overlap: intervals that merely touch do NOT overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Whether `instant` falls inside `[start, end)`.
    pub fn contains_instant(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Whether `other` lies entirely inside this interval.
    pub fn contains(&self, other: &Interval) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// The part of this interval inside `bounds`, or `None` when nothing of it
    /// remains.
    pub fn clip(&self, bounds: &Interval) -> Option<Interval> {
        let start = self.start.max(bounds.start);
        let end = self.end.min(bounds.end);
        (start < end).then_some(Interval { start, end })
    }
}

/// The outer bound of a free/busy search, e.g. one working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl WorkWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn as_interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }

    /// A window with `start >= end` has no room for any free slot.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
