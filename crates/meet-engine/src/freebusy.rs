//! Merge busy intervals and compute the free slots between them.
//!
//! Sorts intervals by start time, merges overlapping or touching busy periods,
//! then walks a cursor across a work window to emit the gaps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interval::{Interval, WorkWindow};

/// A free time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl FreeSlot {
    fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }
}

/// Merge overlapping or touching busy intervals.
///
/// Returns a sorted list of disjoint intervals covering the union of the input.
/// Intervals that touch (`a.end == b.start`) collapse into one.
///
/// Input is not validated: an interval with `start > end` is carried through
/// as-is and only compared by its endpoints.
pub fn merge_busy_intervals(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted = intervals.to_vec();
    sorted.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// Compute the free slots of `window` left over by `merged_busy`.
///
/// `merged_busy` is expected to be the output of [`merge_busy_intervals`]. The
/// cursor only ever moves forward, so a busy interval lying behind it (from
/// unmerged input) contributes nothing. Busy time outside the window is
/// clipped by the cursor, not filtered up front. A zero-length busy interval
/// inside the window still splits it into two touching free slots; reversed
/// intervals (`end < start`) are skipped.
pub fn compute_free_slots(merged_busy: &[Interval], window: WorkWindow) -> Vec<FreeSlot> {
    let mut free_slots = Vec::new();
    if window.is_empty() {
        return free_slots;
    }

    let mut cursor = window.start;
    for busy in merged_busy {
        if cursor >= window.end {
            break;
        }
        if busy.end < busy.start {
            continue;
        }
        let gap_end = busy.start.min(window.end);
        if gap_end > cursor {
            free_slots.push(FreeSlot::new(cursor, gap_end));
        }
        cursor = cursor.max(busy.end);
    }

    // Trailing free slot after the last busy period.
    if cursor < window.end {
        free_slots.push(FreeSlot::new(cursor, window.end));
    }

    free_slots
}

/// Merge `busy` and compute the free slots of `window` in one step.
pub fn find_free_slots(busy: &[Interval], window: WorkWindow) -> Vec<FreeSlot> {
    compute_free_slots(&merge_busy_intervals(busy), window)
}

/// The first free slot of at least `min_duration_minutes`.
pub fn find_first_free_slot(free: &[FreeSlot], min_duration_minutes: i64) -> Option<&FreeSlot> {
    free.iter().find(|slot| slot.duration_minutes >= min_duration_minutes)
}

/// Whether `proposed` lies entirely inside one of the free slots.
pub fn slot_fits(free: &[FreeSlot], proposed: &Interval) -> bool {
    free.iter().any(|slot| slot.interval().contains(proposed))
}
