//! Detect which attendees' busy time collides with a proposed meeting.
//!
//! Uses strict overlap: a busy interval ending exactly when the meeting starts
//! (or starting exactly when it ends) is NOT a conflict.

use serde::{Deserialize, Serialize};

use crate::availability::AttendeeSchedule;
use crate::interval::Interval;

/// A busy interval of one attendee that overlaps the proposed time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub attendee: String,
    pub busy: Interval,
    pub overlap_minutes: i64,
}

/// Find every busy interval, across all schedules, that overlaps `proposed`.
///
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_conflicts(schedules: &[AttendeeSchedule], proposed: &Interval) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for schedule in schedules {
        for busy in &schedule.busy {
            if busy.overlaps(proposed) {
                let overlap_start = busy.start.max(proposed.start);
                let overlap_end = busy.end.min(proposed.end);

                conflicts.push(Conflict {
                    attendee: schedule.attendee.clone(),
                    busy: *busy,
                    overlap_minutes: (overlap_end - overlap_start).num_minutes(),
                });
            }
        }
    }

    conflicts
}
