//! Multi-attendee availability merging with privacy-controlled output.
//!
//! Accepts one busy schedule per attendee, flattens them into a single busy set
//! and computes the free time the whole group shares inside a work window.
//! Every attendee's intervals must already be normalised to UTC (see
//! [`crate::zone`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::freebusy::{self, FreeSlot};
use crate::interval::{Interval, WorkWindow};

/// The busy intervals of one attendee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendeeSchedule {
    /// Directory identifier of the attendee (e.g. a user principal name).
    pub attendee: String,
    pub busy: Vec<Interval>,
}

impl AttendeeSchedule {
    pub fn new(attendee: impl Into<String>, busy: Vec<Interval>) -> Self {
        Self {
            attendee: attendee.into(),
            busy,
        }
    }

    /// The attendee's busy intervals, each tagged with the attendee.
    pub fn busy_slots(&self) -> impl Iterator<Item = BusySlot> + '_ {
        self.busy.iter().map(|interval| BusySlot {
            attendee: self.attendee.clone(),
            interval: *interval,
        })
    }
}

/// A busy interval tagged with the attendee it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusySlot {
    pub attendee: String,
    pub interval: Interval,
}

/// Privacy level for availability output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyLevel {
    /// Show time ranges and how many attendees are busy in each block.
    Full,
    /// Show only busy/free time ranges. `attendee_count` is 0 for every block.
    #[default]
    Opaque,
}

/// A merged busy block in the group view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusyBlock {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Number of attendees with busy time inside this block.
    /// Set to 0 when privacy is `Opaque`.
    pub attendee_count: usize,
}

/// Group availability after merging every attendee's schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupAvailability {
    /// Merged busy blocks clipped to the window (sorted, non-overlapping).
    pub busy: Vec<BusyBlock>,
    /// Free slots shared by the whole group.
    pub free: Vec<FreeSlot>,
    pub window: WorkWindow,
    pub privacy: PrivacyLevel,
}

/// Flatten every attendee's busy time into one tagged collection.
pub fn flatten_busy(schedules: &[AttendeeSchedule]) -> Vec<BusySlot> {
    schedules.iter().flat_map(AttendeeSchedule::busy_slots).collect()
}

/// Free time shared by every attendee inside `window`.
///
/// Zero attendees yield no free slots: there is nobody to meet. An attendee
/// with no busy time contributes nothing.
pub fn common_free_slots(schedules: &[AttendeeSchedule], window: WorkWindow) -> Vec<FreeSlot> {
    if schedules.is_empty() {
        return Vec::new();
    }

    let busy: Vec<Interval> = flatten_busy(schedules)
        .into_iter()
        .map(|slot| slot.interval)
        .collect();

    freebusy::find_free_slots(&busy, window)
}

/// Merge every attendee's schedule into busy blocks and free slots.
///
/// When `privacy` is `Opaque`, `attendee_count` is 0 on all busy blocks so the
/// output does not reveal how many people are occupied.
pub fn merge_availability(
    schedules: &[AttendeeSchedule],
    window: WorkWindow,
    privacy: PrivacyLevel,
) -> GroupAvailability {
    let busy: Vec<Interval> = flatten_busy(schedules)
        .into_iter()
        .map(|slot| slot.interval)
        .collect();
    let merged = freebusy::merge_busy_intervals(&busy);

    let bounds = window.as_interval();
    let busy = merged
        .iter()
        .filter_map(|interval| interval.clip(&bounds))
        .map(|block| BusyBlock {
            start: block.start,
            end: block.end,
            attendee_count: match privacy {
                PrivacyLevel::Full => count_attendees(schedules, &block),
                PrivacyLevel::Opaque => 0,
            },
        })
        .collect();

    let free = if schedules.is_empty() {
        Vec::new()
    } else {
        freebusy::compute_free_slots(&merged, window)
    };

    GroupAvailability {
        busy,
        free,
        window,
        privacy,
    }
}

/// Attendees busy at `instant`, in schedule order.
///
/// An interval covers its start but not its end, so an attendee whose meeting
/// ends exactly at `instant` is free.
pub fn busy_attendees_at(schedules: &[AttendeeSchedule], instant: DateTime<Utc>) -> Vec<&str> {
    schedules
        .iter()
        .filter(|s| s.busy.iter().any(|b| b.contains_instant(instant)))
        .map(|s| s.attendee.as_str())
        .collect()
}

/// How many attendees have at least one busy interval overlapping `block`.
fn count_attendees(schedules: &[AttendeeSchedule], block: &Interval) -> usize {
    schedules
        .iter()
        .filter(|schedule| schedule.busy.iter().any(|b| b.overlaps(block)))
        .count()
}
