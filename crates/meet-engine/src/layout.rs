//! Day-view column layout.
//!
//! Packs a day's events into side-by-side columns so that no two overlapping
//! events share one. Events are ordered by start time, longer events first
//! among those starting together, then greedily placed in the leftmost column
//! that is free by the time they begin.
//!
//! Unlike busy-time merging, events that merely touch (`a.end == b.start`) do
//! not collide here: the later one may reuse the earlier one's column.

use chrono::{DateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// Pixels per hour in the rendered day grid.
const HOUR_HEIGHT: f64 = 100.0;
/// Top offset of the day grid, above the 00:00 line.
const GRID_OFFSET: f64 = 20.0;

/// A calendar event as fetched for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEvent {
    pub subject: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Online meeting link, when the event has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_url: Option<String>,
}

impl DayEvent {
    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }

    pub fn duration_minutes(&self) -> i64 {
        self.interval().duration_minutes()
    }
}

/// Column placement for the event at `index` in the input slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnAssignment {
    pub index: usize,
    pub column_index: usize,
    pub total_columns: usize,
}

/// A day event together with its column placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEvent {
    #[serde(flatten)]
    pub event: DayEvent,
    pub column_index: usize,
    pub total_columns: usize,
}

impl LayoutEvent {
    /// Vertical offset of the event in a day grid drawn in `zone`.
    pub fn top_position<Z: TimeZone>(&self, zone: &Z) -> f64 {
        let local_start = self.event.start.with_timezone(zone);
        local_start.hour() as f64 * HOUR_HEIGHT
            + local_start.minute() as f64 * (HOUR_HEIGHT / 60.0)
            + GRID_OFFSET
    }

    pub fn visual_height(&self) -> f64 {
        self.event.duration_minutes() as f64 * (HOUR_HEIGHT / 60.0)
    }

    /// Share of the row width each column gets in this event's overlap group.
    pub fn width_fraction(&self) -> f64 {
        1.0 / self.total_columns as f64
    }
}

/// Assign every interval a column and the column count of its overlap group.
///
/// Returns one [`ColumnAssignment`] per input interval, in layout order
/// (ascending start, longer first on equal starts, then input order). Each
/// assignment carries the position of its interval in `intervals`.
pub fn assign_columns(intervals: &[Interval]) -> Vec<ColumnAssignment> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    // Stable sort: equal start and duration keep input order.
    order.sort_by(|&a, &b| {
        let (a, b) = (&intervals[a], &intervals[b]);
        a.start
            .cmp(&b.start)
            .then_with(|| (b.end - b.start).cmp(&(a.end - a.start)))
    });

    // End time of the event last placed in each column.
    let mut column_ends: Vec<DateTime<Utc>> = Vec::new();
    let mut columns = vec![0usize; intervals.len()];
    for &i in &order {
        let interval = &intervals[i];
        let column = match column_ends.iter().position(|end| *end <= interval.start) {
            Some(column) => {
                column_ends[column] = interval.end;
                column
            }
            None => {
                column_ends.push(interval.end);
                column_ends.len() - 1
            }
        };
        columns[i] = column;
    }

    order
        .iter()
        .map(|&i| {
            let widest = intervals
                .iter()
                .enumerate()
                .filter(|(j, other)| *j == i || intervals[i].overlaps(other))
                .map(|(j, _)| columns[j])
                .max()
                .unwrap_or(columns[i]);
            ColumnAssignment {
                index: i,
                column_index: columns[i],
                total_columns: widest + 1,
            }
        })
        .collect()
}

/// Lay out a day's events, returning new records in layout order.
pub fn lay_out_day(events: &[DayEvent]) -> Vec<LayoutEvent> {
    let intervals: Vec<Interval> = events.iter().map(DayEvent::interval).collect();

    assign_columns(&intervals)
        .into_iter()
        .map(|assignment| LayoutEvent {
            event: events[assignment.index].clone(),
            column_index: assignment.column_index,
            total_columns: assignment.total_columns,
        })
        .collect()
}
