//! Normalise raw directory schedules to UTC intervals.
//!
//! The directory reports busy periods as local wall-clock times, each with the
//! IANA zone it was recorded in. Everything downstream works on UTC instants,
//! so conversion happens here, once, before any interval reaches the engines.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::availability::AttendeeSchedule;
use crate::dst::{self, DstPolicy};
use crate::error::{MeetError, Result};
use crate::interval::{Interval, WorkWindow};

/// Free/busy status of a schedule item, as reported by the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FreeBusyStatus {
    Free,
    Tentative,
    #[default]
    Busy,
    #[serde(rename = "oof")]
    OutOfOffice,
    WorkingElsewhere,
    Unknown,
}

impl FreeBusyStatus {
    /// Everything except `Free` blocks the attendee.
    pub fn is_busy(self) -> bool {
        self != FreeBusyStatus::Free
    }
}

/// One schedule entry in the directory's local-time representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// IANA zone of `start`/`end`. `None` means UTC.
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub status: FreeBusyStatus,
}

/// The raw schedule of one attendee, before normalisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSchedule {
    pub attendee: String,
    #[serde(default)]
    pub items: Vec<ScheduleItem>,
}

/// Parse an IANA zone identifier.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse().map_err(|_| MeetError::InvalidTimezone(name.to_string()))
}

/// Convert schedule items to UTC busy intervals, sorted by start.
///
/// `Free` items are dropped. Any item with an unknown zone or an unresolvable
/// local time fails the whole batch, so partial data never reaches the
/// engines.
pub fn normalize_items(items: &[ScheduleItem], policy: DstPolicy) -> Result<Vec<Interval>> {
    let mut busy = items
        .iter()
        .filter(|item| item.status.is_busy())
        .map(|item| {
            let zone = match item.time_zone.as_deref() {
                Some(name) => parse_timezone(name)?,
                None => Tz::UTC,
            };
            Ok(Interval::new(
                dst::resolve_local(item.start, zone, policy)?,
                dst::resolve_local(item.end, zone, policy)?,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    busy.sort_by_key(|interval| interval.start);
    Ok(busy)
}

/// Normalise a raw schedule into an [`AttendeeSchedule`].
pub fn normalize_schedule(raw: &RawSchedule, policy: DstPolicy) -> Result<AttendeeSchedule> {
    Ok(AttendeeSchedule::new(
        raw.attendee.clone(),
        normalize_items(&raw.items, policy)?,
    ))
}

/// The work window of `date` between two local times in `zone`.
pub fn work_window_for_day(
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    zone: Tz,
    policy: DstPolicy,
) -> Result<WorkWindow> {
    Ok(WorkWindow::new(
        dst::resolve_local(date.and_time(start), zone, policy)?,
        dst::resolve_local(date.and_time(end), zone, policy)?,
    ))
}

/// Local midnight of `date` to local midnight of the next day, in `zone`.
pub fn day_bounds(date: NaiveDate, zone: Tz, policy: DstPolicy) -> Result<WorkWindow> {
    let next = date
        .checked_add_days(Days::new(1))
        .ok_or_else(|| MeetError::InvalidConfig(format!("no day after {date}")))?;
    Ok(WorkWindow::new(
        dst::resolve_local(date.and_time(NaiveTime::MIN), zone, policy)?,
        dst::resolve_local(next.and_time(NaiveTime::MIN), zone, policy)?,
    ))
}
