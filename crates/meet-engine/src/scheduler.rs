//! Scheduling service: fetch, normalise, compute.
//!
//! A [`Scheduler`] borrows a [`CalendarDirectory`] and a [`SchedulingConfig`]
//! for the duration of one request. It assembles the inputs of the
//! availability and layout engines and decides, per the configured
//! [`FetchFailurePolicy`], what happens when the directory lets it down.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::availability::{self, AttendeeSchedule, GroupAvailability, PrivacyLevel};
use crate::config::{FetchFailurePolicy, SchedulingConfig};
use crate::conflict::{self, Conflict};
use crate::directory::CalendarDirectory;
use crate::dst;
use crate::error::{MeetError, Result};
use crate::freebusy::{self, FreeSlot};
use crate::interval::{Interval, WorkWindow};
use crate::layout::{self, LayoutEvent};
use crate::zone::{self, RawSchedule};

/// A meeting someone wants to create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingProposal {
    pub organizer: String,
    pub attendees: Vec<String>,
    pub start: DateTime<Utc>,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl MeetingProposal {
    pub fn interval(&self) -> Interval {
        Interval::new(
            self.start,
            self.start + Duration::minutes(i64::from(self.duration_minutes)),
        )
    }
}

/// Outcome of checking a proposal against the group's free time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalVerdict {
    pub accepted: bool,
    pub proposed: Interval,
    /// Subject carried over from the proposal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Free slots of organizer and attendees on the proposal's day.
    pub free_slots: Vec<FreeSlot>,
    /// Busy intervals colliding with the proposal; empty when accepted.
    #[serde(default)]
    pub conflicts: Vec<Conflict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Split a comma-separated attendee list, trimming and dropping empty entries.
pub fn parse_attendee_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct Scheduler<'a, D: CalendarDirectory + ?Sized> {
    directory: &'a D,
    config: &'a SchedulingConfig,
}

impl<'a, D: CalendarDirectory + ?Sized> Scheduler<'a, D> {
    pub fn new(directory: &'a D, config: &'a SchedulingConfig) -> Self {
        Self { directory, config }
    }

    pub fn config(&self) -> &SchedulingConfig {
        self.config
    }

    /// The work window of `date` in the reference zone.
    pub fn work_window(&self, date: NaiveDate) -> Result<WorkWindow> {
        zone::work_window_for_day(
            date,
            self.config.work_hours.start,
            self.config.work_hours.end,
            self.config.reference_zone()?,
            self.config.dst_policy,
        )
    }

    /// Interpret a wall-clock time in the reference zone.
    pub fn local_to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>> {
        dst::resolve_local(local, self.config.reference_zone()?, self.config.dst_policy)
    }

    /// The reference-zone calendar date of `instant`.
    pub fn local_date(&self, instant: DateTime<Utc>) -> Result<NaiveDate> {
        Ok(instant
            .with_timezone(&self.config.reference_zone()?)
            .date_naive())
    }

    /// Fetch and normalise the schedule of every attendee around `window`.
    pub fn schedules(
        &self,
        attendees: &[String],
        window: &WorkWindow,
    ) -> Result<Vec<AttendeeSchedule>> {
        attendees
            .iter()
            .map(|attendee| self.schedule(attendee, window))
            .collect()
    }

    fn schedule(&self, attendee: &str, window: &WorkWindow) -> Result<AttendeeSchedule> {
        let fetched = self
            .directory
            .schedule(attendee, window, self.config.availability_interval_minutes)
            .map_err(MeetError::from)
            .and_then(|items| {
                zone::normalize_schedule(
                    &RawSchedule {
                        attendee: attendee.to_string(),
                        items,
                    },
                    self.config.dst_policy,
                )
            });

        match (fetched, self.config.fetch_failure) {
            (Ok(schedule), _) => {
                debug!(attendee, busy = schedule.busy.len(), "fetched schedule");
                Ok(schedule)
            }
            (Err(e), FetchFailurePolicy::TreatAsEmpty) => {
                warn!(attendee, error = %e, "schedule unavailable, treating attendee as free");
                Ok(AttendeeSchedule::new(attendee, Vec::new()))
            }
            (Err(e), FetchFailurePolicy::Fail) => Err(e),
        }
    }

    /// Free time shared by all `attendees` during the work hours of `date`.
    ///
    /// An empty attendee list yields no slots and makes no directory calls.
    pub fn common_free_slots(&self, attendees: &[String], date: NaiveDate) -> Result<Vec<FreeSlot>> {
        if attendees.is_empty() {
            return Ok(Vec::new());
        }

        let window = self.work_window(date)?;
        let schedules = self.schedules(attendees, &window)?;
        let free = availability::common_free_slots(&schedules, window);
        debug!(
            attendees = attendees.len(),
            free = free.len(),
            %date,
            "computed common free slots"
        );
        Ok(free)
    }

    /// Busy blocks and free slots of the group during the work hours of `date`.
    pub fn availability(
        &self,
        attendees: &[String],
        date: NaiveDate,
        privacy: PrivacyLevel,
    ) -> Result<GroupAvailability> {
        let window = self.work_window(date)?;
        let schedules = if attendees.is_empty() {
            Vec::new()
        } else {
            self.schedules(attendees, &window)?
        };
        Ok(availability::merge_availability(&schedules, window, privacy))
    }

    /// Which of `attendees` are busy at `instant`.
    pub fn busy_at(&self, attendees: &[String], instant: DateTime<Utc>) -> Result<Vec<String>> {
        let window = zone::day_bounds(
            self.local_date(instant)?,
            self.config.reference_zone()?,
            self.config.dst_policy,
        )?;
        let schedules = self.schedules(attendees, &window)?;
        Ok(availability::busy_attendees_at(&schedules, instant)
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Accept `proposal` only if it fits inside one free slot shared by the
    /// organizer and every attendee. A proposal needs at least one attendee
    /// and a non-zero duration.
    pub fn check_proposal(&self, proposal: &MeetingProposal) -> Result<ProposalVerdict> {
        if proposal.attendees.is_empty() {
            warn!(organizer = %proposal.organizer, "proposal without attendees");
            return Err(MeetError::NoAttendees);
        }
        if proposal.duration_minutes == 0 {
            warn!(organizer = %proposal.organizer, "proposal without duration");
            return Err(MeetError::EmptyMeeting);
        }

        info!(
            organizer = %proposal.organizer,
            attendees = proposal.attendees.len(),
            start = %proposal.start,
            duration = proposal.duration_minutes,
            subject = proposal.subject.as_deref().unwrap_or_default(),
            "checking meeting proposal"
        );

        let mut everyone = Vec::with_capacity(proposal.attendees.len() + 1);
        everyone.push(proposal.organizer.clone());
        everyone.extend(proposal.attendees.iter().cloned());

        let date = self.local_date(proposal.start)?;
        let window = self.work_window(date)?;
        let schedules = self.schedules(&everyone, &window)?;
        let free_slots = availability::common_free_slots(&schedules, window);
        let proposed = proposal.interval();
        let accepted = freebusy::slot_fits(&free_slots, &proposed);
        let conflicts = if accepted {
            Vec::new()
        } else {
            conflict::find_conflicts(&schedules, &proposed)
        };

        let reason = if accepted {
            None
        } else {
            warn!(
                start = %proposed.start,
                end = %proposed.end,
                conflicts = conflicts.len(),
                "proposed time is taken"
            );
            let zone = self.config.reference_zone()?;
            let (from, to) = (
                proposed.start.with_timezone(&zone).format("%H:%M"),
                proposed.end.with_timezone(&zone).format("%H:%M"),
            );
            Some(if conflicts.is_empty() {
                format!("{from} - {to} is outside working hours")
            } else {
                format!("{from} - {to} is already taken by another meeting")
            })
        };

        Ok(ProposalVerdict {
            accepted,
            proposed,
            subject: proposal.subject.clone(),
            free_slots,
            conflicts,
            reason,
        })
    }

    /// `user`'s events on `date` (reference-zone midnight to midnight), laid
    /// out in columns.
    pub fn day_view(&self, user: &str, date: NaiveDate) -> Result<Vec<LayoutEvent>> {
        let window = zone::day_bounds(date, self.config.reference_zone()?, self.config.dst_policy)?;

        let events = match (self.directory.day_events(user, &window), self.config.fetch_failure) {
            (Ok(events), _) => events,
            (Err(e), FetchFailurePolicy::TreatAsEmpty) => {
                warn!(user, error = %e, "events unavailable, showing an empty day");
                Vec::new()
            }
            (Err(e), FetchFailurePolicy::Fail) => return Err(e.into()),
        };

        debug!(user, events = events.len(), %date, "laying out day");
        Ok(layout::lay_out_day(&events))
    }
}
