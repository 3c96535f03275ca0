//! The calendar directory collaborator.
//!
//! The scheduling service never talks to a calendar backend directly: it is
//! handed a [`CalendarDirectory`] on every call. [`InMemoryDirectory`] is a
//! serde-loadable snapshot used by the CLI and in tests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interval::WorkWindow;
use crate::layout::DayEvent;
use crate::zone::ScheduleItem;

/// Failures reported by a directory implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Access denied for {0}")]
    AccessDenied(String),

    #[error("Directory unavailable: {0}")]
    Unavailable(String),
}

/// Source of schedules and events.
pub trait CalendarDirectory {
    /// Free/busy items of `attendee` around `window`, at the requested
    /// granularity. Items may extend past the window.
    fn schedule(
        &self,
        attendee: &str,
        window: &WorkWindow,
        interval_minutes: u32,
    ) -> Result<Vec<ScheduleItem>, DirectoryError>;

    /// Events on `user`'s calendar that overlap `window`.
    fn day_events(&self, user: &str, window: &WorkWindow) -> Result<Vec<DayEvent>, DirectoryError>;
}

/// Calendar data of one user in an [`InMemoryDirectory`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserCalendar {
    #[serde(default)]
    pub schedule: Vec<ScheduleItem>,
    #[serde(default)]
    pub events: Vec<DayEvent>,
}

/// A directory snapshot held in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryDirectory {
    #[serde(default)]
    pub users: BTreeMap<String, UserCalendar>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_user(mut self, user: impl Into<String>, calendar: UserCalendar) -> Self {
        self.users.insert(user.into(), calendar);
        self
    }

    fn user(&self, user: &str) -> Result<&UserCalendar, DirectoryError> {
        self.users
            .get(user)
            .ok_or_else(|| DirectoryError::UnknownUser(user.to_string()))
    }
}

impl CalendarDirectory for InMemoryDirectory {
    fn schedule(
        &self,
        attendee: &str,
        _window: &WorkWindow,
        _interval_minutes: u32,
    ) -> Result<Vec<ScheduleItem>, DirectoryError> {
        Ok(self.user(attendee)?.schedule.clone())
    }

    fn day_events(&self, user: &str, window: &WorkWindow) -> Result<Vec<DayEvent>, DirectoryError> {
        let bounds = window.as_interval();
        Ok(self
            .user(user)?
            .events
            .iter()
            .filter(|event| event.interval().overlaps(&bounds))
            .cloned()
            .collect())
    }
}
