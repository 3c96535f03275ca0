//! Error types for meet-engine operations.
//!
//! The interval algorithms themselves never fail; every variant here belongs to
//! the boundary where directory data is normalised or fetched.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::directory::DirectoryError;

#[derive(Error, Debug)]
pub enum MeetError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Local time {time} does not exist in {zone}")]
    NonexistentLocalTime { time: NaiveDateTime, zone: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No attendees given")]
    NoAttendees,

    #[error("Meeting duration must be at least one minute")]
    EmptyMeeting,

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),
}

pub type Result<T> = std::result::Result<T, MeetError>;
