//! # meet-engine
//!
//! Multi-attendee free/busy computation and day-view column layout for
//! meeting schedulers.
//!
//! Two pure algorithms sit at the core. The availability engine merges every
//! attendee's busy intervals and derives the free time the group shares inside
//! a working-day window. The layout engine packs a day's events into
//! side-by-side columns so overlapping events never collide on screen. Busy
//! intervals that touch are merged; events that touch do not collide.
//!
//! Around them, [`scheduler::Scheduler`] fetches data from a
//! [`directory::CalendarDirectory`] handed to it per call, normalises local
//! times to UTC and decides how fetch failures are treated.
//!
//! ## Modules
//!
//! - [`interval`]: `Interval` and `WorkWindow` primitives
//! - [`freebusy`]: merge busy intervals, compute free slots
//! - [`availability`]: per-attendee schedules merged into group availability
//! - [`conflict`]: busy intervals colliding with a proposed meeting
//! - [`layout`]: day-view column assignment
//! - [`zone`] / [`dst`]: local wall-clock times to UTC
//! - [`directory`]: the calendar data source trait and an in-memory snapshot
//! - [`scheduler`]: per-request service tying it all together
//! - [`config`]: scheduling configuration
//! - [`error`]: Error types

pub mod availability;
pub mod config;
pub mod conflict;
pub mod directory;
pub mod dst;
pub mod error;
pub mod freebusy;
pub mod interval;
pub mod layout;
pub mod scheduler;
pub mod zone;

pub use availability::{common_free_slots, merge_availability, AttendeeSchedule, PrivacyLevel};
pub use config::SchedulingConfig;
pub use directory::{CalendarDirectory, DirectoryError, InMemoryDirectory};
pub use error::MeetError;
pub use freebusy::{compute_free_slots, merge_busy_intervals, FreeSlot};
pub use interval::{Interval, WorkWindow};
pub use layout::{assign_columns, lay_out_day, DayEvent, LayoutEvent};
pub use scheduler::{MeetingProposal, ProposalVerdict, Scheduler};
