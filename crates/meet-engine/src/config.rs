//! Scheduling configuration.

use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::DstPolicy;
use crate::error::{MeetError, Result};
use crate::zone;

/// Daily working hours in the reference zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Default for WorkHours {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(8, 0, 0).expect("08:00 is a valid time"),
            end: NaiveTime::from_hms_opt(17, 0, 0).expect("17:00 is a valid time"),
        }
    }
}

/// What to do when the directory fails to deliver an attendee's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchFailurePolicy {
    /// Surface the failure to the caller; nothing is computed.
    #[default]
    Fail,
    /// Log it and carry on as if there were no busy time / no events.
    TreatAsEmpty,
}

/// Configuration for the scheduling service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// IANA zone work windows and day views are built in.
    pub reference_timezone: String,
    pub work_hours: WorkHours,
    /// Granularity requested from the directory's free/busy lookup.
    pub availability_interval_minutes: u32,
    pub fetch_failure: FetchFailurePolicy,
    pub dst_policy: DstPolicy,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            reference_timezone: "Europe/Warsaw".to_string(),
            work_hours: WorkHours::default(),
            availability_interval_minutes: 30,
            fetch_failure: FetchFailurePolicy::default(),
            dst_policy: DstPolicy::default(),
        }
    }
}

impl SchedulingConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| MeetError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_reference_timezone(mut self, zone: impl Into<String>) -> Self {
        self.reference_timezone = zone.into();
        self
    }

    pub fn with_work_hours(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.work_hours = WorkHours { start, end };
        self
    }

    pub fn with_availability_interval(mut self, minutes: u32) -> Self {
        self.availability_interval_minutes = minutes;
        self
    }

    pub fn with_fetch_failure(mut self, policy: FetchFailurePolicy) -> Self {
        self.fetch_failure = policy;
        self
    }

    pub fn with_dst_policy(mut self, policy: DstPolicy) -> Self {
        self.dst_policy = policy;
        self
    }

    /// The parsed reference zone.
    pub fn reference_zone(&self) -> Result<Tz> {
        zone::parse_timezone(&self.reference_timezone)
    }

    /// Check that the zone parses, work hours are ordered and the interval is
    /// non-zero.
    pub fn validate(&self) -> Result<()> {
        self.reference_zone()?;
        if self.work_hours.start >= self.work_hours.end {
            return Err(MeetError::InvalidConfig(format!(
                "work hours start {} is not before end {}",
                self.work_hours.start, self.work_hours.end
            )));
        }
        if self.availability_interval_minutes == 0 {
            return Err(MeetError::InvalidConfig(
                "availability interval must be at least one minute".to_string(),
            ));
        }
        Ok(())
    }
}
