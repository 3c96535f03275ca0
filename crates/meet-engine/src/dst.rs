//! DST transition policies for local wall-clock times.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{MeetError, Result};

/// Policy for local times that fall in a DST gap (e.g. 02:30 on a
/// spring-forward night). Ambiguous fall-back times always resolve to the
/// earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Refuse the time with [`MeetError::NonexistentLocalTime`].
    Reject,
    /// Shift to the same wall-clock offset after the gap.
    #[default]
    ShiftForward,
}

/// Resolve a local wall-clock time in `zone` to a UTC instant.
pub fn resolve_local(naive: NaiveDateTime, zone: Tz, policy: DstPolicy) -> Result<DateTime<Utc>> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => match policy {
            DstPolicy::Reject => Err(nonexistent(naive, zone)),
            DstPolicy::ShiftForward => {
                // One-hour shift; wider historical gaps are still rejected.
                match zone.from_local_datetime(&(naive + Duration::hours(1))) {
                    LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                        Ok(dt.with_timezone(&Utc))
                    }
                    LocalResult::None => Err(nonexistent(naive, zone)),
                }
            }
        },
    }
}

fn nonexistent(time: NaiveDateTime, zone: Tz) -> MeetError {
    MeetError::NonexistentLocalTime {
        time,
        zone: zone.name().to_string(),
    }
}
