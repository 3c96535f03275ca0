//! WASM bindings for meet-engine.
//!
//! Exposes busy-interval merging, free-slot computation and day-view column
//! layout to JavaScript via `wasm-bindgen`. All complex types are passed as
//! JSON strings. The JSON-level functions live in [`json`] so they can be
//! exercised natively; the exports below only convert errors to `JsValue`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p meet-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/meet_engine_wasm.wasm
//! ```

use wasm_bindgen::prelude::*;

pub mod json {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use meet_engine::{Interval, WorkWindow};
    use serde::{Deserialize, Serialize};

    // -----------------------------------------------------------------------
    // Serde-friendly DTOs for crossing the WASM boundary as JSON
    // -----------------------------------------------------------------------

    #[derive(Serialize)]
    struct IntervalDto {
        start: String,
        end: String,
    }

    impl From<&Interval> for IntervalDto {
        fn from(i: &Interval) -> Self {
            Self {
                start: i.start.to_rfc3339(),
                end: i.end.to_rfc3339(),
            }
        }
    }

    #[derive(Serialize)]
    struct FreeSlotDto {
        start: String,
        end: String,
        duration_minutes: i64,
    }

    #[derive(Serialize)]
    struct LayoutDto {
        index: usize,
        start: String,
        end: String,
        column_index: usize,
        total_columns: usize,
    }

    /// Input format for intervals passed from JavaScript.
    #[derive(Deserialize)]
    struct IntervalInput {
        start: String,
        end: String,
    }

    /// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
    ///
    /// Accepts both RFC 3339 (with offset, e.g. "2026-03-16T09:00:00+01:00")
    /// and naive time (e.g. "2026-03-16T09:00:00"), which is taken as UTC.
    pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .map(|ndt| ndt.and_utc())
            .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
    }

    /// Convert a JSON array of `{start, end}` objects into intervals.
    fn parse_intervals(json: &str) -> Result<Vec<Interval>, String> {
        let inputs: Vec<IntervalInput> =
            serde_json::from_str(json).map_err(|e| format!("Invalid intervals JSON: {}", e))?;

        inputs
            .into_iter()
            .map(|input| {
                Ok(Interval::new(
                    parse_datetime(&input.start)?,
                    parse_datetime(&input.end)?,
                ))
            })
            .collect()
    }

    fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
        serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
    }

    /// Merge a JSON array of busy intervals into disjoint `{start, end}` objects.
    pub fn merge_busy_intervals(intervals_json: &str) -> Result<String, String> {
        let intervals = parse_intervals(intervals_json)?;
        let merged = meet_engine::merge_busy_intervals(&intervals);
        to_json(&merged.iter().map(IntervalDto::from).collect::<Vec<_>>())
    }

    /// Free slots of `[window_start, window_end)` left by the busy intervals.
    pub fn find_free_slots(
        busy_json: &str,
        window_start: &str,
        window_end: &str,
    ) -> Result<String, String> {
        let busy = parse_intervals(busy_json)?;
        let window = WorkWindow::new(parse_datetime(window_start)?, parse_datetime(window_end)?);

        let slots = meet_engine::freebusy::find_free_slots(&busy, window);

        to_json(
            &slots
                .iter()
                .map(|s| FreeSlotDto {
                    start: s.start.to_rfc3339(),
                    end: s.end.to_rfc3339(),
                    duration_minutes: s.duration_minutes,
                })
                .collect::<Vec<_>>(),
        )
    }

    /// Column layout of a JSON array of events, in layout order. `index`
    /// points back into the input array.
    pub fn assign_columns(events_json: &str) -> Result<String, String> {
        let intervals = parse_intervals(events_json)?;
        let layout = meet_engine::assign_columns(&intervals);

        to_json(
            &layout
                .iter()
                .map(|a| LayoutDto {
                    index: a.index,
                    start: intervals[a.index].start.to_rfc3339(),
                    end: intervals[a.index].end.to_rfc3339(),
                    column_index: a.column_index,
                    total_columns: a.total_columns,
                })
                .collect::<Vec<_>>(),
        )
    }
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Merge overlapping or touching busy intervals.
///
/// `intervals_json` is a JSON array of `{start, end}` objects with ISO 8601
/// datetime strings. Returns a JSON array of disjoint `{start, end}` objects.
#[wasm_bindgen(js_name = "mergeBusyIntervals")]
pub fn merge_busy_intervals(intervals_json: &str) -> Result<String, JsValue> {
    json::merge_busy_intervals(intervals_json).map_err(|e| JsValue::from_str(&e))
}

/// Find free time slots within a window, given a list of busy intervals.
///
/// Returns a JSON array of `{start, end, duration_minutes}` objects.
#[wasm_bindgen(js_name = "findFreeSlots")]
pub fn find_free_slots(
    busy_json: &str,
    window_start: &str,
    window_end: &str,
) -> Result<String, JsValue> {
    json::find_free_slots(busy_json, window_start, window_end).map_err(|e| JsValue::from_str(&e))
}

/// Assign day-view columns to a JSON array of `{start, end}` events.
///
/// Returns a JSON array of `{index, start, end, column_index, total_columns}`
/// objects in layout order.
#[wasm_bindgen(js_name = "assignColumns")]
pub fn assign_columns(events_json: &str) -> Result<String, JsValue> {
    json::assign_columns(events_json).map_err(|e| JsValue::from_str(&e))
}
