//! Tests for proposal conflict detection.

use chrono::{TimeZone, Utc};
use meet_engine::availability::AttendeeSchedule;
use meet_engine::conflict::find_conflicts;
use meet_engine::Interval;

/// Helper to create an Interval from hour ranges on 2026-03-01.
fn interval(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> Interval {
    Interval::new(
        Utc.with_ymd_and_hms(2026, 3, 1, start_hour, start_min, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 1, end_hour, end_min, 0).unwrap(),
    )
}

#[test]
fn overlapping_busy_time_detected() {
    // Busy 09:00-10:00, proposal 09:30-10:30 → 30-min overlap
    let schedules = vec![AttendeeSchedule::new("a", vec![interval(9, 0, 10, 0)])];

    let conflicts = find_conflicts(&schedules, &interval(9, 30, 10, 30));

    assert_eq!(conflicts.len(), 1, "should detect exactly one conflict");
    assert_eq!(conflicts[0].attendee, "a");
    assert_eq!(conflicts[0].overlap_minutes, 30);
}

#[test]
fn non_overlapping_busy_time_no_conflict() {
    let schedules = vec![AttendeeSchedule::new("a", vec![interval(9, 0, 10, 0)])];

    assert!(find_conflicts(&schedules, &interval(11, 0, 12, 0)).is_empty());
}

#[test]
fn adjacent_busy_time_not_a_conflict() {
    // Busy 09:00-10:00 and 11:00-12:00, proposal 10:00-11:00 fits exactly between.
    let schedules = vec![AttendeeSchedule::new(
        "a",
        vec![interval(9, 0, 10, 0), interval(11, 0, 12, 0)],
    )];

    assert!(find_conflicts(&schedules, &interval(10, 0, 11, 0)).is_empty());
}

#[test]
fn proposal_containing_busy_time() {
    // Proposal 09:00-12:00 fully contains busy 10:00-11:00 → 60-min overlap
    let schedules = vec![AttendeeSchedule::new("a", vec![interval(10, 0, 11, 0)])];

    let conflicts = find_conflicts(&schedules, &interval(9, 0, 12, 0));

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].overlap_minutes, 60);
    assert_eq!(conflicts[0].busy, interval(10, 0, 11, 0));
}

#[test]
fn conflicts_reported_per_attendee() {
    let schedules = vec![
        AttendeeSchedule::new("a", vec![interval(9, 0, 10, 0)]),
        AttendeeSchedule::new("b", vec![]),
        AttendeeSchedule::new("c", vec![interval(9, 45, 11, 0)]),
    ];

    let conflicts = find_conflicts(&schedules, &interval(9, 30, 10, 0));

    let who: Vec<&str> = conflicts.iter().map(|c| c.attendee.as_str()).collect();
    assert_eq!(who, vec!["a", "c"]);
    assert_eq!(conflicts[0].overlap_minutes, 30);
    assert_eq!(conflicts[1].overlap_minutes, 15);
}
