//! Tests for busy-interval merging and free-slot computation.

use chrono::{DateTime, Duration, TimeZone, Utc};
use meet_engine::freebusy::{
    compute_free_slots, find_first_free_slot, find_free_slots, merge_busy_intervals, slot_fits,
};
use meet_engine::{Interval, WorkWindow};

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
}

/// Helper to create an Interval from hour ranges on 2026-03-16.
fn busy(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> Interval {
    Interval::new(at(start_hour, start_min), at(end_hour, end_min))
}

fn window(start_hour: u32, end_hour: u32) -> WorkWindow {
    WorkWindow::new(at(start_hour, 0), at(end_hour, 0))
}

// ── Merging ─────────────────────────────────────────────────────────────────

#[test]
fn merge_empty_input_is_empty() {
    assert!(merge_busy_intervals(&[]).is_empty());
}

#[test]
fn merge_overlapping_intervals() {
    // 09:00-10:00 and 09:30-11:00 → 09:00-11:00
    let merged = merge_busy_intervals(&[busy(9, 0, 10, 0), busy(9, 30, 11, 0)]);

    assert_eq!(merged, vec![busy(9, 0, 11, 0)]);
}

#[test]
fn merge_touching_intervals_into_one() {
    // 09:00-10:00 and 10:00-11:00 touch → a single 09:00-11:00 block
    let merged = merge_busy_intervals(&[busy(9, 0, 10, 0), busy(10, 0, 11, 0)]);

    assert_eq!(merged, vec![busy(9, 0, 11, 0)]);
}

#[test]
fn merge_sorts_unordered_input() {
    let merged = merge_busy_intervals(&[
        busy(14, 0, 15, 0),
        busy(9, 0, 10, 0),
        busy(11, 0, 12, 0),
    ]);

    assert_eq!(
        merged,
        vec![busy(9, 0, 10, 0), busy(11, 0, 12, 0), busy(14, 0, 15, 0)]
    );
}

#[test]
fn merge_nested_interval_keeps_outer_end() {
    // 09:00-12:00 contains 10:00-11:00; the later, shorter end must not shrink it.
    let merged = merge_busy_intervals(&[busy(9, 0, 12, 0), busy(10, 0, 11, 0)]);

    assert_eq!(merged, vec![busy(9, 0, 12, 0)]);
}

#[test]
fn merge_identical_intervals() {
    let merged = merge_busy_intervals(&[busy(9, 0, 10, 0), busy(9, 0, 10, 0)]);

    assert_eq!(merged, vec![busy(9, 0, 10, 0)]);
}

#[test]
fn merge_tolerates_zero_length_interval() {
    let merged = merge_busy_intervals(&[busy(10, 0, 10, 0), busy(9, 0, 10, 0)]);

    assert_eq!(merged, vec![busy(9, 0, 10, 0)]);
}

#[test]
fn merge_tolerates_reversed_interval() {
    // Unchecked input: must not panic, and the well-formed neighbour survives.
    let merged = merge_busy_intervals(&[busy(11, 0, 10, 0), busy(13, 0, 14, 0)]);

    assert_eq!(merged.len(), 2);
    assert_eq!(merged[1], busy(13, 0, 14, 0));
}

// ── Free slots ──────────────────────────────────────────────────────────────

#[test]
fn overlapping_busy_yields_two_free_slots() {
    // busy 09:00-10:00 + 09:30-11:00, window 08:00-17:00
    // → merged 09:00-11:00, free 08:00-09:00 and 11:00-17:00
    let merged = merge_busy_intervals(&[busy(9, 0, 10, 0), busy(9, 30, 11, 0)]);
    let free = compute_free_slots(&merged, window(8, 17));

    assert_eq!(free.len(), 2);
    assert_eq!((free[0].start, free[0].end), (at(8, 0), at(9, 0)));
    assert_eq!(free[0].duration_minutes, 60);
    assert_eq!((free[1].start, free[1].end), (at(11, 0), at(17, 0)));
    assert_eq!(free[1].duration_minutes, 360);
}

#[test]
fn no_busy_time_frees_the_whole_window() {
    let free = compute_free_slots(&[], window(8, 17));

    assert_eq!(free.len(), 1, "no busy time should produce one free slot");
    assert_eq!(free[0].start, at(8, 0));
    assert_eq!(free[0].end, at(17, 0));
    assert_eq!(free[0].duration_minutes, 540);
}

#[test]
fn busy_filling_entire_window_leaves_nothing() {
    let free = compute_free_slots(&[busy(8, 0, 17, 0)], window(8, 17));

    assert!(free.is_empty());
}

#[test]
fn busy_spilling_over_window_edges_is_clipped() {
    // 07:00-09:00 starts before the window, 16:00-19:00 ends after it.
    let merged = merge_busy_intervals(&[busy(7, 0, 9, 0), busy(16, 0, 19, 0)]);
    let free = compute_free_slots(&merged, window(8, 17));

    assert_eq!(free.len(), 1);
    assert_eq!((free[0].start, free[0].end), (at(9, 0), at(16, 0)));
}

#[test]
fn busy_entirely_outside_window_is_ignored() {
    let merged = merge_busy_intervals(&[busy(6, 0, 7, 0), busy(18, 0, 19, 0)]);
    let free = compute_free_slots(&merged, window(8, 17));

    assert_eq!(free.len(), 1);
    assert_eq!((free[0].start, free[0].end), (at(8, 0), at(17, 0)));
}

#[test]
fn busy_interval_behind_cursor_contributes_nothing() {
    // Unmerged input: 09:00-12:00 then 10:00-11:00. The cursor is already at
    // 12:00 when the nested interval arrives and must not move backwards.
    let free = compute_free_slots(&[busy(9, 0, 12, 0), busy(10, 0, 11, 0)], window(8, 17));

    assert_eq!(free.len(), 2);
    assert_eq!((free[1].start, free[1].end), (at(12, 0), at(17, 0)));
}

#[test]
fn zero_length_busy_splits_free_time() {
    let free = find_free_slots(&[busy(12, 0, 12, 0)], window(8, 17));

    assert_eq!(free.len(), 2);
    assert_eq!((free[0].start, free[0].end), (at(8, 0), at(12, 0)));
    assert_eq!((free[1].start, free[1].end), (at(12, 0), at(17, 0)));
}

#[test]
fn zero_length_busy_at_window_start_leaves_window_whole() {
    let free = find_free_slots(&[busy(8, 0, 8, 0)], window(8, 17));

    assert_eq!(free.len(), 1);
    assert_eq!((free[0].start, free[0].end), (at(8, 0), at(17, 0)));
}

#[test]
fn reversed_busy_is_skipped() {
    let free = compute_free_slots(&[busy(12, 0, 11, 0)], window(8, 17));

    assert_eq!(free.len(), 1);
    assert_eq!((free[0].start, free[0].end), (at(8, 0), at(17, 0)));
}

#[test]
fn empty_window_has_no_free_slots() {
    let free = compute_free_slots(&[], WorkWindow::new(at(12, 0), at(12, 0)));

    assert!(free.is_empty());
}

#[test]
fn multiple_gaps_between_busy_intervals() {
    // Window: 08:00-18:00; busy 09-10, 12-13, 15-16
    let free = find_free_slots(
        &[busy(15, 0, 16, 0), busy(9, 0, 10, 0), busy(12, 0, 13, 0)],
        window(8, 18),
    );

    let durations: Vec<i64> = free.iter().map(|s| s.duration_minutes).collect();
    assert_eq!(durations, vec![60, 120, 120, 120]);
}

// ── Helpers on free slots ───────────────────────────────────────────────────

#[test]
fn find_first_free_slot_with_minimum_duration() {
    // Busy 08:00-08:30 and 09:00-12:00 → gaps 08:30-09:00 (30), 12:00-17:00 (300)
    let free = find_free_slots(&[busy(8, 0, 8, 30), busy(9, 0, 12, 0)], window(8, 17));

    let slot = find_first_free_slot(&free, 60).expect("a 60 minute slot exists");
    assert_eq!(slot.start, at(12, 0));
    assert_eq!(slot.duration_minutes, 300);
}

#[test]
fn find_first_free_slot_none_large_enough() {
    let free = find_free_slots(&[busy(9, 0, 10, 0), busy(10, 15, 12, 0)], window(9, 12));

    assert!(find_first_free_slot(&free, 60).is_none());
}

#[test]
fn proposal_inside_a_free_slot_fits() {
    let free = find_free_slots(&[busy(9, 0, 10, 0)], window(8, 17));

    assert!(slot_fits(&free, &busy(10, 0, 10, 30)));
    assert!(slot_fits(&free, &busy(8, 0, 9, 0)));
}

#[test]
fn proposal_crossing_busy_time_does_not_fit() {
    let free = find_free_slots(&[busy(9, 0, 10, 0)], window(8, 17));

    assert!(!slot_fits(&free, &busy(8, 30, 9, 30)));
    assert!(!slot_fits(&free, &busy(16, 30, 17, 30)));
}

#[test]
fn free_slot_durations_sum_with_busy_to_window() {
    let merged = merge_busy_intervals(&[busy(9, 0, 10, 0), busy(13, 0, 14, 30)]);
    let free = compute_free_slots(&merged, window(8, 17));

    let free_total: i64 = free.iter().map(|s| s.duration_minutes).sum();
    let busy_total: i64 = merged.iter().map(Interval::duration_minutes).sum();
    assert_eq!(free_total + busy_total, Duration::hours(9).num_minutes());
}
