//! Tests for day anchoring and timezone-aware grouping.

use chrono::{NaiveDate, TimeZone, Utc};
use schedule_engine::{
    day_start, group_appointments_on, minute_offset, Appointment, GroupingOptions, ScheduleError,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn utc_day_starts_at_midnight_utc() {
    let start = day_start(date(2026, 3, 2), "UTC").unwrap();
    assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap());
}

#[test]
fn berlin_winter_day_starts_an_hour_before_utc_midnight() {
    let start = day_start(date(2026, 1, 15), "Europe/Berlin").unwrap();
    assert_eq!(start, Utc.with_ymd_and_hms(2026, 1, 14, 23, 0, 0).unwrap());
}

#[test]
fn new_york_summer_day_starts_at_four_utc() {
    let start = day_start(date(2026, 7, 1), "America/New_York").unwrap();
    assert_eq!(start, Utc.with_ymd_and_hms(2026, 7, 1, 4, 0, 0).unwrap());
}

#[test]
fn skipped_midnight_resolves_after_the_gap() {
    // Santiago springs forward at 00:00 local: 2026-09-06 00:00 does not exist.
    let start = day_start(date(2026, 9, 6), "America/Santiago").unwrap();
    // 01:00 local (UTC-3) is the first valid instant.
    assert_eq!(start, Utc.with_ymd_and_hms(2026, 9, 6, 4, 0, 0).unwrap());
}

#[test]
fn unknown_timezone_is_rejected() {
    let err = day_start(date(2026, 3, 2), "Mars/Olympus_Mons").unwrap_err();
    assert_eq!(
        err,
        ScheduleError::InvalidTimezone("Mars/Olympus_Mons".to_string())
    );
}

#[test]
fn minute_offset_counts_from_day_start() {
    let anchor = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
    let nine_thirty = Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap();
    let yesterday = Utc.with_ymd_and_hms(2026, 3, 1, 23, 0, 0).unwrap();

    assert_eq!(minute_offset(nine_thirty, anchor), 570);
    assert_eq!(minute_offset(yesterday, anchor), -60);
}

#[test]
fn grouping_on_a_local_day_anchors_to_local_midnight() {
    // 09:00-10:00 and 10:00-10:30 Berlin time (UTC+1 in winter).
    let appts = vec![
        Appointment::new(
            "A",
            Utc.with_ymd_and_hms(2026, 1, 15, 8, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
        ),
        Appointment::new(
            "B",
            Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap(),
        ),
    ];

    let groups = group_appointments_on(
        &appts,
        date(2026, 1, 15),
        "Europe/Berlin",
        &GroupingOptions::default(),
    )
    .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups[0].start_time,
        Utc.with_ymd_and_hms(2026, 1, 15, 8, 0, 0).unwrap()
    );
    assert_eq!(
        groups[0].end_time,
        Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap()
    );
}

#[test]
fn grouping_on_unknown_timezone_fails() {
    let result = group_appointments_on::<Appointment>(
        &[],
        date(2026, 3, 2),
        "Not/AZone",
        &GroupingOptions::default(),
    );
    assert!(matches!(result, Err(ScheduleError::InvalidTimezone(_))));
}
