// Date utility functions for the week grid

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveTime};

use crate::models::settings::BusinessHours;

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// The 7 consecutive days displayed for the week containing `reference`.
///
/// Deterministic for a given reference date; the time-of-day component of
/// "now" never enters the computation.
pub fn week_days(reference: NaiveDate, first_day_of_week: u8) -> Vec<NaiveDate> {
    let start = week_start(reference, first_day_of_week);
    (0..7).map(|i| start + Duration::days(i)).collect()
}

/// The fixed row axis of the grid: one tick every `slot_minutes` from
/// opening (inclusive) to closing (exclusive).
pub fn time_slots(hours: &BusinessHours) -> Vec<NaiveTime> {
    let step = hours.slot_minutes.max(1) as i64;
    let mut slots = Vec::new();
    let mut tick = hours.open;
    while tick < hours.close {
        slots.push(tick);
        let next = tick + Duration::minutes(step);
        // NaiveTime arithmetic wraps at midnight; stop instead of looping.
        if next <= tick {
            break;
        }
        tick = next;
    }
    slots
}

pub fn is_same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

/// Whether `date` is today's calendar date in the local zone.
pub fn is_today(date: NaiveDate) -> bool {
    date == Local::now().date_naive()
}

/// Weekday names rotated so the configured first day comes first.
pub fn day_names(first_day_of_week: u8) -> Vec<&'static str> {
    let all_days = [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ];
    let start = first_day_of_week as usize;
    let mut result = Vec::with_capacity(7);
    for i in 0..7 {
        result.push(all_days[(start + i) % 7]);
    }
    result
}

/// Format a date in short form based on the date format setting.
pub fn format_short_date(date: NaiveDate, date_format: &str) -> String {
    if date_format.starts_with("DD/MM") || date_format.starts_with("dd/mm") {
        date.format("%d/%m").to_string()
    } else if date_format.starts_with("YYYY") || date_format.starts_with("yyyy") {
        date.format("%Y/%m/%d").to_string()
    } else {
        date.format("%m/%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(open: (u32, u32), close: (u32, u32), slot: u32) -> BusinessHours {
        BusinessHours {
            open: NaiveTime::from_hms_opt(open.0, open.1, 0).unwrap(),
            close: NaiveTime::from_hms_opt(close.0, close.1, 0).unwrap(),
            slot_minutes: slot,
        }
    }

    #[test]
    fn test_week_start_sunday() {
        // Wednesday, Dec 4, 2024
        let date = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
        let start = week_start(date, 0);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
    }

    #[test]
    fn test_week_start_monday() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
        let start = week_start(date, 1);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 2).unwrap());
    }

    #[test]
    fn test_week_days_seven_consecutive_containing_reference() {
        let reference = NaiveDate::from_ymd_opt(2025, 1, 29).unwrap();
        let days = week_days(reference, 0);

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].weekday().num_days_from_sunday(), 0);
        for pair in days.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
        assert!(days.contains(&reference));
    }

    #[test]
    fn test_week_days_ignores_reference_position_in_week() {
        // Every day of one week maps to the same window.
        let sunday = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let expected = week_days(sunday, 0);
        for offset in 0..7 {
            let reference = sunday + Duration::days(offset);
            assert_eq!(week_days(reference, 0), expected);
        }
    }

    #[test]
    fn test_week_navigation_round_trip_across_month_boundary() {
        // Jan 29 -> Feb 5 -> Jan 29 must land on the same window.
        let reference = NaiveDate::from_ymd_opt(2025, 1, 29).unwrap();
        let forward = reference + Duration::days(7);
        let back = forward - Duration::days(7);
        assert_eq!(week_days(back, 0), week_days(reference, 0));
    }

    #[test]
    fn test_time_slots_half_hourly() {
        let slots = time_slots(&hours((9, 0), (11, 0), 30));
        assert_eq!(
            slots,
            vec![
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
                NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            ]
        );
    }

    #[test]
    fn test_time_slots_exclusive_of_close() {
        let slots = time_slots(&hours((9, 0), (19, 0), 60));
        assert_eq!(slots.len(), 10);
        assert_eq!(*slots.last().unwrap(), NaiveTime::from_hms_opt(18, 0, 0).unwrap());
    }

    #[test]
    fn test_time_slots_empty_when_closed() {
        let slots = time_slots(&hours((9, 0), (9, 0), 30));
        assert!(slots.is_empty());
    }

    #[test]
    fn test_is_today_uses_calendar_date_only() {
        let today = Local::now().date_naive();
        assert!(is_today(today));
        assert!(!is_today(today + Duration::days(1)));
        assert!(!is_today(today - Duration::days(1)));
    }

    #[test]
    fn test_day_names_rotation() {
        let sunday_first = day_names(0);
        assert_eq!(sunday_first[0], "Sunday");
        assert_eq!(sunday_first[6], "Saturday");

        let monday_first = day_names(1);
        assert_eq!(monday_first[0], "Monday");
        assert_eq!(monday_first[6], "Sunday");
    }

    #[test]
    fn test_format_short_date_variants() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
        assert_eq!(format_short_date(date, "MM/DD/YYYY"), "12/04");
        assert_eq!(format_short_date(date, "DD/MM/YYYY"), "04/12");
        assert_eq!(format_short_date(date, "YYYY/MM/DD"), "2024/12/04");
    }
}
