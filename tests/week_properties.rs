// Property-based tests for the week window math.

use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;

use salon_agenda::utils::date::{week_days, week_start};

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2100, 1u32..=365).prop_map(|(year, ordinal)| {
        NaiveDate::from_yo_opt(year, ordinal)
            .unwrap_or_else(|| NaiveDate::from_yo_opt(year, 1).unwrap())
    })
}

proptest! {
    #[test]
    fn week_has_seven_consecutive_days_containing_reference(reference in arb_date()) {
        let days = week_days(reference, 0);

        prop_assert_eq!(days.len(), 7);
        for pair in days.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
        prop_assert!(days.contains(&reference));
    }

    #[test]
    fn week_starts_on_configured_day(reference in arb_date(), first_day in 0u8..7) {
        let days = week_days(reference, first_day);
        prop_assert_eq!(
            days[0].weekday().num_days_from_sunday() as u8,
            first_day
        );
    }

    #[test]
    fn forward_then_back_restores_the_window(reference in arb_date()) {
        let there = reference + Duration::days(7);
        let back = there - Duration::days(7);
        prop_assert_eq!(week_days(back, 0), week_days(reference, 0));
    }

    #[test]
    fn every_day_of_a_week_maps_to_the_same_window(reference in arb_date()) {
        let start = week_start(reference, 0);
        let expected = week_days(start, 0);
        for offset in 0..7 {
            prop_assert_eq!(week_days(start + Duration::days(offset), 0), expected.clone());
        }
    }

    #[test]
    fn adjacent_weeks_do_not_overlap(reference in arb_date()) {
        let this_week = week_days(reference, 0);
        let next_week = week_days(reference + Duration::days(7), 0);
        prop_assert_eq!(*next_week.first().unwrap(), *this_week.last().unwrap() + Duration::days(1));
    }
}
