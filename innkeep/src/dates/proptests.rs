//! Property-based tests for `DateRange` and `Month`.

use super::{DateRange, Month};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    // Roughly 2020-01-01 through 2030-12-31
    (0i64..4018).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset)
    })
}

fn range_strategy() -> impl Strategy<Value = DateRange> {
    (date_strategy(), 1i64..30)
        .prop_map(|(start, nights)| DateRange::new(start, start + Duration::days(nights)))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn overlap_is_symmetric(a in range_strategy(), b in range_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn overlap_matches_shared_night(a in range_strategy(), b in range_strategy()) {
        let shares_night = a.start().iter_days()
            .take_while(|d| *d < a.end())
            .any(|d| b.contains_day(d));
        prop_assert_eq!(a.overlaps(&b), shares_night);
    }

    #[test]
    fn back_to_back_stays_never_overlap(a in range_strategy(), nights in 1i64..30) {
        let next = DateRange::new(a.end(), a.end() + Duration::days(nights));
        prop_assert!(!a.overlaps(&next));
    }

    #[test]
    fn range_overlaps_itself(a in range_strategy()) {
        prop_assert!(a.overlaps(&a));
    }

    #[test]
    fn inclusive_days_count_is_nights_plus_one(a in range_strategy()) {
        let count = i64::try_from(a.days_inclusive().count()).unwrap();
        prop_assert_eq!(count, a.nights() + 1);
    }

    #[test]
    fn month_contains_its_days(date in date_strategy()) {
        let month = Month::containing(date);
        prop_assert!(month.first_day() <= date);
        prop_assert!(date <= month.last_day());
        prop_assert_eq!(month.next().previous(), month);
        prop_assert_eq!(month.last_day() + Duration::days(1), month.next().first_day());
    }

    #[test]
    fn month_display_parses_back(date in date_strategy()) {
        let month = Month::containing(date);
        prop_assert_eq!(Month::parse(&month.to_string()).unwrap(), month);
    }
}
