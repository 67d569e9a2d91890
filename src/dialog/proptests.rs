//! Property tests for the resolver, the interpreters, and slot merging

use super::interpret::{self, Operation, Variable};
use super::state::Slots;
use super::timeframe::{self, BASELINE_SHIFT_YEARS};
use crate::nlu::Entity;
use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

const UNITS: &[&str] = &[
    "week",
    "month",
    "year",
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

fn arb_today() -> impl Strategy<Value = NaiveDate> {
    (2005i32..2095, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(28, |last| last.day())
}

proptest! {
    #[test]
    fn resolved_ranges_are_ordered(
        today in arb_today(),
        unit in prop::sample::select(UNITS),
    ) {
        let range = timeframe::resolve(&format!("last {unit}"), today).unwrap();
        prop_assert!(range.start.unwrap() <= range.end.unwrap());
    }

    #[test]
    fn baseline_shift_is_exactly_two_years(
        today in arb_today(),
        unit in prop::sample::select(UNITS),
    ) {
        let shifted = timeframe::resolve(&format!("last {unit}"), today).unwrap();
        let (nominal_start, nominal_end) = timeframe::nominal_range(unit, today).unwrap();

        for (shifted_date, nominal) in [
            (shifted.start.unwrap(), nominal_start),
            (shifted.end.unwrap(), nominal_end),
        ] {
            prop_assert_eq!(shifted_date.year(), nominal.year() - BASELINE_SHIFT_YEARS);
            prop_assert_eq!(shifted_date.month(), nominal.month());
            // Day preserved except when the target month is shorter.
            let clamped = nominal
                .day()
                .min(days_in_month(shifted_date.year(), shifted_date.month()));
            prop_assert_eq!(shifted_date.day(), clamped);
        }
    }

    #[test]
    fn resolution_is_deterministic(
        today in arb_today(),
        unit in prop::sample::select(UNITS),
    ) {
        let phrase = format!("last {unit}");
        prop_assert_eq!(
            timeframe::resolve(&phrase, today).unwrap(),
            timeframe::resolve(&phrase, today).unwrap()
        );
    }

    #[test]
    fn usual_is_always_unbounded(today in arb_today()) {
        prop_assert!(timeframe::resolve("usual", today).unwrap().is_unbounded());
    }

    #[test]
    fn temperature_substring_always_names_the_variable(
        prefix in "[a-z ]{0,12}",
        suffix in "[a-z ]{0,12}",
    ) {
        let phrase = format!("{prefix}temperature{suffix}");
        prop_assert_eq!(interpret::variable(&phrase).unwrap(), Variable::Temperature);
    }

    #[test]
    fn average_substring_always_means_mean(
        prefix in "[a-z ]{0,12}",
        suffix in "[a-z ]{0,12}",
    ) {
        let phrase = format!("{prefix}average{suffix}");
        prop_assert_eq!(interpret::operation(&phrase).unwrap(), Operation::Mean);
    }

    #[test]
    fn merging_never_clears_a_filled_slot(
        entities in proptest::collection::vec(
            (
                prop::sample::select(&[
                    "location",
                    "condition",
                    "timebounding",
                    "timemodifier",
                    "sentiment",
                ][..]),
                "[a-z]{1,8}",
            ),
            0..8,
        ),
    ) {
        let mut slots = Slots {
            location: Some("exeter".to_string()),
            condition: Some("hotter".to_string()),
            timebounding: Some("last week".to_string()),
            timemodifier: Some("is".to_string()),
        };
        let entities: Vec<Entity> = entities
            .into_iter()
            .map(|(entity_type, value)| Entity::new(entity_type, value))
            .collect();

        slots.merge(&entities);

        prop_assert!(slots.location.is_some());
        prop_assert!(slots.condition.is_some());
        prop_assert!(slots.timebounding.is_some());
        prop_assert!(slots.timemodifier.is_some());
    }
}
