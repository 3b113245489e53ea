#[cfg(test)]
mod tests {
    use crate::availability::{min_allowed_instant, Availability};
    use crate::clock::{LocalClock, LocalInstant};
    use crate::fixtures::sample_rules;
    use crate::rules::{ResourceKey, ResourceRule, RuleSet, TimeOfDay};
    use crate::snap::{is_on_grid, snap};
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    // Helper function to build a second-precision instant from offsets
    fn instant(day_offset: i64, second_of_day: i64) -> LocalInstant {
        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        LocalClock::start_of_day(base + Duration::days(day_offset)) + Duration::seconds(second_of_day)
    }

    // Helper function to create rules with a single resource
    fn rules_with(step_minutes: u32, buffer_minutes: u32) -> (RuleSet, ResourceKey) {
        let mut rules = sample_rules();
        rules.step_minutes = step_minutes;
        let key = ResourceKey::from("ROOM");
        rules.resource_rules.insert(
            key.clone(),
            ResourceRule {
                min_minutes: 15,
                max_minutes: 240,
                buffer_minutes,
            },
        );
        (rules, key)
    }

    proptest! {
        // The earliest start honors the buffer and lies on the grid
        #[test]
        fn test_min_allowed_honors_buffer_and_grid(
            day_offset in 0..3650i64,
            second_of_day in 0..86_400i64,
            step_minutes in prop::sample::select(vec![1u32, 5, 10, 15, 20, 30, 45, 60, 90]),
            buffer_minutes in 0..1_440u32,
        ) {
            let (rules, key) = rules_with(step_minutes, buffer_minutes);
            let now = instant(day_offset, second_of_day);
            let buffered = now + Duration::minutes(i64::from(buffer_minutes));

            let min_allowed = min_allowed_instant(&rules, &key, now);

            prop_assert!(min_allowed >= buffered);
            prop_assert!(is_on_grid(&min_allowed, step_minutes));
            prop_assert!(min_allowed - buffered < Duration::minutes(i64::from(step_minutes)));
        }

        // Nothing after today is ever disabled
        #[test]
        fn test_days_after_today_stay_enabled(
            day_offset in 0..3650i64,
            second_of_day in 0..86_400i64,
            buffer_minutes in 0..2_880u32,
            days_ahead in 1..30i64,
            minute_of_day in 0..1_440i64,
        ) {
            let (rules, key) = rules_with(15, buffer_minutes);
            let now = instant(day_offset, second_of_day);
            let availability = Availability::compute(&rules, &key, now);
            let tomorrow = LocalClock::start_of_day(now.date() + Duration::days(1));

            for region in availability.regions() {
                prop_assert!(region.end <= tomorrow);
            }

            let later = LocalClock::start_of_day(now.date() + Duration::days(days_ahead))
                + Duration::minutes(minute_of_day);
            prop_assert!(!availability.is_disabled(&later));
            prop_assert!(availability.regions().iter().all(|region| !region.contains(&later)));
        }

        // Earlier days are always disabled
        #[test]
        fn test_days_before_today_are_disabled(
            day_offset in 1..3650i64,
            second_of_day in 0..86_400i64,
            days_back in 1..30i64,
            minute_of_day in 0..1_440i64,
        ) {
            let (rules, key) = rules_with(15, 60);
            let now = instant(day_offset, second_of_day);
            let availability = Availability::compute(&rules, &key, now);
            let earlier = LocalClock::start_of_day(now.date() - Duration::days(days_back))
                + Duration::minutes(minute_of_day);
            prop_assert!(availability.is_disabled(&earlier));
        }

        // Snapping moves a time by at most half a step and lands on the grid
        #[test]
        fn test_snap_stays_within_half_step(
            hour in 0..24u32,
            minute in 0..60u32,
            step_minutes in 1..=120u32,
        ) {
            let text = format!("{hour:02}:{minute:02}");
            let snapped = snap(&text, step_minutes).unwrap();
            let original = TimeOfDay::new(hour, minute).unwrap().minutes_from_midnight() as i64;
            let mut result = snapped.minutes_from_midnight() as i64;
            if result < original - i64::from(step_minutes) {
                // wrapped past midnight
                result += 1_440;
            }
            prop_assert!((result - original).abs() * 2 <= i64::from(step_minutes));
            prop_assert!(result % i64::from(step_minutes) == 0 || result == 1_440);
        }

        // The wire format round-trips every second-precision instant
        #[test]
        fn test_wire_round_trip(
            day_offset in -36_500..36_500i64,
            second_of_day in 0..86_400i64,
        ) {
            let original = instant(day_offset, second_of_day);
            let parsed = LocalClock::parse(&LocalClock::serialize(&original)).unwrap();
            prop_assert_eq!(parsed, original);
        }
    }
}
