use crate::clock::{LocalClock, LocalInstant};
use crate::rules::{ResourceKey, ResourceRule, RuleSet, TimeOfDay};
use std::collections::BTreeMap;

/// The rules the booking store ships with: 08:00-22:00, 15-minute steps.
pub(crate) fn sample_rules() -> RuleSet {
    serde_json::from_str(
        r#"{
            "min_time": "08:00",
            "max_time": "22:00",
            "step_minutes": 15,
            "default_duration_minutes": 60,
            "max_days_ahead": 14,
            "resource_rules": {
                "SAUNA": {"max_minutes": 120, "min_minutes": 30, "buffer_minutes": 60},
                "GRILL": {"max_minutes": 240, "min_minutes": 30, "buffer_minutes": 60}
            }
        }"#,
    )
    .unwrap()
}

/// 08:00-20:00 in 30-minute steps with a 120-minute buffer on `ROOM`.
pub(crate) fn half_hour_rules() -> RuleSet {
    let mut resource_rules = BTreeMap::new();
    resource_rules.insert(
        ResourceKey::from("ROOM"),
        ResourceRule {
            min_minutes: 30,
            max_minutes: 240,
            buffer_minutes: 120,
        },
    );
    RuleSet {
        min_time: TimeOfDay::new(8, 0).unwrap(),
        max_time: TimeOfDay::new(20, 0).unwrap(),
        step_minutes: 30,
        max_days_ahead: 14,
        default_duration_minutes: 60,
        resource_rules,
    }
}

pub(crate) fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> LocalInstant {
    LocalClock::from_components(year, month, day, hour, minute).unwrap()
}

pub(crate) fn sauna() -> ResourceKey {
    ResourceKey::from("SAUNA")
}
