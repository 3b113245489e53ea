// --- File: crates/roombook_slots/src/rules.rs ---
use crate::error::SlotError;
use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time of day with minute precision, written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { minutes: 0 };

    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self {
            minutes: (hour * 60 + minute) as u16,
        })
    }

    /// Builds a time from minutes past midnight, wrapping at 24:00.
    pub fn from_minutes(minutes: u32) -> Self {
        Self {
            minutes: (minutes % MINUTES_PER_DAY) as u16,
        }
    }

    pub fn hour(&self) -> u32 {
        u32::from(self.minutes) / 60
    }

    pub fn minute(&self) -> u32 {
        u32::from(self.minutes) % 60
    }

    pub fn minutes_from_midnight(&self) -> u32 {
        u32::from(self.minutes)
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::MIN + Duration::minutes(i64::from(self.minutes))
    }

    /// Truncates seconds.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self {
            minutes: (time.hour() * 60 + time.minute()) as u16,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    /// Accepts exactly two digits, a colon and two digits.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || SlotError::InvalidInput(format!("expected HH:MM, got {text:?}"));
        let bytes = text.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(invalid());
        }
        let hour = u32::from(digits[0] - b'0') * 10 + u32::from(digits[1] - b'0');
        let minute = u32::from(digits[2] - b'0') * 10 + u32::from(digits[3] - b'0');
        TimeOfDay::new(hour, minute).ok_or_else(invalid)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

macro_rules! string_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_string())
            }
        }

        impl From<String> for $name {
            fn from(key: String) -> Self {
                Self(key)
            }
        }
    };
}

string_key!(
    /// Identifies a bookable resource, e.g. `SAUNA`.
    ResourceKey
);
string_key!(
    /// Identifies a room, e.g. `CLUBRAUM`.
    RoomKey
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub key: ResourceKey,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub key: RoomKey,
    pub label: String,
}

/// Per-resource booking limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRule {
    pub min_minutes: u32,
    pub max_minutes: u32,
    /// Lead time between "now" and the earliest bookable start.
    #[serde(default)]
    pub buffer_minutes: u32,
}

/// The booking rules as published by the booking store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub min_time: TimeOfDay,
    pub max_time: TimeOfDay,
    pub step_minutes: u32,
    pub max_days_ahead: u32,
    pub default_duration_minutes: u32,
    #[serde(default)]
    pub resource_rules: BTreeMap<ResourceKey, ResourceRule>,
}

impl RuleSet {
    /// Checks the internal consistency of the rules.
    pub fn validate(&self) -> Result<(), SlotError> {
        if self.step_minutes == 0 {
            return Err(SlotError::InvalidRules(
                "step_minutes must be positive".to_string(),
            ));
        }
        if self.min_time >= self.max_time {
            return Err(SlotError::InvalidRules(format!(
                "min_time {} must be before max_time {}",
                self.min_time, self.max_time
            )));
        }
        if self.default_duration_minutes == 0 {
            return Err(SlotError::InvalidRules(
                "default_duration_minutes must be positive".to_string(),
            ));
        }
        for (key, rule) in &self.resource_rules {
            if rule.min_minutes > rule.max_minutes {
                return Err(SlotError::InvalidRules(format!(
                    "{key}: min_minutes {} exceeds max_minutes {}",
                    rule.min_minutes, rule.max_minutes
                )));
            }
        }
        Ok(())
    }

    pub fn resource_rule(&self, resource: &ResourceKey) -> Option<&ResourceRule> {
        self.resource_rules.get(resource)
    }

    /// Buffer for `resource`, zero when the resource has no rule.
    pub fn buffer_minutes(&self, resource: &ResourceKey) -> u32 {
        self.resource_rule(resource)
            .map(|rule| rule.buffer_minutes)
            .unwrap_or(0)
    }

    pub fn step(&self) -> Duration {
        Duration::minutes(i64::from(self.step_minutes))
    }

    pub fn default_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.default_duration_minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_rules;

    #[test]
    fn test_time_of_day_parse_and_display() {
        let time: TimeOfDay = "07:05".parse().unwrap();
        assert_eq!(time.hour(), 7);
        assert_eq!(time.minute(), 5);
        assert_eq!(time.to_string(), "07:05");
        assert!("7:05".parse::<TimeOfDay>().is_err());
        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("12:60".parse::<TimeOfDay>().is_err());
        assert!("12:3a".parse::<TimeOfDay>().is_err());
        assert!("12-30".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_rules_deserialize_from_store_shape() {
        let rules = sample_rules();
        assert_eq!(rules.min_time, TimeOfDay::new(8, 0).unwrap());
        assert_eq!(rules.step_minutes, 15);
        assert_eq!(rules.buffer_minutes(&ResourceKey::from("SAUNA")), 60);
        assert_eq!(rules.buffer_minutes(&ResourceKey::from("BEAMER")), 0);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inconsistent_rules() {
        let mut rules = sample_rules();
        rules.step_minutes = 0;
        assert!(matches!(rules.validate(), Err(SlotError::InvalidRules(_))));

        let mut rules = sample_rules();
        rules.max_time = rules.min_time;
        assert!(rules.validate().is_err());

        let mut rules = sample_rules();
        rules.resource_rules.insert(
            ResourceKey::from("BROKEN"),
            ResourceRule {
                min_minutes: 90,
                max_minutes: 30,
                buffer_minutes: 0,
            },
        );
        assert!(rules.validate().is_err());
    }
}
