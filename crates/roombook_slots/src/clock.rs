// --- File: crates/roombook_slots/src/clock.rs ---
//! Local wall-clock instants and their wire format.
//!
//! Every instant the engine handles is a naive local date-time: no offset is
//! attached and none is ever serialized, so the booking store receives the
//! wall-clock digits the user picked, regardless of UTC offsets or DST.

use crate::error::SlotError;
use crate::rules::TimeOfDay;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use tracing::debug;

pub type LocalInstant = NaiveDateTime;

/// `YYYY-MM-DDTHH:MM:SS`, no offset and no fraction.
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Conversions between local instants, their wire text and their parts.
pub struct LocalClock;

impl LocalClock {
    /// Formats with second precision; sub-second digits are dropped.
    pub fn serialize(instant: &LocalInstant) -> String {
        instant.format(WIRE_FORMAT).to_string()
    }

    /// Parses the wire format. Also tolerated: a missing seconds field,
    /// fractional seconds, and a trailing RFC 3339 offset, which is ignored
    /// in favor of the wall-clock digits.
    pub fn parse(text: &str) -> Result<LocalInstant, SlotError> {
        let text = text.trim();
        if let Ok(instant) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(instant);
        }
        if let Ok(instant) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M") {
            return Ok(instant);
        }
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(text) {
            debug!("dropping offset from {}", text);
            return Ok(with_offset.naive_local());
        }
        Err(SlotError::InvalidInput(format!(
            "expected YYYY-MM-DDTHH:MM:SS, got {text:?}"
        )))
    }

    pub fn from_components(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    ) -> Result<LocalInstant, SlotError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .ok_or_else(|| {
                SlotError::InvalidInput(format!(
                    "no such local time: {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}"
                ))
            })
    }

    /// The date of `date_part` at `time`.
    pub fn combine(date_part: &LocalInstant, time: TimeOfDay) -> LocalInstant {
        date_part.date().and_time(time.to_naive_time())
    }

    pub fn time_of_day(instant: &LocalInstant) -> TimeOfDay {
        TimeOfDay::from_naive_time(instant.time())
    }

    pub fn start_of_day(date: NaiveDate) -> LocalInstant {
        date.and_time(NaiveTime::MIN)
    }
}

/// Serde adapter for [`LocalInstant`] fields using the wire format.
pub mod wire {
    use super::{LocalClock, LocalInstant};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(instant: &LocalInstant, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&LocalClock::serialize(instant))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LocalInstant, D::Error> {
        let text = String::deserialize(deserializer)?;
        LocalClock::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Same as [`wire`], for optional fields. `None` is written as `null`.
pub mod wire_opt {
    use super::{LocalClock, LocalInstant};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        instant: &Option<LocalInstant>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match instant {
            Some(instant) => serializer.serialize_some(&LocalClock::serialize(instant)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<LocalInstant>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|text| LocalClock::parse(&text).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// Source of "now" as a local wall-clock instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> LocalInstant;
}

/// Reads the system time, optionally in a fixed IANA zone instead of the host's.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    zone: Option<Tz>,
}

impl SystemClock {
    pub fn new(zone: Option<Tz>) -> Self {
        Self { zone }
    }

    pub fn from_zone_name(name: Option<&str>) -> Result<Self, SlotError> {
        let zone = name
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|_| SlotError::InvalidInput(format!("unknown time zone: {name}")))
            })
            .transpose()?;
        Ok(Self { zone })
    }
}

impl Clock for SystemClock {
    fn now(&self) -> LocalInstant {
        match self.zone {
            Some(zone) => Utc::now().with_timezone(&zone).naive_local(),
            None => Local::now().naive_local(),
        }
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub LocalInstant);

impl Clock for FixedClock {
    fn now(&self) -> LocalInstant {
        self.0
    }
}
