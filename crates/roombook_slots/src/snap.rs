// --- File: crates/roombook_slots/src/snap.rs ---
use crate::clock::{LocalClock, LocalInstant};
use crate::rules::{TimeOfDay, MINUTES_PER_DAY};
use chrono::{Duration, Timelike};

/// Rounds `value` to the nearest multiple of `step`, halves rounding up.
pub(crate) fn round_to_step(value: i64, step: i64) -> i64 {
    (2 * value + step).div_euclid(2 * step) * step
}

/// Snaps `HH:MM` text to the nearest multiple of `step_minutes` past midnight.
///
/// Returns `None` for malformed text or a zero step. A time that rounds up to
/// 24:00 wraps to `00:00`.
pub fn snap(text: &str, step_minutes: u32) -> Option<TimeOfDay> {
    if step_minutes == 0 {
        return None;
    }
    let time: TimeOfDay = text.parse().ok()?;
    Some(snap_time(time, step_minutes))
}

pub fn snap_time(time: TimeOfDay, step_minutes: u32) -> TimeOfDay {
    let step = i64::from(step_minutes.max(1));
    let rounded = round_to_step(i64::from(time.minutes_from_midnight()), step);
    TimeOfDay::from_minutes((rounded as u32) % MINUTES_PER_DAY)
}

/// Snaps an instant to the nearest grid point of its day; seconds are ignored.
/// Rounding past the last grid point of a day lands on the next midnight.
pub fn snap_instant(instant: LocalInstant, step_minutes: u32) -> LocalInstant {
    let step = i64::from(step_minutes.max(1));
    let minutes = i64::from(instant.hour() * 60 + instant.minute());
    LocalClock::start_of_day(instant.date()) + Duration::minutes(round_to_step(minutes, step))
}

/// Smallest grid point of the instant's day at or after it. Any seconds or
/// fraction past a grid point count as a partial step.
pub fn ceil_instant(instant: LocalInstant, step_minutes: u32) -> LocalInstant {
    let step_secs = i64::from(step_minutes.max(1)) * 60;
    let mut secs = i64::from(instant.num_seconds_from_midnight());
    if instant.nanosecond() > 0 {
        secs += 1;
    }
    let steps = (secs + step_secs - 1).div_euclid(step_secs);
    LocalClock::start_of_day(instant.date()) + Duration::seconds(steps * step_secs)
}

/// Whether `instant` sits exactly on the step grid.
pub fn is_on_grid(instant: &LocalInstant, step_minutes: u32) -> bool {
    let step = step_minutes.max(1);
    instant.second() == 0
        && instant.nanosecond() == 0
        && (instant.hour() * 60 + instant.minute()) % step == 0
}
