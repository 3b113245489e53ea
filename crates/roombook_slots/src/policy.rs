// --- File: crates/roombook_slots/src/policy.rs ---
use crate::availability::min_allowed_instant;
use crate::clock::{LocalClock, LocalInstant};
use crate::error::RuleViolation;
use crate::rules::{ResourceKey, RuleSet, MINUTES_PER_DAY};
use crate::slot::Slot;
use crate::snap::is_on_grid;
use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Session role as reported by the booking store at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn may_delete_bookings(self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Restricted roles are held to lead buffer, grid, single-day and duration rules.
    pub fn is_restricted(self) -> bool {
        !matches!(self, Role::Admin)
    }
}

/// Checks a slot against the booking rules before it is sent to the store.
#[derive(Debug, Clone, Copy)]
pub struct SlotPolicy<'a> {
    rules: &'a RuleSet,
    role: Role,
}

impl<'a> SlotPolicy<'a> {
    pub fn new(rules: &'a RuleSet, role: Role) -> Self {
        Self { rules, role }
    }

    /// Returns the first rule `slot` breaks, checked in a fixed order.
    pub fn check(&self, slot: &Slot, resource: &ResourceKey, now: LocalInstant) -> Result<(), RuleViolation> {
        let rule = self
            .rules
            .resource_rule(resource)
            .ok_or_else(|| RuleViolation::UnknownResource(resource.to_string()))?;

        self.check_opening_hours(slot)?;

        let horizon = now + Duration::days(i64::from(self.rules.max_days_ahead));
        if slot.start() > horizon {
            return Err(RuleViolation::BeyondHorizon {
                days: self.rules.max_days_ahead,
            });
        }

        if !self.role.is_restricted() {
            return Ok(());
        }

        let earliest = min_allowed_instant(self.rules, resource, now);
        if slot.start() < earliest {
            return Err(RuleViolation::BeforeEarliest { earliest });
        }

        if slot.start().date() != slot.end().date() {
            return Err(RuleViolation::SpansDays);
        }

        let step = self.rules.step_minutes;
        if !is_on_grid(&slot.start(), step) || !is_on_grid(&slot.end(), step) {
            return Err(RuleViolation::OffStep { step });
        }

        let minutes = slot.duration_minutes();
        if minutes < i64::from(rule.min_minutes) {
            return Err(RuleViolation::TooShort {
                min: rule.min_minutes,
            });
        }
        if minutes > i64::from(rule.max_minutes) {
            return Err(RuleViolation::TooLong {
                max: rule.max_minutes,
            });
        }

        debug!("slot {:?} on {} passes the {:?} policy", slot, resource, self.role);
        Ok(())
    }

    fn check_opening_hours(&self, slot: &Slot) -> Result<(), RuleViolation> {
        let start = LocalClock::time_of_day(&slot.start()).minutes_from_midnight();
        let next_midnight = slot.end().date() > slot.start().date() && slot.end().time() == NaiveTime::MIN;
        let end = if next_midnight {
            MINUTES_PER_DAY
        } else {
            LocalClock::time_of_day(&slot.end()).minutes_from_midnight()
        };

        if start < self.rules.min_time.minutes_from_midnight()
            || end > self.rules.max_time.minutes_from_midnight()
        {
            return Err(RuleViolation::OutsideOpeningHours {
                min_time: self.rules.min_time,
                max_time: self.rules.max_time,
            });
        }
        Ok(())
    }
}
