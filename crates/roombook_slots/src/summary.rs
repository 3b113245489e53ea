// --- File: crates/roombook_slots/src/summary.rs ---
use crate::rules::{ResourceKey, RuleSet, TimeOfDay};
use serde::Serialize;
use std::fmt;

pub const ONE_PER_DAY_NOTICE: &str = "Only one booking per room and resource per day.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationBounds {
    pub min_minutes: u32,
    pub max_minutes: u32,
}

/// The rules that apply to one resource, for informational display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub resource: ResourceKey,
    pub opening_from: TimeOfDay,
    pub opening_until: TimeOfDay,
    pub step_minutes: u32,
    pub max_days_ahead: u32,
    pub default_duration_minutes: u32,
    /// `None` when the resource has no rule of its own.
    pub duration: Option<DurationBounds>,
    pub buffer_minutes: u32,
    pub notices: Vec<String>,
}

impl RuleSummary {
    pub fn for_resource(rules: &RuleSet, resource: &ResourceKey) -> Self {
        let rule = rules.resource_rule(resource);
        Self {
            resource: resource.clone(),
            opening_from: rules.min_time,
            opening_until: rules.max_time,
            step_minutes: rules.step_minutes,
            max_days_ahead: rules.max_days_ahead,
            default_duration_minutes: rules.default_duration_minutes,
            duration: rule.map(|rule| DurationBounds {
                min_minutes: rule.min_minutes,
                max_minutes: rule.max_minutes,
            }),
            buffer_minutes: rule.map(|rule| rule.buffer_minutes).unwrap_or(0),
            notices: vec![ONE_PER_DAY_NOTICE.to_string()],
        }
    }
}

impl fmt::Display for RuleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Booking rules for {}", self.resource)?;
        writeln!(
            f,
            "- Opening hours: {} to {}",
            self.opening_from, self.opening_until
        )?;
        writeln!(f, "- Times in {}-minute steps", self.step_minutes)?;
        writeln!(f, "- At most {} days ahead", self.max_days_ahead)?;
        if let Some(bounds) = self.duration {
            writeln!(
                f,
                "- Duration between {} and {} minutes",
                bounds.min_minutes, bounds.max_minutes
            )?;
        }
        if self.buffer_minutes > 0 {
            writeln!(f, "- Book at least {} minutes in advance", self.buffer_minutes)?;
        }
        for notice in &self.notices {
            writeln!(f, "- {notice}")?;
        }
        Ok(())
    }
}
