use crate::clock::LocalInstant;
use crate::rules::TimeOfDay;
use roombook_common::RoombookError;
use thiserror::Error;

/// Errors produced while building or checking slots.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// Malformed time text or date-time; recovered locally by ignoring the edit.
    #[error("Invalid time input: {0}")]
    InvalidInput(String),

    /// The slot breaks one of the booking rules.
    #[error("{0}")]
    OutOfRules(#[from] RuleViolation),

    /// The rule configuration itself is inconsistent.
    #[error("Invalid booking rules: {0}")]
    InvalidRules(String),
}

/// The individual booking rules a slot can break.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("End time must be after start time")]
    EndNotAfterStart,

    #[error("Bookings are possible from {} at the earliest", .earliest.format("%Y-%m-%d %H:%M"))]
    BeforeEarliest { earliest: LocalInstant },

    #[error("Bookings are only possible between {min_time} and {max_time}")]
    OutsideOpeningHours {
        min_time: TimeOfDay,
        max_time: TimeOfDay,
    },

    #[error("Bookings can be made at most {days} days ahead")]
    BeyondHorizon { days: u32 },

    #[error("Times must lie on the {step}-minute grid")]
    OffStep { step: u32 },

    #[error("Bookings spanning several days are reserved for administrators")]
    SpansDays,

    #[error("Minimum booking duration: {min} minutes")]
    TooShort { min: u32 },

    #[error("Maximum booking duration: {max} minutes")]
    TooLong { max: u32 },

    #[error("Unknown resource: {0}")]
    UnknownResource(String),
}

impl From<SlotError> for RoombookError {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::InvalidInput(msg) => RoombookError::InvalidInput(msg),
            SlotError::OutOfRules(violation) => violation.into(),
            SlotError::InvalidRules(msg) => RoombookError::ConfigError(msg),
        }
    }
}

impl From<RuleViolation> for RoombookError {
    fn from(violation: RuleViolation) -> Self {
        RoombookError::OutOfRules(violation.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roombook_common::HttpStatusCode;

    #[test]
    fn test_violations_map_to_out_of_rules() {
        let err: RoombookError = SlotError::from(RuleViolation::TooShort { min: 30 }).into();
        assert_eq!(
            err,
            RoombookError::OutOfRules("Minimum booking duration: 30 minutes".to_string())
        );
        assert_eq!(err.detail(), "Minimum booking duration: 30 minutes");
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let err: RoombookError = SlotError::InvalidInput("7:5".to_string()).into();
        assert_eq!(err.status_code(), 400);
    }
}
