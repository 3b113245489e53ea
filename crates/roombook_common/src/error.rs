use std::fmt;
use thiserror::Error;

/// The base error type for all Roombook errors.
///
/// Each crate keeps its own domain error and implements
/// `From<DomainError> for RoombookError`, so handlers and the UI layer only
/// ever deal with this taxonomy. None of these conditions is fatal: every
/// variant degrades to a user-visible message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoombookError {
    /// Malformed user input, e.g. a time field that is not `HH:MM`.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The slot violates opening hours, lead buffer or duration bounds.
    #[error("Outside booking rules: {0}")]
    OutOfRules(String),

    /// The booking store could not be reached.
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// The booking store answered with an error.
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Catalog or rules have not been loaded yet.
    #[error("Booking rules are not loaded yet")]
    StaleState,

    /// No valid session.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The session lacks the capability for this operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A referenced resource, room or booking does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl RoombookError {
    /// The bare message, without the category prefix used by `Display`.
    ///
    /// This is what ends up in the `detail` field of HTTP error bodies.
    pub fn detail(&self) -> String {
        match self {
            RoombookError::InvalidInput(msg)
            | RoombookError::OutOfRules(msg)
            | RoombookError::NetworkFailure(msg)
            | RoombookError::Unauthorized(msg)
            | RoombookError::Forbidden(msg)
            | RoombookError::NotFound(msg)
            | RoombookError::ConfigError(msg)
            | RoombookError::InternalError(msg) => msg.clone(),
            RoombookError::ServerError { message, .. } => message.clone(),
            RoombookError::StaleState => self.to_string(),
        }
    }

    /// Whether re-invoking the same action may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RoombookError::NetworkFailure(_)
                | RoombookError::ServerError { .. }
                | RoombookError::StaleState
        )
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for RoombookError {
    fn status_code(&self) -> u16 {
        match self {
            RoombookError::InvalidInput(_) => 400,
            RoombookError::OutOfRules(_) => 422,
            RoombookError::NetworkFailure(_) => 502,
            // Pass client errors of the store through, everything else is a bad gateway
            RoombookError::ServerError { status, .. } if (400..500).contains(status) => *status,
            RoombookError::ServerError { .. } => 502,
            RoombookError::StaleState => 503,
            RoombookError::Unauthorized(_) => 401,
            RoombookError::Forbidden(_) => 403,
            RoombookError::NotFound(_) => 404,
            RoombookError::ConfigError(_) => 500,
            RoombookError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for RoombookError {
    fn from(err: reqwest::Error) -> Self {
        RoombookError::NetworkFailure(err.to_string())
    }
}

impl From<serde_json::Error> for RoombookError {
    fn from(err: serde_json::Error) -> Self {
        RoombookError::InternalError(format!("malformed JSON: {}", err))
    }
}

// Utility functions for error handling
pub fn invalid_input<T: fmt::Display>(message: T) -> RoombookError {
    RoombookError::InvalidInput(message.to_string())
}

pub fn out_of_rules<T: fmt::Display>(message: T) -> RoombookError {
    RoombookError::OutOfRules(message.to_string())
}

pub fn network_failure<T: fmt::Display>(message: T) -> RoombookError {
    RoombookError::NetworkFailure(message.to_string())
}

pub fn server_error<T: fmt::Display>(status: u16, message: T) -> RoombookError {
    RoombookError::ServerError {
        status,
        message: message.to_string(),
    }
}

pub fn stale_state() -> RoombookError {
    RoombookError::StaleState
}

pub fn forbidden<T: fmt::Display>(message: T) -> RoombookError {
    RoombookError::Forbidden(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_strips_category_prefix() {
        let err = server_error(409, "Room occupied");
        assert_eq!(err.detail(), "Room occupied");
        assert_eq!(err.to_string(), "Server error (409): Room occupied");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(server_error(409, "x").status_code(), 409);
        assert_eq!(server_error(500, "x").status_code(), 502);
        assert_eq!(out_of_rules("x").status_code(), 422);
        assert_eq!(stale_state().status_code(), 503);
        assert_eq!(forbidden("x").status_code(), 403);
    }

    #[test]
    fn test_retryable() {
        assert!(network_failure("down").is_retryable());
        assert!(!invalid_input("7:5").is_retryable());
    }
}
