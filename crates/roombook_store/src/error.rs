// --- File: crates/roombook_store/src/error.rs ---
use roombook_common::{forbidden, network_failure, server_error, stale_state, RoombookError};
use roombook_slots::SlotError;
use serde_json::Value;
use thiserror::Error;

/// Shown when an error carries no usable text at all.
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Could not reach the booking store: {0}")]
    Network(String),

    /// The store answered with a non-success status. `message` is already
    /// reduced to the user-facing text.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response from the booking store: {0}")]
    Decode(String),

    #[error("Not logged in")]
    NoSession,

    #[error("{0}")]
    Forbidden(String),

    #[error("Booking rules are not loaded yet")]
    Stale,

    #[error(transparent)]
    Slot(#[from] SlotError),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Network(err.to_string())
    }
}

impl From<StoreError> for RoombookError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Network(msg) => network_failure(msg),
            StoreError::Rejected { status: 401, message } => RoombookError::Unauthorized(message),
            StoreError::Rejected { status: 403, message } => forbidden(message),
            StoreError::Rejected { status: 404, message } => RoombookError::NotFound(message),
            StoreError::Rejected { status, message } => server_error(status, message),
            StoreError::Decode(msg) => server_error(502, msg),
            StoreError::NoSession => RoombookError::Unauthorized("Not logged in".to_string()),
            StoreError::Forbidden(msg) => forbidden(msg),
            StoreError::Stale => stale_state(),
            StoreError::Slot(err) => err.into(),
        }
    }
}

/// Reduces an error body to one human-readable message.
///
/// Tried in order: a `detail` field of a JSON body, a `detail` field on a
/// nested error object, the `detail` of a JSON document encoded as a JSON
/// string, the raw text, and finally [`FALLBACK_MESSAGE`].
pub fn user_message(body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if let Some(message) = detail_of(&value) {
            return message;
        }
        if let Value::String(encoded) = &value {
            if let Ok(inner) = serde_json::from_str::<Value>(encoded) {
                if let Some(message) = detail_of(&inner) {
                    return message;
                }
            }
            if !encoded.trim().is_empty() {
                return encoded.trim().to_string();
            }
        }
    }
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    FALLBACK_MESSAGE.to_string()
}

fn detail_of(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    if let Some(message) = object.get("detail").and_then(detail_text) {
        return Some(message);
    }
    object
        .values()
        .filter_map(Value::as_object)
        .find_map(|nested| nested.get("detail").and_then(detail_text))
}

fn detail_text(detail: &Value) -> Option<String> {
    match detail {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        // validation errors: [{"loc": [...], "msg": "...", "type": "..."}]
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str).or_else(|| item.as_str()))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        Value::Object(inner) => inner
            .get("message")
            .or_else(|| inner.get("msg"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
