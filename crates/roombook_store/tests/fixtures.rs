//! Test fixtures for booking store tests
//!
//! Canned store payloads shaped like the real booking store's answers.

#![allow(dead_code)]

use serde_json::{json, Value};

/// The `GET /bookings/enums` payload
pub fn enums_payload() -> Value {
    json!({
        "rooms": [
            {"key": "WOLF", "label": "Wolf"},
            {"key": "HERMLIN", "label": "Hermelin"},
            {"key": "FUCHS", "label": "Fuchs"},
            {"key": "BIBER", "label": "Biber"}
        ],
        "resources": [
            {"key": "SAUNA", "label": "Sauna"},
            {"key": "GRILL", "label": "Grillhütte"}
        ],
        "booking_rules": {
            "min_time": "08:00",
            "max_time": "22:00",
            "step_minutes": 15,
            "default_duration_minutes": 60,
            "max_days_ahead": 14,
            "resource_rules": {
                "SAUNA": {"max_minutes": 120, "min_minutes": 30, "buffer_minutes": 60},
                "GRILL": {"max_minutes": 240, "min_minutes": 30, "buffer_minutes": 60}
            }
        }
    })
}

/// The `GET /bookings/` payload
pub fn bookings_payload() -> Value {
    json!([
        {"id": 1, "room": "Wolf", "resource": "Sauna", "start": "2024-03-02T10:00:00", "end": "2024-03-02T11:00:00"},
        {"id": 2, "room": "Biber", "resource": "Grillhütte", "start": "2024-03-02T12:00:00", "end": "2024-03-02T16:00:00"}
    ])
}
