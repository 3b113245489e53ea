// --- File: crates/services/roombook_backend/src/models.rs ---
use roombook_slots::clock::wire;
use roombook_slots::{
    CellState, DisabledRegion, Gesture, InputMode, LocalClock, LocalInstant, ResourceKey, RoomKey,
    Slot, SlotError,
};
use roombook_store::BookingId;
use serde::{Deserialize, Serialize};

/// Query for `GET /api/availability`. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityQuery {
    pub resource: Option<String>,
    pub from: Option<String>,
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub resource: ResourceKey,
    #[serde(with = "wire")]
    pub now: LocalInstant,
    #[serde(with = "wire")]
    pub min_allowed: LocalInstant,
    pub regions: Vec<DisabledRegion>,
    pub mask: Vec<CellState>,
}

/// A gesture on the calendar. The input mode is taken from `mode` when
/// given, else derived from `viewport_width`.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotRequest {
    pub resource: Option<String>,
    pub gesture: Gesture,
    pub mode: Option<InputMode>,
    pub viewport_width: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotResponse {
    pub mode: InputMode,
    /// `None` when the gesture does not belong to the input mode.
    pub slot: Option<Slot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Start,
    End,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviseRequest {
    pub resource: Option<String>,
    pub slot: Slot,
    pub edge: Edge,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviseResponse {
    pub slot: Slot,
    pub applied: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingsQuery {
    pub resource: Option<String>,
}

/// Body of `POST /api/bookings`, times as naive local `YYYY-MM-DDTHH:MM:SS`.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub resource: String,
    pub room: RoomKey,
    pub start: String,
    pub end: String,
}

impl BookingRequest {
    pub fn slot(&self) -> Result<Slot, SlotError> {
        Slot::new(LocalClock::parse(&self.start)?, LocalClock::parse(&self.end)?)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub id: BookingId,
    pub deleted: bool,
}
