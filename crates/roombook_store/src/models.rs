// --- File: crates/roombook_store/src/models.rs ---
use roombook_slots::policy::Role;
use roombook_slots::{LocalInstant, Resource, ResourceKey, Room, RoomKey, RuleSet, Slot};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Rooms, resources and booking rules, fetched once per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub rooms: Vec<Room>,
    pub resources: Vec<Resource>,
    #[serde(rename = "booking_rules")]
    pub rules: RuleSet,
}

impl Catalog {
    pub fn default_resource(&self) -> Option<&ResourceKey> {
        self.resources.first().map(|resource| &resource.key)
    }

    pub fn resource(&self, key: &ResourceKey) -> Option<&Resource> {
        self.resources.iter().find(|resource| &resource.key == key)
    }

    pub fn room(&self, key: &RoomKey) -> Option<&Room> {
        self.rooms.iter().find(|room| &room.key == key)
    }

    /// Bookings carry either the key or the label of their resource.
    pub fn resource_matches(&self, key: &ResourceKey, value: &str) -> bool {
        key.as_str() == value
            || self
                .resource(key)
                .is_some_and(|resource| resource.label == value)
    }

    /// Display label for a room value as stored on a booking.
    pub fn room_label(&self, value: &str) -> String {
        self.rooms
            .iter()
            .find(|room| room.key.as_str() == value || room.label == value)
            .map(|room| room.label.clone())
            .unwrap_or_else(|| value.to_string())
    }

    /// The bookings of `resource`, ready for display.
    pub fn bookings_for(&self, resource: &ResourceKey, records: &[BookingRecord]) -> Vec<BookingView> {
        records
            .iter()
            .filter(|record| self.resource_matches(resource, &record.resource))
            .map(|record| BookingView {
                id: record.id.clone(),
                room: self.room_label(&record.room),
                color: color_for(&record.room),
                start: record.start,
                end: record.end,
            })
            .collect()
    }
}

/// Identity of a persisted booking. The store uses integers; any scalar is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BookingId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(id) => BookingId(id.to_string()),
            RawId::Text(id) => BookingId(id),
        })
    }
}

/// A booking as listed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: BookingId,
    pub room: String,
    pub resource: String,
    #[serde(with = "roombook_slots::clock::wire")]
    pub start: LocalInstant,
    #[serde(with = "roombook_slots::clock::wire")]
    pub end: LocalInstant,
}

/// Request body of a booking creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    pub room: RoomKey,
    pub resource: ResourceKey,
    #[serde(with = "roombook_slots::clock::wire")]
    pub start: LocalInstant,
    #[serde(with = "roombook_slots::clock::wire")]
    pub end: LocalInstant,
}

impl NewBooking {
    pub fn new(slot: &Slot, resource: &ResourceKey, room: &RoomKey) -> Self {
        Self {
            room: room.clone(),
            resource: resource.clone(),
            start: slot.start(),
            end: slot.end(),
        }
    }
}

/// What the store answers to a booking creation. Older stores only report a status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingReceipt {
    #[serde(default)]
    pub id: Option<BookingId>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
}

/// A booking of the active resource, resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingView {
    pub id: BookingId,
    pub room: String,
    pub color: String,
    #[serde(with = "roombook_slots::clock::wire")]
    pub start: LocalInstant,
    #[serde(with = "roombook_slots::clock::wire")]
    pub end: LocalInstant,
}

/// A stable color per room, spread around the hue circle by the golden angle.
pub fn color_for(room: &str) -> String {
    let hash = room
        .chars()
        .fold(0i32, |hash, c| hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(c as i32));
    let hue = (f64::from(hash.unsigned_abs()) * 137.508) % 360.0;
    format!("hsl({hue:.0}, 70%, 50%)")
}
