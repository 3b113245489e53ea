// --- File: crates/roombook_slots/src/lib.rs ---
pub mod availability;
#[cfg(test)]
mod availability_proptest;
pub mod clock;
pub mod error;
#[cfg(test)]
mod fixtures;
pub mod policy;
pub mod rules;
pub mod slot;
pub mod snap;
pub mod summary;

pub use availability::{
    disabled_regions, min_allowed_instant, Availability, CellState, DisabledRegion, RegionKind,
};
pub use clock::{Clock, FixedClock, LocalClock, LocalInstant, SystemClock};
pub use error::{RuleViolation, SlotError};
pub use policy::{Role, SlotPolicy};
pub use rules::{Resource, ResourceKey, ResourceRule, Room, RoomKey, RuleSet, TimeOfDay};
pub use slot::{Gesture, InputMode, Revision, Slot, SlotBuilder};
pub use snap::{ceil_instant, snap, snap_instant};
pub use summary::{DurationBounds, RuleSummary};
