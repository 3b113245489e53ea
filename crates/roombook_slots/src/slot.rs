// --- File: crates/roombook_slots/src/slot.rs ---
use crate::availability::Availability;
use crate::clock::{LocalClock, LocalInstant};
use crate::error::{RuleViolation, SlotError};
use crate::rules::{RuleSet, TimeOfDay};
use crate::snap::{round_to_step, snap, snap_instant};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A proposed booking interval. `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SlotWire")]
pub struct Slot {
    #[serde(with = "crate::clock::wire")]
    start: LocalInstant,
    #[serde(with = "crate::clock::wire")]
    end: LocalInstant,
}

#[derive(Deserialize)]
struct SlotWire {
    #[serde(with = "crate::clock::wire")]
    start: LocalInstant,
    #[serde(with = "crate::clock::wire")]
    end: LocalInstant,
}

impl TryFrom<SlotWire> for Slot {
    type Error = SlotError;

    fn try_from(wire: SlotWire) -> Result<Self, Self::Error> {
        Slot::new(wire.start, wire.end)
    }
}

impl Slot {
    pub fn new(start: LocalInstant, end: LocalInstant) -> Result<Self, SlotError> {
        if start >= end {
            return Err(RuleViolation::EndNotAfterStart.into());
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> LocalInstant {
        self.start
    }

    pub fn end(&self) -> LocalInstant {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// The `HH:MM` pair shown in the time editors.
    pub fn display_times(&self) -> (TimeOfDay, TimeOfDay) {
        (
            LocalClock::time_of_day(&self.start),
            LocalClock::time_of_day(&self.end),
        )
    }
}

/// Outcome of editing one end of a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Applied(Slot),
    /// The edit was rejected; `slot` is the untouched original.
    Unchanged { slot: Slot, reason: SlotError },
}

impl Revision {
    pub fn slot(&self) -> &Slot {
        match self {
            Revision::Applied(slot) | Revision::Unchanged { slot, .. } => slot,
        }
    }

    pub fn into_slot(self) -> Slot {
        match self {
            Revision::Applied(slot) | Revision::Unchanged { slot, .. } => slot,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Revision::Applied(_))
    }
}

/// How the calendar collects a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Press, drag and release over a time range.
    Drag,
    /// A single tap that opens a default-length slot.
    Tap,
}

impl InputMode {
    /// Narrow viewports, at or below `breakpoint_px`, use tap selection.
    pub fn for_viewport(width_px: u32, breakpoint_px: u32) -> Self {
        if width_px <= breakpoint_px {
            InputMode::Tap
        } else {
            InputMode::Drag
        }
    }
}

/// A raw selection coming from the calendar surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Gesture {
    Drag {
        #[serde(with = "crate::clock::wire")]
        start: LocalInstant,
        #[serde(with = "crate::clock::wire")]
        end: LocalInstant,
    },
    Tap {
        #[serde(with = "crate::clock::wire")]
        point: LocalInstant,
    },
}

/// Turns raw selections and typed edits into grid-aligned slots.
#[derive(Debug, Clone)]
pub struct SlotBuilder<'a> {
    rules: &'a RuleSet,
    min_allowed: LocalInstant,
    restricted: bool,
}

impl<'a> SlotBuilder<'a> {
    /// The earliest start binds only when `availability` was computed for a
    /// restricted role.
    pub fn new(rules: &'a RuleSet, availability: &Availability) -> Self {
        Self {
            rules,
            min_allowed: availability.min_allowed(),
            restricted: availability.is_restricted(),
        }
    }

    pub fn min_allowed(&self) -> LocalInstant {
        self.min_allowed
    }

    /// Builds a slot from a dragged range. Both ends snap to the grid; when
    /// they collapse onto the same grid point, the end is placed the snapped
    /// raw duration (at least one step) after the start.
    pub fn from_point_selection(
        &self,
        raw_start: LocalInstant,
        raw_end: LocalInstant,
    ) -> Result<Slot, SlotError> {
        let (raw_start, raw_end) = if raw_end < raw_start {
            (raw_end, raw_start)
        } else {
            (raw_start, raw_end)
        };
        let step = self.rules.step_minutes.max(1);
        let start = snap_instant(raw_start, step);
        let mut end = snap_instant(raw_end, step);
        if end <= start {
            let raw_minutes = (raw_end - raw_start).num_minutes();
            let minutes = round_to_step(raw_minutes, i64::from(step)).max(i64::from(step));
            end = start + Duration::minutes(minutes);
        }
        self.ensure_not_before_earliest(start)?;
        debug!(
            "selection {}..{} -> {}..{}",
            LocalClock::serialize(&raw_start),
            LocalClock::serialize(&raw_end),
            LocalClock::serialize(&start),
            LocalClock::serialize(&end)
        );
        Slot::new(start, end)
    }

    /// Builds a default-length slot starting at the snapped tap point.
    pub fn from_point_click(&self, raw_point: LocalInstant) -> Result<Slot, SlotError> {
        let start = snap_instant(raw_point, self.rules.step_minutes);
        self.ensure_not_before_earliest(start)?;
        Slot::new(start, start + self.rules.default_duration())
    }

    /// Dispatches a gesture according to the active input mode. Gestures that
    /// do not belong to `mode` are ignored and yield `None`.
    pub fn from_gesture(&self, mode: InputMode, gesture: &Gesture) -> Option<Result<Slot, SlotError>> {
        match (mode, gesture) {
            (InputMode::Drag, Gesture::Drag { start, end }) => {
                Some(self.from_point_selection(*start, *end))
            }
            (InputMode::Tap, Gesture::Tap { point }) => Some(self.from_point_click(*point)),
            _ => {
                debug!("ignoring {:?} in {:?} mode", gesture, mode);
                None
            }
        }
    }

    /// Moves the start to the snapped `text` on the start's date.
    pub fn revise_start(&self, slot: &Slot, text: &str) -> Revision {
        let time = match self.snap_text(text) {
            Ok(time) => time,
            Err(reason) => return unchanged(slot, reason),
        };
        let start = LocalClock::combine(&slot.start(), time);
        if let Err(reason) = self.ensure_not_before_earliest(start) {
            return unchanged(slot, reason);
        }
        match Slot::new(start, slot.end()) {
            Ok(revised) => Revision::Applied(revised),
            Err(reason) => unchanged(slot, reason),
        }
    }

    /// Moves the end to the snapped `text` on the end's date.
    pub fn revise_end(&self, slot: &Slot, text: &str) -> Revision {
        let time = match self.snap_text(text) {
            Ok(time) => time,
            Err(reason) => return unchanged(slot, reason),
        };
        let end = LocalClock::combine(&slot.end(), time);
        match Slot::new(slot.start(), end) {
            Ok(revised) => Revision::Applied(revised),
            Err(reason) => unchanged(slot, reason),
        }
    }

    fn snap_text(&self, text: &str) -> Result<TimeOfDay, SlotError> {
        snap(text, self.rules.step_minutes)
            .ok_or_else(|| SlotError::InvalidInput(format!("expected HH:MM, got {text:?}")))
    }

    fn ensure_not_before_earliest(&self, start: LocalInstant) -> Result<(), SlotError> {
        if self.restricted && start < self.min_allowed {
            return Err(RuleViolation::BeforeEarliest {
                earliest: self.min_allowed,
            }
            .into());
        }
        Ok(())
    }
}

fn unchanged(slot: &Slot, reason: SlotError) -> Revision {
    debug!("keeping {:?}: {}", slot, reason);
    Revision::Unchanged {
        slot: *slot,
        reason,
    }
}
