// --- File: crates/roombook_slots/src/availability.rs ---
use crate::clock::{LocalClock, LocalInstant};
use crate::policy::Role;
use crate::rules::{ResourceKey, RuleSet, TimeOfDay};
use crate::snap::ceil_instant;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::debug;

/// Why a region of the calendar cannot be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    /// Everything before the start of today.
    Past,
    /// From the start of today up to the earliest allowed start.
    Buffer,
}

/// A non-selectable half-open interval `[start, end)`. `start == None` means
/// the region is unbounded towards the past.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisabledRegion {
    pub kind: RegionKind,
    #[serde(with = "crate::clock::wire_opt")]
    pub start: Option<LocalInstant>,
    #[serde(with = "crate::clock::wire")]
    pub end: LocalInstant,
}

impl DisabledRegion {
    pub fn contains(&self, instant: &LocalInstant) -> bool {
        self.start.map_or(true, |start| start <= *instant) && *instant < self.end
    }
}

/// One grid cell of the opening window and whether it can be selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellState {
    #[serde(with = "crate::clock::wire")]
    pub start: LocalInstant,
    #[serde(with = "crate::clock::wire")]
    pub end: LocalInstant,
    pub disabled: bool,
}

/// Earliest bookable start for `resource`: `now` plus the resource buffer,
/// rounded up to the step grid.
pub fn min_allowed_instant(rules: &RuleSet, resource: &ResourceKey, now: LocalInstant) -> LocalInstant {
    let buffered = now + Duration::minutes(i64::from(rules.buffer_minutes(resource)));
    ceil_instant(buffered, rules.step_minutes)
}

pub fn disabled_regions(rules: &RuleSet, resource: &ResourceKey, now: LocalInstant) -> Vec<DisabledRegion> {
    Availability::compute(rules, resource, now).regions()
}

/// Availability of one resource as seen at a fixed "now".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    today: NaiveDate,
    min_allowed: LocalInstant,
    min_time: TimeOfDay,
    max_time: TimeOfDay,
    step_minutes: u32,
    role: Role,
}

impl Availability {
    /// Availability for an ordinary session.
    pub fn compute(rules: &RuleSet, resource: &ResourceKey, now: LocalInstant) -> Self {
        Self::compute_for(rules, resource, now, Role::User)
    }

    /// Availability as seen by `role`. Unrestricted roles keep the computed
    /// earliest start for display but have nothing disabled.
    pub fn compute_for(
        rules: &RuleSet,
        resource: &ResourceKey,
        now: LocalInstant,
        role: Role,
    ) -> Self {
        let min_allowed = min_allowed_instant(rules, resource, now);
        debug!(
            "availability for {} at {} as {:?}: earliest start {}",
            resource,
            LocalClock::serialize(&now),
            role,
            LocalClock::serialize(&min_allowed)
        );
        Self {
            today: now.date(),
            min_allowed,
            min_time: rules.min_time,
            max_time: rules.max_time,
            step_minutes: rules.step_minutes.max(1),
            role,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the earliest start binds selections.
    pub fn is_restricted(&self) -> bool {
        self.role.is_restricted()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn min_allowed(&self) -> LocalInstant {
        self.min_allowed
    }

    /// The past region, then the buffer region when it is non-empty. The
    /// buffer never extends beyond the end of today. Empty for unrestricted roles.
    pub fn regions(&self) -> Vec<DisabledRegion> {
        if !self.is_restricted() {
            return Vec::new();
        }
        let start_of_today = LocalClock::start_of_day(self.today);
        let end_of_today = start_of_today + Duration::days(1);

        let mut regions = vec![DisabledRegion {
            kind: RegionKind::Past,
            start: None,
            end: start_of_today,
        }];

        let buffer_end = self.min_allowed.min(end_of_today);
        if buffer_end > start_of_today {
            regions.push(DisabledRegion {
                kind: RegionKind::Buffer,
                start: Some(start_of_today),
                end: buffer_end,
            });
        }
        regions
    }

    /// For restricted roles a cell is disabled when its day is before today,
    /// or it is today and it starts before the earliest allowed start.
    pub fn is_disabled(&self, cell_start: &LocalInstant) -> bool {
        let day = cell_start.date();
        self.is_restricted()
            && (day < self.today || (day == self.today && *cell_start < self.min_allowed))
    }

    /// The grid cells of `day`'s opening window. A trailing remainder shorter
    /// than one step becomes a shorter final cell.
    pub fn cells(&self, day: NaiveDate) -> Vec<CellState> {
        let open = LocalClock::combine(&LocalClock::start_of_day(day), self.min_time);
        let close = LocalClock::combine(&LocalClock::start_of_day(day), self.max_time);
        let step = Duration::minutes(i64::from(self.step_minutes));

        let mut cells = Vec::new();
        let mut start = open;
        while start < close {
            let end = (start + step).min(close);
            cells.push(CellState {
                start,
                end,
                disabled: self.is_disabled(&start),
            });
            start = end;
        }
        cells
    }

    /// Cells for every day in `days`, in order.
    pub fn mask<I>(&self, days: I) -> Vec<CellState>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        days.into_iter().flat_map(|day| self.cells(day)).collect()
    }

    /// `count` consecutive days starting at `from`.
    pub fn days_from(from: NaiveDate, count: u32) -> impl Iterator<Item = NaiveDate> {
        (0..i64::from(count)).map(move |offset| from + Duration::days(offset))
    }
}
