// --- File: crates/roombook_store/src/submitter.rs ---
use crate::error::StoreError;
use crate::models::{BookingId, BookingReceipt, NewBooking};
use crate::session::Session;
use crate::store::BookingStore;
use roombook_common::log_result;
use roombook_slots::{
    LocalClock, LocalInstant, ResourceKey, RoomKey, RuleSet, Slot, SlotError, SlotPolicy,
};
use std::sync::Arc;
use tracing::info;

/// Sends finished slots to the booking store and removes bookings.
#[derive(Clone)]
pub struct BookingSubmitter {
    store: Arc<dyn BookingStore>,
}

impl BookingSubmitter {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// Creates a booking for `slot`. Errors come back with the store's
    /// message already reduced to user-facing text.
    pub async fn submit(
        &self,
        session: &Session,
        slot: &Slot,
        resource: &ResourceKey,
        room: &RoomKey,
    ) -> Result<BookingReceipt, StoreError> {
        let booking = NewBooking::new(slot, resource, room);
        info!(
            "booking {} / {} from {} to {}",
            resource,
            room,
            LocalClock::serialize(&booking.start),
            LocalClock::serialize(&booking.end)
        );
        log_result(
            self.store.create_booking(session, &booking).await,
            "booking created",
            "booking rejected",
        )
    }

    /// Checks `slot` against `rules` for the session's role, then submits it.
    /// Nothing reaches the store when the check fails.
    pub async fn check_and_submit(
        &self,
        session: &Session,
        rules: &RuleSet,
        slot: &Slot,
        resource: &ResourceKey,
        room: &RoomKey,
        now: LocalInstant,
    ) -> Result<BookingReceipt, StoreError> {
        SlotPolicy::new(rules, session.role())
            .check(slot, resource, now)
            .map_err(SlotError::from)?;
        self.submit(session, slot, resource, room).await
    }

    /// Deletes a booking. Only sessions that may delete bookings get past the
    /// local check; nothing is sent otherwise.
    pub async fn remove(&self, session: &Session, id: &BookingId) -> Result<(), StoreError> {
        if !session.may_delete_bookings() {
            return Err(StoreError::Forbidden(
                "Only administrators may delete bookings".to_string(),
            ));
        }
        log_result(
            self.store.delete_booking(session, id).await,
            "booking deleted",
            "booking deletion failed",
        )
    }
}
