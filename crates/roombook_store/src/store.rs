// --- File: crates/roombook_store/src/store.rs ---
//! The booking store seen from this side: a small REST contract.
//!
//! The store owns persistence, conflict checks and the one-booking-per-day
//! rule. Everything here only reads the catalog and bookings, or asks the
//! store to create or delete one.

use crate::error::StoreError;
use crate::models::{BookingId, BookingReceipt, BookingRecord, Catalog, NewBooking};
use crate::session::Session;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Exchanges a password for a session.
    async fn login(&self, password: &str) -> Result<Session, StoreError>;

    /// Rooms, resources and booking rules.
    async fn catalog(&self) -> Result<Catalog, StoreError>;

    /// Every booking, across all resources.
    async fn list_bookings(&self, session: &Session) -> Result<Vec<BookingRecord>, StoreError>;

    async fn create_booking(
        &self,
        session: &Session,
        booking: &NewBooking,
    ) -> Result<BookingReceipt, StoreError>;

    async fn delete_booking(&self, session: &Session, id: &BookingId) -> Result<(), StoreError>;
}
