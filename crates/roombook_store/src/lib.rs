// --- File: crates/roombook_store/src/lib.rs ---
pub mod engine;
#[cfg(test)]
mod engine_test;
pub mod error;
pub mod feed;
pub mod http_store;
pub mod models;
pub mod session;
pub mod store;
pub mod submitter;

pub use engine::{BookingEngine, Draft};
pub use error::{user_message, StoreError, FALLBACK_MESSAGE};
pub use feed::{BookingFeed, Ticket};
pub use http_store::HttpBookingStore;
pub use models::{
    BookingId, BookingReceipt, BookingRecord, BookingView, Catalog, LoginRequest, LoginResponse,
    NewBooking,
};
pub use session::Session;
pub use store::BookingStore;
pub use submitter::BookingSubmitter;
