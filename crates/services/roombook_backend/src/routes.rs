// --- File: crates/services/roombook_backend/src/routes.rs ---
use crate::app_state::AppState;
use crate::handlers::{
    create_booking_handler, create_session_handler, create_slot_handler, delete_booking_handler,
    get_availability_handler, get_catalog_handler, get_rules_handler, list_bookings_handler,
    revise_slot_handler,
};
use axum::{
    routing::{delete, get, post},
    Router,
};

/// Creates a router containing all routes of the booking API.
/// Paths are relative; the application nests them under `/api`.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/session", post(create_session_handler))
        .route("/catalog", get(get_catalog_handler))
        .route("/rules/{resource}", get(get_rules_handler))
        .route("/availability", get(get_availability_handler))
        .route("/slots", post(create_slot_handler))
        .route("/slots/revise", post(revise_slot_handler))
        .route(
            "/bookings",
            get(list_bookings_handler).post(create_booking_handler),
        )
        .route("/bookings/{id}", delete(delete_booking_handler))
        .with_state(state)
}
