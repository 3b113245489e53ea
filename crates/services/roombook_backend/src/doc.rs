// File: crates/services/roombook_backend/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

// Schema mirrors of the wire shapes. Times are naive local `YYYY-MM-DDTHH:MM:SS`.

#[derive(Serialize, ToSchema)]
pub struct LoginRequestDoc {
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponseDoc {
    pub token: String,
    /// `user` or `admin`
    pub role: String,
}

#[derive(Serialize, ToSchema)]
pub struct SlotDoc {
    pub start: String,
    pub end: String,
}

#[derive(Serialize, ToSchema)]
pub struct DisabledRegionDoc {
    /// `past` or `buffer`
    pub kind: String,
    pub start: Option<String>,
    pub end: String,
}

#[derive(Serialize, ToSchema)]
pub struct CellStateDoc {
    pub start: String,
    pub end: String,
    pub disabled: bool,
}

#[derive(Serialize, ToSchema)]
pub struct AvailabilityResponseDoc {
    pub resource: String,
    pub now: String,
    pub min_allowed: String,
    pub regions: Vec<DisabledRegionDoc>,
    pub mask: Vec<CellStateDoc>,
}

#[derive(Serialize, ToSchema)]
pub struct GestureDoc {
    /// `drag` (with `start` and `end`) or `tap` (with `point`)
    pub kind: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub point: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SlotRequestDoc {
    pub resource: Option<String>,
    pub gesture: GestureDoc,
    /// `drag` or `tap`
    pub mode: Option<String>,
    pub viewport_width: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct SlotResponseDoc {
    pub mode: String,
    pub slot: Option<SlotDoc>,
}

#[derive(Serialize, ToSchema)]
pub struct ReviseRequestDoc {
    pub resource: Option<String>,
    pub slot: SlotDoc,
    /// `start` or `end`
    pub edge: String,
    /// `HH:MM`, snapped to the step grid
    pub text: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReviseResponseDoc {
    pub slot: SlotDoc,
    pub applied: bool,
    pub reason: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RuleSummaryDoc {
    pub resource: String,
    pub opening_from: String,
    pub opening_until: String,
    pub step_minutes: u32,
    pub max_days_ahead: u32,
    pub default_duration_minutes: u32,
    pub buffer_minutes: u32,
    pub notices: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct BookingViewDoc {
    pub id: String,
    pub room: String,
    pub color: String,
    pub start: String,
    pub end: String,
}

#[derive(Serialize, ToSchema)]
pub struct BookingRequestDoc {
    pub resource: String,
    pub room: String,
    pub start: String,
    pub end: String,
}

#[derive(Serialize, ToSchema)]
pub struct BookingReceiptDoc {
    pub id: Option<String>,
    pub status: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDoc {
    pub detail: String,
    pub retryable: bool,
}

#[utoipa::path(
    post,
    path = "/session",
    request_body = LoginRequestDoc,
    responses(
        (status = 200, description = "Session token and role", body = LoginResponseDoc),
        (status = 401, description = "Wrong password", body = ErrorDoc)
    ),
    tag = "roombook"
)]
fn doc_create_session_handler() {}

#[utoipa::path(
    get,
    path = "/catalog",
    responses(
        (status = 200, description = "Rooms, resources and booking rules"),
        (status = 502, description = "Booking store unreachable", body = ErrorDoc)
    ),
    tag = "roombook"
)]
fn doc_get_catalog_handler() {}

#[utoipa::path(
    get,
    path = "/rules/{resource}",
    params(("resource" = String, Path, description = "Resource key or label", example = "SAUNA")),
    responses(
        (status = 200, description = "Rule summary", body = RuleSummaryDoc),
        (status = 404, description = "Unknown resource", body = ErrorDoc)
    ),
    tag = "roombook"
)]
fn doc_get_rules_handler() {}

#[utoipa::path(
    get,
    path = "/availability",
    params(
        ("resource" = Option<String>, Query, description = "Resource key or label, first resource when omitted", example = "SAUNA"),
        ("from" = Option<String>, Query, description = "First day in YYYY-MM-DD format, today when omitted", example = "2024-03-01", format = "date"),
        ("days" = Option<u32>, Query, description = "Number of days, capped at the booking horizon", example = 7),
        ("X-Roombook-Role" = Option<String>, Header, description = "admin disables nothing")
    ),
    responses(
        (status = 200, description = "Earliest bookable instant, disabled regions and cell mask", body = AvailabilityResponseDoc),
        (status = 400, description = "Invalid date", body = ErrorDoc)
    ),
    tag = "roombook"
)]
fn doc_get_availability_handler() {}

#[utoipa::path(
    post,
    path = "/slots",
    params(
        ("X-Roombook-Role" = Option<String>, Header, description = "admin may start inside the lead time")
    ),
    request_body(content = SlotRequestDoc, example = json!({
        "resource": "SAUNA",
        "gesture": {"kind": "tap", "point": "2024-03-02T10:07:00"},
        "viewport_width": 390
    })),
    responses(
        (status = 200, description = "Slot built from the gesture, null when the gesture does not match the input mode", body = SlotResponseDoc),
        (status = 422, description = "Slot outside the booking rules", body = ErrorDoc)
    ),
    tag = "roombook"
)]
fn doc_create_slot_handler() {}

#[utoipa::path(
    post,
    path = "/slots/revise",
    params(
        ("X-Roombook-Role" = Option<String>, Header, description = "admin may start inside the lead time")
    ),
    request_body = ReviseRequestDoc,
    responses(
        (status = 200, description = "Revised slot, or the previous one with the reason", body = ReviseResponseDoc)
    ),
    tag = "roombook"
)]
fn doc_revise_slot_handler() {}

#[utoipa::path(
    get,
    path = "/bookings",
    params(
        ("resource" = Option<String>, Query, description = "Resource key or label"),
        ("Authorization" = String, Header, description = "Session token from /session")
    ),
    responses(
        (status = 200, description = "Bookings of the resource", body = [BookingViewDoc]),
        (status = 401, description = "Not logged in", body = ErrorDoc)
    ),
    tag = "roombook"
)]
fn doc_list_bookings_handler() {}

#[utoipa::path(
    post,
    path = "/bookings",
    params(
        ("Authorization" = String, Header, description = "Session token from /session"),
        ("X-Roombook-Role" = Option<String>, Header, description = "Role reported at login")
    ),
    request_body(content = BookingRequestDoc, example = json!({
        "resource": "SAUNA",
        "room": "WOLF",
        "start": "2024-03-02T10:00:00",
        "end": "2024-03-02T11:00:00"
    })),
    responses(
        (status = 200, description = "Booking created", body = BookingReceiptDoc),
        (status = 409, description = "Rejected by the booking store", body = ErrorDoc,
         example = json!({"detail": "Room occupied", "retryable": true})),
        (status = 422, description = "Outside the booking rules", body = ErrorDoc)
    ),
    tag = "roombook"
)]
fn doc_create_booking_handler() {}

#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    params(
        ("id" = String, Path, description = "Booking id"),
        ("Authorization" = String, Header, description = "Session token from /session"),
        ("X-Roombook-Role" = String, Header, description = "Must be admin")
    ),
    responses(
        (status = 200, description = "Booking deleted"),
        (status = 403, description = "Only administrators may delete bookings", body = ErrorDoc)
    ),
    tag = "roombook"
)]
fn doc_delete_booking_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_create_session_handler,
        doc_get_catalog_handler,
        doc_get_rules_handler,
        doc_get_availability_handler,
        doc_create_slot_handler,
        doc_revise_slot_handler,
        doc_list_bookings_handler,
        doc_create_booking_handler,
        doc_delete_booking_handler
    ),
    components(
        schemas(
            LoginRequestDoc,
            LoginResponseDoc,
            SlotDoc,
            DisabledRegionDoc,
            CellStateDoc,
            AvailabilityResponseDoc,
            GestureDoc,
            SlotRequestDoc,
            SlotResponseDoc,
            ReviseRequestDoc,
            ReviseResponseDoc,
            RuleSummaryDoc,
            BookingViewDoc,
            BookingRequestDoc,
            BookingReceiptDoc,
            ErrorDoc
        )
    ),
    tags(
        (name = "roombook", description = "Room and resource booking API")
    ),
    servers(
        (url = "/api", description = "Roombook API server")
    )
)]
pub struct RoombookApiDoc;
