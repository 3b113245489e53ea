// --- File: crates/services/roombook_backend/src/handlers.rs ---
use crate::app_state::AppState;
use crate::auth::{role_from_headers, session_from_headers};
use crate::models::{
    AvailabilityQuery, AvailabilityResponse, BookingRequest, BookingsQuery, DeleteResponse, Edge,
    ReviseRequest, ReviseResponse, SlotRequest, SlotResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Json,
};
use chrono::NaiveDate;
use roombook_common::{invalid_input, RoombookError};
use roombook_slots::{Availability, InputMode, ResourceKey, Revision, RuleSummary, SlotBuilder};
use roombook_store::{
    BookingId, BookingReceipt, BookingView, Catalog, LoginRequest, LoginResponse,
};
use tracing::{debug, info};

/// Days shown when the availability query names none.
pub const DEFAULT_DAYS: u32 = 7;

/// Finds a resource by key or label, falling back to the first one.
fn resolve_resource(catalog: &Catalog, value: Option<&str>) -> Result<ResourceKey, RoombookError> {
    match value {
        None => catalog
            .default_resource()
            .cloned()
            .ok_or_else(|| RoombookError::NotFound("No resources are configured".to_string())),
        Some(value) => catalog
            .resources
            .iter()
            .find(|resource| resource.key.as_str() == value || resource.label == value)
            .map(|resource| resource.key.clone())
            .ok_or_else(|| RoombookError::NotFound(format!("Unknown resource: {}", value))),
    }
}

pub async fn create_session_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, RoombookError> {
    let session = state.store.login(&request.password).await?;
    info!("login succeeded as {:?}", session.role());
    Ok(Json(LoginResponse {
        token: session.token().to_string(),
        role: session.role(),
    }))
}

pub async fn get_catalog_handler(
    State(state): State<AppState>,
) -> Result<Json<Catalog>, RoombookError> {
    let catalog = state.catalog().await?;
    Ok(Json(catalog.as_ref().clone()))
}

pub async fn get_rules_handler(
    State(state): State<AppState>,
    Path(resource): Path<String>,
) -> Result<Json<RuleSummary>, RoombookError> {
    let catalog = state.catalog().await?;
    let resource = resolve_resource(&catalog, Some(&resource))?;
    Ok(Json(RuleSummary::for_resource(&catalog.rules, &resource)))
}

/// Disabled regions and the per-cell mask for `days` days from `from`.
/// The range is capped at the booking horizon. Administrators see nothing
/// disabled.
pub async fn get_availability_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, RoombookError> {
    let catalog = state.catalog().await?;
    let resource = resolve_resource(&catalog, query.resource.as_deref())?;
    let now = state.clock.now();
    let role = role_from_headers(&headers);
    let availability = Availability::compute_for(&catalog.rules, &resource, now, role);

    let from = match query.from.as_deref() {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|_| invalid_input("from must be a date (YYYY-MM-DD)"))?,
        None => availability.today(),
    };
    let horizon = catalog.rules.max_days_ahead.saturating_add(1);
    let days = query.days.unwrap_or(DEFAULT_DAYS).clamp(1, horizon);
    debug!("availability for {} from {} over {} days", resource, from, days);

    Ok(Json(AvailabilityResponse {
        now,
        min_allowed: availability.min_allowed(),
        regions: availability.regions(),
        mask: availability.mask(Availability::days_from(from, days)),
        resource,
    }))
}

pub async fn create_slot_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SlotRequest>,
) -> Result<Json<SlotResponse>, RoombookError> {
    let catalog = state.catalog().await?;
    let resource = resolve_resource(&catalog, request.resource.as_deref())?;
    let mode = request.mode.unwrap_or_else(|| match request.viewport_width {
        Some(width) => InputMode::for_viewport(width, state.ui.mobile_breakpoint_px),
        None => InputMode::Drag,
    });

    let availability = Availability::compute_for(
        &catalog.rules,
        &resource,
        state.clock.now(),
        role_from_headers(&headers),
    );
    let builder = SlotBuilder::new(&catalog.rules, &availability);
    let slot = builder.from_gesture(mode, &request.gesture).transpose()?;
    Ok(Json(SlotResponse { mode, slot }))
}

/// Applies an edited start or end time. A rejected edit answers with the
/// previous slot and the reason instead of an error.
pub async fn revise_slot_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ReviseRequest>,
) -> Result<Json<ReviseResponse>, RoombookError> {
    let catalog = state.catalog().await?;
    let resource = resolve_resource(&catalog, request.resource.as_deref())?;
    let availability = Availability::compute_for(
        &catalog.rules,
        &resource,
        state.clock.now(),
        role_from_headers(&headers),
    );
    let builder = SlotBuilder::new(&catalog.rules, &availability);

    let revision = match request.edge {
        Edge::Start => builder.revise_start(&request.slot, &request.text),
        Edge::End => builder.revise_end(&request.slot, &request.text),
    };
    Ok(Json(match revision {
        Revision::Applied(slot) => ReviseResponse {
            slot,
            applied: true,
            reason: None,
        },
        Revision::Unchanged { slot, reason } => ReviseResponse {
            slot,
            applied: false,
            reason: Some(reason.to_string()),
        },
    }))
}

pub async fn list_bookings_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<BookingView>>, RoombookError> {
    let session = session_from_headers(&headers)?;
    let catalog = state.catalog().await?;
    let resource = resolve_resource(&catalog, query.resource.as_deref())?;
    let records = state.store.list_bookings(&session).await?;
    Ok(Json(catalog.bookings_for(&resource, &records)))
}

/// Validates the slot against the booking rules for the caller's role and
/// forwards it to the store. Nothing is sent when a local check fails.
pub async fn create_booking_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<BookingRequest>,
) -> Result<Json<BookingReceipt>, RoombookError> {
    let session = session_from_headers(&headers)?;
    let slot = request.slot()?;
    let catalog = state.catalog().await?;
    let resource = resolve_resource(&catalog, Some(&request.resource))?;
    if catalog.room(&request.room).is_none() {
        return Err(RoombookError::NotFound(format!("Unknown room: {}", request.room)));
    }

    let receipt = state
        .submitter
        .check_and_submit(
            &session,
            &catalog.rules,
            &slot,
            &resource,
            &request.room,
            state.clock.now(),
        )
        .await?;
    Ok(Json(receipt))
}

pub async fn delete_booking_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, RoombookError> {
    let session = session_from_headers(&headers)?;
    let id = BookingId::new(id);
    state.submitter.remove(&session, &id).await?;
    Ok(Json(DeleteResponse { id, deleted: true }))
}
