// --- File: crates/roombook_store/src/engine.rs ---
//! One booking session: catalog, active resource, bookings and the slot draft.
//!
//! Ordinary and administrator sessions share this engine; the session's
//! [`Role`] decides which rules bind and whether deletion is allowed.
//! State lives behind a mutex that is never held across a store call, so a
//! fetch started for one resource cannot overwrite bookings of a resource
//! selected later (see [`BookingFeed`]).

use crate::error::StoreError;
use crate::feed::BookingFeed;
use crate::models::{BookingId, BookingReceipt, BookingView, Catalog};
use crate::session::Session;
use crate::store::BookingStore;
use crate::submitter::BookingSubmitter;
use chrono::NaiveDate;
use roombook_common::{invalid_input, log_error, RoombookError};
use roombook_slots::{
    Availability, CellState, Clock, Gesture, InputMode, ResourceKey, Revision, Role, RoomKey,
    RuleSummary, Slot, SlotBuilder,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// The slot being prepared for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draft {
    pub slot: Slot,
    pub room: Option<RoomKey>,
}

#[derive(Debug, Default)]
struct EngineState {
    session: Option<Session>,
    catalog: Option<Arc<Catalog>>,
    active: Option<ResourceKey>,
    feed: BookingFeed,
    draft: Option<Draft>,
}

impl EngineState {
    fn context(&self) -> Option<(Arc<Catalog>, ResourceKey)> {
        Some((self.catalog.clone()?, self.active.clone()?))
    }

    /// Role the rules bind for; ordinary rules apply without a session.
    fn role(&self) -> Role {
        self.session.as_ref().map_or(Role::User, Session::role)
    }
}

enum Edge {
    Start,
    End,
}

pub struct BookingEngine {
    store: Arc<dyn BookingStore>,
    submitter: BookingSubmitter,
    clock: Arc<dyn Clock>,
    input_mode: InputMode,
    state: Mutex<EngineState>,
}

impl BookingEngine {
    pub fn new(store: Arc<dyn BookingStore>, clock: Arc<dyn Clock>, input_mode: InputMode) -> Self {
        Self {
            submitter: BookingSubmitter::new(store.clone()),
            store,
            clock,
            input_mode,
            state: Mutex::new(EngineState::default()),
        }
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    // --- Session lifecycle ---

    /// Starts a session. A draft or bookings left from an earlier session
    /// are dropped.
    pub async fn login(&self, password: &str) -> Result<Role, RoombookError> {
        let session = self.store.login(password).await?;
        let role = session.role();
        let mut state = self.state.lock().await;
        state.session = Some(session);
        state.draft = None;
        state.feed.reset();
        info!("session started as {:?}", role);
        Ok(role)
    }

    /// Ends the session. The catalog stays; draft and bookings are dropped.
    pub async fn logout(&self) {
        let mut state = self.state.lock().await;
        state.session = None;
        state.draft = None;
        state.feed.reset();
        info!("session ended");
    }

    pub async fn role(&self) -> Option<Role> {
        self.state.lock().await.session.as_ref().map(Session::role)
    }

    pub async fn may_delete_bookings(&self) -> bool {
        self.role().await.is_some_and(Role::may_delete_bookings)
    }

    // --- Catalog and resource ---

    /// Fetches and installs the catalog. The first resource becomes active
    /// unless the active one still exists.
    pub async fn load_catalog(&self) -> Result<Arc<Catalog>, RoombookError> {
        let catalog = self.store.catalog().await?;
        catalog.rules.validate()?;
        let catalog = Arc::new(catalog);

        let mut state = self.state.lock().await;
        let keep_active = state
            .active
            .as_ref()
            .is_some_and(|key| catalog.resource(key).is_some());
        if !keep_active {
            state.active = catalog.default_resource().cloned();
            state.draft = None;
            state.feed.reset();
        }
        state.catalog = Some(catalog.clone());
        debug!(
            "catalog loaded: {} rooms, {} resources",
            catalog.rooms.len(),
            catalog.resources.len()
        );
        Ok(catalog)
    }

    /// Switches the active resource. Returns `None` until the catalog is loaded.
    pub async fn select_resource(
        &self,
        key: ResourceKey,
    ) -> Result<Option<RuleSummary>, RoombookError> {
        let mut state = self.state.lock().await;
        let Some(catalog) = state.catalog.clone() else {
            return Ok(None);
        };
        if catalog.resource(&key).is_none() {
            return Err(RoombookError::NotFound(format!("Unknown resource: {}", key)));
        }
        if state.active.as_ref() != Some(&key) {
            state.draft = None;
            state.feed.reset();
        }
        let summary = RuleSummary::for_resource(&catalog.rules, &key);
        state.active = Some(key);
        Ok(Some(summary))
    }

    pub async fn active_resource(&self) -> Option<ResourceKey> {
        self.state.lock().await.active.clone()
    }

    pub async fn rule_summary(&self) -> Option<RuleSummary> {
        let (catalog, resource) = self.state.lock().await.context()?;
        Some(RuleSummary::for_resource(&catalog.rules, &resource))
    }

    // --- Bookings ---

    /// Re-fetches the bookings of the active resource. `Ok(None)` means
    /// nothing to show yet, or a newer fetch has superseded this one.
    pub async fn refresh_bookings(&self) -> Result<Option<Vec<BookingView>>, RoombookError> {
        let (session, catalog, resource, ticket) = {
            let mut state = self.state.lock().await;
            let session = state.session.clone().ok_or(StoreError::NoSession)?;
            let Some((catalog, resource)) = state.context() else {
                return Ok(None);
            };
            (session, catalog, resource, state.feed.issue())
        };

        let records = self.store.list_bookings(&session).await?;
        let views = catalog.bookings_for(&resource, &records);

        let mut state = self.state.lock().await;
        if state.feed.accept(ticket, views.clone()) {
            Ok(Some(views))
        } else {
            debug!("dropping superseded bookings of {}", resource);
            Ok(None)
        }
    }

    pub async fn bookings(&self) -> Vec<BookingView> {
        self.state.lock().await.feed.bookings().to_vec()
    }

    // --- Availability ---

    pub async fn availability(&self) -> Option<Availability> {
        let state = self.state.lock().await;
        let (catalog, resource) = state.context()?;
        Some(Availability::compute_for(
            &catalog.rules,
            &resource,
            self.clock.now(),
            state.role(),
        ))
    }

    pub async fn mask(&self, from: NaiveDate, days: u32) -> Option<Vec<CellState>> {
        let availability = self.availability().await?;
        Some(availability.mask(Availability::days_from(from, days)))
    }

    // --- Draft ---

    /// Starts a new draft from a calendar gesture, replacing the previous one
    /// and its room choice. `None` when the catalog is not loaded or the
    /// gesture does not belong to this session's input mode.
    pub async fn select(&self, gesture: &Gesture) -> Option<Result<Slot, RoombookError>> {
        let mut state = self.state.lock().await;
        let (catalog, resource) = state.context()?;
        let availability =
            Availability::compute_for(&catalog.rules, &resource, self.clock.now(), state.role());
        let builder = SlotBuilder::new(&catalog.rules, &availability);

        match builder.from_gesture(self.input_mode, gesture)? {
            Ok(slot) => {
                state.draft = Some(Draft { slot, room: None });
                Some(Ok(slot))
            }
            Err(err) => Some(Err(err.into())),
        }
    }

    pub async fn revise_start(&self, text: &str) -> Option<Revision> {
        self.revise(text, Edge::Start).await
    }

    pub async fn revise_end(&self, text: &str) -> Option<Revision> {
        self.revise(text, Edge::End).await
    }

    async fn revise(&self, text: &str, edge: Edge) -> Option<Revision> {
        let mut state = self.state.lock().await;
        let (catalog, resource) = state.context()?;
        let slot = state.draft.as_ref()?.slot;
        let availability =
            Availability::compute_for(&catalog.rules, &resource, self.clock.now(), state.role());
        let builder = SlotBuilder::new(&catalog.rules, &availability);

        let revision = match edge {
            Edge::Start => builder.revise_start(&slot, text),
            Edge::End => builder.revise_end(&slot, text),
        };
        if let (Revision::Applied(revised), Some(draft)) = (&revision, state.draft.as_mut()) {
            draft.slot = *revised;
        }
        Some(revision)
    }

    /// Picks the room for the draft. Returns whether there was a draft to update.
    pub async fn choose_room(&self, room: RoomKey) -> Result<bool, RoombookError> {
        let mut state = self.state.lock().await;
        let Some(catalog) = state.catalog.clone() else {
            return Ok(false);
        };
        if catalog.room(&room).is_none() {
            return Err(RoombookError::NotFound(format!("Unknown room: {}", room)));
        }
        match state.draft.as_mut() {
            Some(draft) => {
                draft.room = Some(room);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn draft(&self) -> Option<Draft> {
        self.state.lock().await.draft.clone()
    }

    pub async fn cancel(&self) {
        self.state.lock().await.draft = None;
    }

    /// Checks the draft against the rules for this session's role, submits it
    /// and refreshes the bookings. The draft is consumed on success and kept
    /// on failure.
    pub async fn submit_draft(&self) -> Result<BookingReceipt, RoombookError> {
        let (session, catalog, resource, draft) = {
            let state = self.state.lock().await;
            let session = state.session.clone().ok_or(StoreError::NoSession)?;
            let (catalog, resource) = state.context().ok_or(StoreError::Stale)?;
            let draft = state
                .draft
                .clone()
                .ok_or_else(|| invalid_input("Select a time slot first"))?;
            (session, catalog, resource, draft)
        };
        let room = draft
            .room
            .clone()
            .ok_or_else(|| invalid_input("Choose a room"))?;

        let receipt = self
            .submitter
            .check_and_submit(
                &session,
                &catalog.rules,
                &draft.slot,
                &resource,
                &room,
                self.clock.now(),
            )
            .await?;

        {
            let mut state = self.state.lock().await;
            if state.draft.as_ref() == Some(&draft) {
                state.draft = None;
            }
        }
        if let Err(err) = self.refresh_bookings().await {
            log_error(&err, "refreshing bookings after submit");
        }
        Ok(receipt)
    }

    /// Deletes a booking; administrators only.
    pub async fn remove(&self, id: &BookingId) -> Result<(), RoombookError> {
        let session = {
            let state = self.state.lock().await;
            if state.catalog.is_none() {
                return Err(StoreError::Stale.into());
            }
            state.session.clone().ok_or(StoreError::NoSession)?
        };
        self.submitter.remove(&session, id).await?;
        if let Err(err) = self.refresh_bookings().await {
            log_error(&err, "refreshing bookings after delete");
        }
        Ok(())
    }
}
