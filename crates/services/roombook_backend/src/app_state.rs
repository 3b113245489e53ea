// --- File: crates/services/roombook_backend/src/app_state.rs ---
use roombook_common::RoombookError;
use roombook_config::{AppConfig, UiConfig};
use roombook_slots::{Clock, SystemClock};
use roombook_store::{BookingStore, BookingSubmitter, Catalog, HttpBookingStore};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Application state that is shared across all routes.
///
/// Handlers are stateless per request. The only shared data is the catalog,
/// fetched from the booking store on first use and kept until
/// [`AppState::refresh_catalog`] replaces it.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookingStore>,
    pub submitter: BookingSubmitter,
    pub clock: Arc<dyn Clock>,
    pub ui: UiConfig,
    catalog: Arc<RwLock<Option<Arc<Catalog>>>>,
}

impl AppState {
    pub fn new(store: Arc<dyn BookingStore>, clock: Arc<dyn Clock>, ui: UiConfig) -> Self {
        Self {
            submitter: BookingSubmitter::new(store.clone()),
            store,
            clock,
            ui,
            catalog: Arc::new(RwLock::new(None)),
        }
    }

    /// Wires the HTTP booking store and the system clock from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, RoombookError> {
        let store = HttpBookingStore::new(config.store.base_url.clone(), config.store.timeout_secs)?;
        let clock = SystemClock::from_zone_name(config.clock.time_zone.as_deref())?;
        info!("booking store at {}", store.base_url());
        Ok(Self::new(Arc::new(store), Arc::new(clock), config.ui.clone()))
    }

    /// The cached catalog, fetched on first use.
    pub async fn catalog(&self) -> Result<Arc<Catalog>, RoombookError> {
        if let Some(catalog) = self.catalog.read().await.as_ref() {
            return Ok(catalog.clone());
        }
        self.refresh_catalog().await
    }

    /// Fetches the catalog again and replaces the cached one. Rules that do
    /// not validate are never cached.
    pub async fn refresh_catalog(&self) -> Result<Arc<Catalog>, RoombookError> {
        // The lock is not held across the store call
        let catalog = self.store.catalog().await?;
        catalog.rules.validate()?;
        let catalog = Arc::new(catalog);
        *self.catalog.write().await = Some(catalog.clone());
        info!(
            "catalog loaded: {} rooms, {} resources",
            catalog.rooms.len(),
            catalog.resources.len()
        );
        Ok(catalog)
    }
}
