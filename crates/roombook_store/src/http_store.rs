// --- File: crates/roombook_store/src/http_store.rs ---
use crate::error::{user_message, StoreError};
use crate::models::{
    BookingId, BookingReceipt, BookingRecord, Catalog, LoginRequest, LoginResponse, NewBooking,
};
use crate::session::Session;
use crate::store::BookingStore;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use roombook_common::create_client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// [`BookingStore`] over the store's JSON HTTP API.
#[derive(Debug, Clone)]
pub struct HttpBookingStore {
    client: Client,
    base_url: String,
}

impl HttpBookingStore {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, StoreError> {
        let client = create_client(timeout_secs)?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends `request` and decodes a JSON answer. An empty body decodes as `null`.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StoreError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = user_message(&body);
            warn!("booking store answered {}: {}", status, message);
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(body).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl BookingStore for HttpBookingStore {
    async fn login(&self, password: &str) -> Result<Session, StoreError> {
        let request = self.client.post(self.url("auth/login")).json(&LoginRequest {
            password: password.to_string(),
        });
        let response: LoginResponse = self.send(request).await?;
        debug!("logged in as {:?}", response.role);
        Ok(Session::new(response.token, response.role))
    }

    async fn catalog(&self) -> Result<Catalog, StoreError> {
        self.send(self.client.get(self.url("bookings/enums"))).await
    }

    async fn list_bookings(&self, session: &Session) -> Result<Vec<BookingRecord>, StoreError> {
        let request = self
            .client
            .get(self.url("bookings/"))
            .header(AUTHORIZATION, session.token());
        let records: Vec<BookingRecord> = self.send(request).await?;
        debug!("fetched {} bookings", records.len());
        Ok(records)
    }

    async fn create_booking(
        &self,
        session: &Session,
        booking: &NewBooking,
    ) -> Result<BookingReceipt, StoreError> {
        let request = self
            .client
            .post(self.url("bookings/"))
            .header(AUTHORIZATION, session.token())
            .json(booking);
        let receipt: Option<BookingReceipt> = self.send(request).await?;
        Ok(receipt.unwrap_or_default())
    }

    async fn delete_booking(&self, session: &Session, id: &BookingId) -> Result<(), StoreError> {
        let request = self
            .client
            .delete(self.url(&format!("bookings/{}", id)))
            .header(AUTHORIZATION, session.token());
        let _: serde_json::Value = self.send(request).await?;
        Ok(())
    }
}
