// --- File: crates/roombook_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{HttpStatusCode, RoombookError};

// Include the client module
pub mod client;

/// Extension trait for RoombookError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for RoombookError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Same shape as the booking store's errors, so UIs need a single mapping policy
        let body = Json(json!({
            "detail": self.detail(),
            "retryable": self.is_retryable(),
        }));

        (status_code, body).into_response()
    }
}

impl IntoResponse for RoombookError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}
