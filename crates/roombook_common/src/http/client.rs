// --- File: crates/roombook_common/src/http/client.rs ---
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Creates a new HTTP client with the given timeout.
///
/// Redirects are followed with reqwest's default policy. A zero timeout
/// falls back to [`DEFAULT_TIMEOUT_SECS`].
///
/// # Arguments
///
/// * `timeout_secs` - The timeout in seconds for the client
pub fn create_client(timeout_secs: u64) -> Result<Client, ReqwestError> {
    let timeout_secs = if timeout_secs == 0 {
        DEFAULT_TIMEOUT_SECS
    } else {
        timeout_secs
    };
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}
