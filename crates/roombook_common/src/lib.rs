// --- File: crates/roombook_common/src/lib.rs ---

// Declare modules within this crate
pub mod error;   // Error handling
pub mod http;    // HTTP utilities
pub mod logging; // Logging utilities

// Re-export error types and utilities for easier access
pub use error::{
    forbidden, invalid_input, network_failure, out_of_rules, server_error,
    stale_state, HttpStatusCode, RoombookError,
};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, DEFAULT_TIMEOUT_SECS},
    IntoHttpResponse,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, level_from_str, log_error, log_result};
