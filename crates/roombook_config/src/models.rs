// --- File: crates/roombook_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// --- Booking Store Config ---
// Where the external booking store lives. Session tokens are never configured,
// they come from the store's login endpoint at runtime.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StoreConfig {
    pub base_url: String, // Mandatory, e.g. https://booking.example.org
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

// --- Clock Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ClockConfig {
    /// IANA zone used for "now", e.g. "Europe/Zurich". The host's local zone when unset.
    pub time_zone: Option<String>,
}

// --- UI Config ---
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UiConfig {
    /// Viewports at or below this width use tap selection instead of drag.
    #[serde(default = "default_mobile_breakpoint_px")]
    pub mobile_breakpoint_px: u32,
}

fn default_mobile_breakpoint_px() -> u32 {
    768
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: default_mobile_breakpoint_px(),
        }
    }
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    // Store config is mandatory
    pub store: StoreConfig,

    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
