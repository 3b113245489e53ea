// --- File: crates/services/roombook_backend/src/main.rs ---
use roombook_backend::{build_app, AppState};
use roombook_common::logging;
use roombook_config::load_config;
use std::net::SocketAddr;
use std::process::ExitCode;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            // No subscriber yet
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init_with_level(logging::level_from_str(&config.logging.level));

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to set up application state: {}", e);
            return ExitCode::FAILURE;
        }
    };
    // Warm the catalog cache; handlers retry on first use if the store is down
    if let Err(e) = state.refresh_catalog().await {
        error!("Catalog not loaded at startup: {}", e);
    }

    let app = build_app(state);

    let addr: SocketAddr = match format!("{}:{}", config.server.host, config.server.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Invalid server address: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };
    info!("Roombook backend listening on {}", addr);

    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
