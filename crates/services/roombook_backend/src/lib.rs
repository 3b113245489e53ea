// --- File: crates/services/roombook_backend/src/lib.rs ---
pub mod app_state;
pub mod auth;
pub mod doc;
pub mod handlers;
pub mod models;
pub mod routes;

pub use app_state::AppState;
pub use auth::{role_from_headers, session_from_headers, ROLE_HEADER};

use axum::Router;
use tower_http::trace::TraceLayer;

/// The full application: the booking API under `/api`, plus Swagger UI at
/// `/api/docs` when built with the `openapi` feature.
pub fn build_app(state: AppState) -> Router {
    #[allow(unused_mut)]
    let mut app = Router::new().nest("/api", routes::routes(state));

    #[cfg(feature = "openapi")]
    {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        tracing::info!("Adding Swagger UI at /api/docs");
        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", doc::RoombookApiDoc::openapi());
        app = app.merge(swagger_ui);
    }

    app.layer(TraceLayer::new_for_http())
}
