// ABOUTME: Route definitions for the brewlog HTTP API.
// ABOUTME: Nests brew routes under the configured prefix and applies CORS and request tracing.

use axum::Router;
use axum::routing::get;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;

/// Build the complete Axum router with all routes and shared state.
pub fn create_router(state: SharedState) -> Router {
    let brews = Router::new()
        .route(
            "/brews/",
            get(api::brews::list_brews).post(api::brews::create_brew),
        )
        .route(
            "/brews",
            get(api::brews::list_brews).post(api::brews::create_brew),
        )
        .route(
            "/brews/{brew_id}",
            get(api::brews::get_brew)
                .put(api::brews::update_brew)
                .delete(api::brews::delete_brew),
        );

    let prefix = state.config.api_prefix.as_str();
    let app = Router::new().route("/health", get(health));
    let app = if prefix.is_empty() {
        app.merge(brews)
    } else {
        app.nest(prefix, brews)
    };

    let cors = CorsLayer::new()
        .allow_origin(state.config.cors_origin.clone())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler. Returns 200 OK with a simple JSON body.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
