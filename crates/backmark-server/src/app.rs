//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{any, get, post};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::page;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    // API routes: POST converts, every other method is rejected with the
    // JSON "Method Not Allowed." body, unknown subpaths get "Not Found.".
    let api_routes = Router::new()
        .route(
            "/api/v1",
            post(handlers::convert::convert_json).fallback(handlers::convert::method_not_allowed),
        )
        .route("/api/v1/{*path}", any(handlers::convert::not_found));

    Router::new()
        .merge(api_routes)
        .route("/", get(page::home))
        .route("/convert", post(handlers::convert::convert_form))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
