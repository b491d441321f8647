//! Axum router construction for the status API.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::http::{Method, header};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the status server.
///
/// The router includes:
/// - `GET /api/status` -- telemetry poll
/// - `POST /api/command` -- control command
/// - `POST /api/pattern` -- pattern upload
/// - `POST /api/field-config` -- field configuration
///
/// CORS allows any origin with `GET`, `POST`, and `OPTIONS` and the
/// `Content-Type` header, so the app can call the server from a browser
/// or a device on the LAN.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/status", get(handlers::get_status))
        .route("/api/command", post(handlers::post_command))
        .route("/api/pattern", post(handlers::post_pattern))
        .route("/api/field-config", post(handlers::post_field_config))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
