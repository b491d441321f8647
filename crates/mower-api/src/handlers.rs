//! REST API endpoint handlers for the status server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/status` | Poll telemetry, advancing the job one step |
//! | `POST` | `/api/command` | Stop, pause, or resume mowing |
//! | `POST` | `/api/pattern` | Accept a mowing pattern (not stored) |
//! | `POST` | `/api/field-config` | Set field dimensions and anchors |

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::IntoResponse;
use mower_types::{AckResponse, FieldConfig, FieldConfigResponse, MowerCommand};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Parse a request body as JSON without rejecting it.
///
/// Bodies sent without a JSON content type, empty, or not JSON read as an
/// empty object, so they reach validation and get the same 400 as any
/// other incomplete request.
fn lenient_json(headers: &HeaderMap, body: &Bytes) -> Value {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::trim)
        .is_some_and(|mime| {
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        });
    if !is_json {
        return Value::Object(Map::new());
    }

    serde_json::from_slice(body).unwrap_or_else(|e| {
        if !body.is_empty() {
            debug!(error = %e, bytes = body.len(), "Body is not JSON, treating as empty");
        }
        Value::Object(Map::new())
    })
}

// ---------------------------------------------------------------------------
// GET /api/status
// ---------------------------------------------------------------------------

/// Return the full telemetry snapshot.
///
/// Each poll while mowing advances progress by one percent, so the app's
/// polling rate is what drives the job forward.
pub async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let status = state.simulator.lock().await.poll_status();
    debug!(
        progress = status.mowing_progress,
        battery = status.battery_level,
        is_mowing = status.is_mowing,
        "Status requested"
    );
    Json(status)
}

// ---------------------------------------------------------------------------
// POST /api/command
// ---------------------------------------------------------------------------

/// Apply a control command.
///
/// An absent, non-string, or unrecognised `command` is rejected with 400
/// and leaves the mower untouched.
pub async fn post_command(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let command = MowerCommand::from_request(&lenient_json(&headers, &body)).inspect_err(|e| {
        warn!(error = %e, "Rejected command");
    })?;

    state.simulator.lock().await.apply_command(command);
    info!(%command, "Command received");

    Ok(Json(AckResponse::ok(command.ack_message())))
}

// ---------------------------------------------------------------------------
// POST /api/pattern
// ---------------------------------------------------------------------------

/// Accept a mowing pattern upload.
///
/// The body may be anything; it is neither validated nor stored.
pub async fn post_pattern(body: Bytes) -> impl IntoResponse {
    info!(bytes = body.len(), "Pattern uploaded");
    Json(AckResponse::ok("Pattern uploaded"))
}

// ---------------------------------------------------------------------------
// POST /api/field-config
// ---------------------------------------------------------------------------

/// Store a new field configuration and reset the mower to its start
/// position.
///
/// Requires exactly three anchors and both `width` and `height`. The
/// stored `anchors` and `dimensions` are echoed back as submitted.
pub async fn post_field_config(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let config = FieldConfig::from_request(&lenient_json(&headers, &body)).inspect_err(|e| {
        warn!(error = %e, "Rejected field configuration");
    })?;

    let stored = state.simulator.lock().await.configure_field(config).clone();
    let size = stored.size();
    info!(width = size.width, height = size.height, "Field configured");

    Ok(Json(FieldConfigResponse {
        success: true,
        message: stored.summary(),
        config: stored,
    }))
}
