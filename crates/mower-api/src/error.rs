//! Error types for the status API.
//!
//! Every failure the API models is a request-validation failure, rendered
//! as HTTP 400 with the same `{success, message}` body the app reads on
//! success.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mower_types::{AckResponse, FieldConfigError, UnknownCommand};

/// Errors that can occur in the status API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The command name is not one the mower understands.
    #[error("Unknown command")]
    UnknownCommand(#[from] UnknownCommand),

    /// The field configuration failed validation.
    #[error("{0}")]
    InvalidFieldConfig(#[from] FieldConfigError),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::UnknownCommand(_) | Self::InvalidFieldConfig(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = AckResponse::rejected(self.to_string());
        (self.status(), axum::Json(body)).into_response()
    }
}
