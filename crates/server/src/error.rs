//! Server error types with HTTP status code mapping

use crate::protocol::ErrorResponse;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cellwatch::{CellwatchError, RecordKind};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    Core(#[from] CellwatchError),

    /// Unknown or malformed record id
    #[error("{0} not found")]
    NotFound(RecordKind),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ServerError {
    /// Short machine-readable error kind.
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Core(CellwatchError::InvalidCoordinate(_)) => "invalid_coordinate",
            ServerError::Core(CellwatchError::InvalidResolution(_)) => "invalid_resolution",
            ServerError::Core(CellwatchError::InvalidCell(_)) => "invalid_cell",
            ServerError::Core(CellwatchError::NotFound { .. }) | ServerError::NotFound(_) => {
                "not_found"
            }
            ServerError::Core(CellwatchError::InvalidConfig(_)) => "internal",
            ServerError::BadRequest(_) => "bad_request",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 - rejected input, never retried
            ServerError::Core(CellwatchError::InvalidCoordinate(_)) => StatusCode::BAD_REQUEST,
            ServerError::Core(CellwatchError::InvalidResolution(_)) => StatusCode::BAD_REQUEST,
            ServerError::Core(CellwatchError::InvalidCell(_)) => StatusCode::BAD_REQUEST,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // 404 - Not Found
            ServerError::Core(CellwatchError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,

            // 500 - server-side misconfiguration
            ServerError::Core(CellwatchError::InvalidConfig(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ServerError::BadRequest(msg.into())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            status: status.as_u16(),
            error_type: self.error_type().to_string(),
        };

        (status, Json(body)).into_response()
    }
}
