//! Request and response bodies for the Cellwatch HTTP API.
//!
//! Record payloads reuse the types from `cellwatch-types`; this module only
//! holds the shapes specific to the HTTP surface.

use serde::{Deserialize, Serialize};

/// Query string of the `/near` endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NearQuery {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// JSON error body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
    #[serde(rename = "type")]
    pub error_type: String,
}
