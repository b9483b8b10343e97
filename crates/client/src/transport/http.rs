//! HTTP/REST client for Cellwatch
//!
//! Mirrors every endpoint of the server. Non-2xx responses are decoded from
//! the server's JSON error body into [`ClientError::Api`].
//!
//! # Example
//!
//! ```ignore
//! use cellwatch_client::CellwatchClient;
//!
//! let client = CellwatchClient::new("http://localhost:3000")?;
//! let summary = client.region_summary().await?;
//! ```

use cellwatch_server::{ErrorResponse, HealthResponse, MessageResponse};
use cellwatch_types::audit::AuditEvent;
use cellwatch_types::cell::GeoCellId;
use cellwatch_types::record::{Asset, AssetInput, Incident, IncidentInput, User, UserInput};
use cellwatch_types::stats::{RegionSummary, TrackerStats};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Server returned {status}: {message}")]
    Api {
        status: StatusCode,
        error_type: String,
        message: String,
    },
}

impl ClientError {
    /// HTTP status of an API error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(e) => e.status(),
            ClientError::InvalidUrl(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Clone, Debug)]
pub struct CellwatchClient {
    http: reqwest::Client,
    base_url: String,
}

impl CellwatchClient {
    /// Create a client for a server at `base_url`, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    pub fn with_http_client(base_url: &str, http: reqwest::Client) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let text = response.text().await?;
        Err(match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(body) => ClientError::Api {
                status,
                error_type: body.error_type,
                message: body.error,
            },
            Err(_) => ClientError::Api {
                status,
                error_type: "unknown".to_string(),
                message: text,
            },
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.http.get(self.url(path))).await
    }

    async fn with_body<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(self.http.request(method, self.url(path)).json(body))
            .await
    }

    async fn delete(&self, path: &str) -> Result<MessageResponse> {
        self.send(self.http.delete(self.url(path))).await
    }

    async fn near<T: DeserializeOwned>(&self, path: &str, lat: f64, lng: f64) -> Result<T> {
        self.send(
            self.http
                .get(self.url(path))
                .query(&[("lat", lat), ("lng", lng)]),
        )
        .await
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        self.get("/health").await
    }

    pub async fn stats(&self) -> Result<TrackerStats> {
        self.get("/stats").await
    }

    // Users

    pub async fn create_user(&self, input: &UserInput) -> Result<User> {
        self.with_body(Method::POST, "/users", input).await
    }

    pub async fn users(&self) -> Result<Vec<User>> {
        self.get("/users").await
    }

    pub async fn user(&self, id: Uuid) -> Result<User> {
        self.get(&format!("/users/{id}")).await
    }

    pub async fn update_user(&self, id: Uuid, input: &UserInput) -> Result<User> {
        self.with_body(Method::PUT, &format!("/users/{id}"), input)
            .await
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<MessageResponse> {
        self.delete(&format!("/users/{id}")).await
    }

    // Assets

    pub async fn create_asset(&self, input: &AssetInput) -> Result<Asset> {
        self.with_body(Method::POST, "/assets", input).await
    }

    pub async fn assets(&self) -> Result<Vec<Asset>> {
        self.get("/assets").await
    }

    pub async fn asset(&self, id: Uuid) -> Result<Asset> {
        self.get(&format!("/assets/{id}")).await
    }

    pub async fn update_asset(&self, id: Uuid, input: &AssetInput) -> Result<Asset> {
        self.with_body(Method::PUT, &format!("/assets/{id}"), input)
            .await
    }

    pub async fn delete_asset(&self, id: Uuid) -> Result<MessageResponse> {
        self.delete(&format!("/assets/{id}")).await
    }

    pub async fn assets_near(&self, lat: f64, lng: f64) -> Result<Vec<Asset>> {
        self.near("/assets/near", lat, lng).await
    }

    pub async fn assets_in_cell(&self, cell: &GeoCellId) -> Result<Vec<Asset>> {
        self.get(&format!("/assets/by-h3/{cell}")).await
    }

    // Incidents

    pub async fn create_incident(&self, input: &IncidentInput) -> Result<Incident> {
        self.with_body(Method::POST, "/incidents", input).await
    }

    pub async fn incidents(&self) -> Result<Vec<Incident>> {
        self.get("/incidents").await
    }

    pub async fn incident(&self, id: Uuid) -> Result<Incident> {
        self.get(&format!("/incidents/{id}")).await
    }

    pub async fn update_incident(&self, id: Uuid, input: &IncidentInput) -> Result<Incident> {
        self.with_body(Method::PUT, &format!("/incidents/{id}"), input)
            .await
    }

    pub async fn delete_incident(&self, id: Uuid) -> Result<MessageResponse> {
        self.delete(&format!("/incidents/{id}")).await
    }

    pub async fn incidents_near(&self, lat: f64, lng: f64) -> Result<Vec<Incident>> {
        self.near("/incidents/near", lat, lng).await
    }

    pub async fn incidents_in_cell(&self, cell: &GeoCellId) -> Result<Vec<Incident>> {
        self.get(&format!("/incidents/by-h3/{cell}")).await
    }

    // Analytics & audit

    pub async fn region_summary(&self) -> Result<RegionSummary> {
        self.get("/analytics/region-summary").await
    }

    pub async fn audit_logs(&self) -> Result<Vec<AuditEvent>> {
        self.get("/audit/logs").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let client = CellwatchClient::new("http://127.0.0.1:3000/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:3000");
        assert_eq!(client.url("/health"), "http://127.0.0.1:3000/health");
    }

    #[test]
    fn test_rejects_url_without_scheme() {
        let err = CellwatchClient::new("127.0.0.1:3000").unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_api_error_status() {
        let err = ClientError::Api {
            status: StatusCode::NOT_FOUND,
            error_type: "not_found".into(),
            message: "Asset not found".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Server returned 404 Not Found: Asset not found");
    }
}
