//! Request handlers for the Cellwatch HTTP API
//!
//! Every handler receives the shared `Tracker` handle as axum state. Mutating
//! handlers index coordinates synchronously through the tracker; a rejected
//! coordinate is answered with 400 and nothing is stored.

use crate::error::{Result, ServerError};
use crate::protocol::{HealthResponse, MessageResponse, NearQuery};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use cellwatch::{
    Asset, AssetInput, AuditEvent, GeoCellId, Incident, IncidentInput, RecordKind,
    RegionSummary, Tracker, TrackerStats, User, UserInput,
};
use uuid::Uuid;

/// Unknown and malformed ids both answer "not found".
fn parse_id(kind: RecordKind, raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ServerError::NotFound(kind))
}

/// Missing or non-numeric `lat`/`lng` answer 400 with the usual error body.
fn near_query(
    query: std::result::Result<Query<NearQuery>, QueryRejection>,
) -> Result<NearQuery> {
    query
        .map(|Query(q)| q)
        .map_err(|rejection| ServerError::bad_request(rejection.body_text()))
}

/// Malformed or incomplete JSON bodies answer 400 with the usual error body.
fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body
        .map(|Json(input)| input)
        .map_err(|rejection| ServerError::bad_request(rejection.body_text()))
}

fn parse_cell(raw: &str) -> Result<GeoCellId> {
    raw.parse::<GeoCellId>()
        .map_err(|e| ServerError::Core(e.into()))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    tracing::debug!("health check requested");
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /stats
pub async fn stats(State(tracker): State<Tracker>) -> Json<TrackerStats> {
    Json(tracker.stats())
}

// ---- users ----

/// POST /users
pub async fn create_user(
    State(tracker): State<Tracker>,
    body: std::result::Result<Json<UserInput>, JsonRejection>,
) -> Result<Json<User>> {
    let input = json_body(body)?;
    let user = tracker.create_user(input);
    tracing::info!(user_id = %user.id, "user created");
    Ok(Json(user))
}

/// GET /users
pub async fn list_users(State(tracker): State<Tracker>) -> Json<Vec<User>> {
    Json(tracker.users())
}

/// GET /users/{id}
pub async fn get_user(
    State(tracker): State<Tracker>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    let id = parse_id(RecordKind::User, &id)?;
    Ok(Json(tracker.user(id)?))
}

/// PUT /users/{id}
pub async fn update_user(
    State(tracker): State<Tracker>,
    Path(id): Path<String>,
    body: std::result::Result<Json<UserInput>, JsonRejection>,
) -> Result<Json<User>> {
    let input = json_body(body)?;
    let id = parse_id(RecordKind::User, &id)?;
    Ok(Json(tracker.update_user(id, input)?))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(tracker): State<Tracker>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_id(RecordKind::User, &id)?;
    tracker.delete_user(id)?;
    tracing::info!(user_id = %id, "user deleted");
    Ok(Json(MessageResponse::new("User deleted")))
}

// ---- assets ----

/// POST /assets
pub async fn create_asset(
    State(tracker): State<Tracker>,
    body: std::result::Result<Json<AssetInput>, JsonRejection>,
) -> Result<Json<Asset>> {
    let input = json_body(body)?;
    let asset = tracker.create_asset(input)?;
    tracing::info!(asset_id = %asset.id, cell = %asset.cell_id, "asset created");
    Ok(Json(asset))
}

/// GET /assets
pub async fn list_assets(State(tracker): State<Tracker>) -> Json<Vec<Asset>> {
    Json(tracker.assets())
}

/// GET /assets/{id}
pub async fn get_asset(
    State(tracker): State<Tracker>,
    Path(id): Path<String>,
) -> Result<Json<Asset>> {
    let id = parse_id(RecordKind::Asset, &id)?;
    Ok(Json(tracker.asset(id)?))
}

/// PUT /assets/{id}
pub async fn update_asset(
    State(tracker): State<Tracker>,
    Path(id): Path<String>,
    body: std::result::Result<Json<AssetInput>, JsonRejection>,
) -> Result<Json<Asset>> {
    let input = json_body(body)?;
    let id = parse_id(RecordKind::Asset, &id)?;
    let asset = tracker.update_asset(id, input)?;
    tracing::info!(asset_id = %asset.id, cell = %asset.cell_id, "asset updated");
    Ok(Json(asset))
}

/// DELETE /assets/{id}
pub async fn delete_asset(
    State(tracker): State<Tracker>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_id(RecordKind::Asset, &id)?;
    tracker.delete_asset(id)?;
    tracing::info!(asset_id = %id, "asset deleted");
    Ok(Json(MessageResponse::new("Asset deleted")))
}

/// GET /assets/by-h3/{h3_index}
pub async fn assets_by_cell(
    State(tracker): State<Tracker>,
    Path(cell): Path<String>,
) -> Result<Json<Vec<Asset>>> {
    let cell = parse_cell(&cell)?;
    Ok(Json(tracker.assets_in_cell(&cell)))
}

/// GET /assets/near?lat=..&lng=..
pub async fn assets_near(
    State(tracker): State<Tracker>,
    query: std::result::Result<Query<NearQuery>, QueryRejection>,
) -> Result<Json<Vec<Asset>>> {
    let query = near_query(query)?;
    let assets = tracker.assets_near(query.lat, query.lng)?;
    tracing::debug!(lat = query.lat, lng = query.lng, found = assets.len(), "near query");
    Ok(Json(assets))
}

// ---- incidents ----

/// POST /incidents
pub async fn create_incident(
    State(tracker): State<Tracker>,
    body: std::result::Result<Json<IncidentInput>, JsonRejection>,
) -> Result<Json<Incident>> {
    let input = json_body(body)?;
    let incident = tracker.create_incident(input)?;
    tracing::info!(incident_id = %incident.id, cell = %incident.cell_id, "incident created");
    Ok(Json(incident))
}

/// GET /incidents
pub async fn list_incidents(State(tracker): State<Tracker>) -> Json<Vec<Incident>> {
    Json(tracker.incidents())
}

/// GET /incidents/{id}
pub async fn get_incident(
    State(tracker): State<Tracker>,
    Path(id): Path<String>,
) -> Result<Json<Incident>> {
    let id = parse_id(RecordKind::Incident, &id)?;
    Ok(Json(tracker.incident(id)?))
}

/// PUT /incidents/{id}
pub async fn update_incident(
    State(tracker): State<Tracker>,
    Path(id): Path<String>,
    body: std::result::Result<Json<IncidentInput>, JsonRejection>,
) -> Result<Json<Incident>> {
    let input = json_body(body)?;
    let id = parse_id(RecordKind::Incident, &id)?;
    Ok(Json(tracker.update_incident(id, input)?))
}

/// DELETE /incidents/{id}
pub async fn delete_incident(
    State(tracker): State<Tracker>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_id(RecordKind::Incident, &id)?;
    tracker.delete_incident(id)?;
    tracing::info!(incident_id = %id, "incident deleted");
    Ok(Json(MessageResponse::new("Incident deleted")))
}

/// GET /incidents/by-h3/{h3_index}
pub async fn incidents_by_cell(
    State(tracker): State<Tracker>,
    Path(cell): Path<String>,
) -> Result<Json<Vec<Incident>>> {
    let cell = parse_cell(&cell)?;
    Ok(Json(tracker.incidents_in_cell(&cell)))
}

/// GET /incidents/near?lat=..&lng=..
pub async fn incidents_near(
    State(tracker): State<Tracker>,
    query: std::result::Result<Query<NearQuery>, QueryRejection>,
) -> Result<Json<Vec<Incident>>> {
    let query = near_query(query)?;
    Ok(Json(tracker.incidents_near(query.lat, query.lng)?))
}

// ---- analytics & audit ----

/// GET /analytics/region-summary
pub async fn region_summary(State(tracker): State<Tracker>) -> Json<RegionSummary> {
    Json(tracker.region_summary())
}

/// GET /audit/logs
pub async fn audit_logs(State(tracker): State<Tracker>) -> Json<Vec<AuditEvent>> {
    Json(tracker.audit_log())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(RecordKind::Asset, &id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_id(RecordKind::Asset, "not-a-uuid"),
            Err(ServerError::NotFound(RecordKind::Asset))
        ));
    }

    #[test]
    fn test_parse_cell() {
        assert!(parse_cell("8828308281fffff").is_ok());
        let err = parse_cell("abc!").unwrap_err();
        assert_eq!(err.error_type(), "invalid_cell");
    }
}
