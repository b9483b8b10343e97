//! Tracked records and the payloads used to create or replace them.
//!
//! Users carry no location. Assets and incidents carry a latitude/longitude
//! pair plus the cell it falls into, which the tracker computes; clients never
//! send a cell themselves.

use crate::cell::GeoCellId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The kinds of record the tracker stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    User,
    Asset,
    Incident,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "User"),
            Self::Asset => write!(f, "Asset"),
            Self::Incident => write!(f, "Incident"),
        }
    }
}

/// Payload for creating or replacing a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub role: String,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub region: String,
}

impl User {
    pub fn from_input(id: Uuid, input: UserInput) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            role: input.role,
            region: input.region,
        }
    }
}

/// Payload for creating or replacing an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetInput {
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: String,
    pub created_by: String,
}

/// A physical asset stamped with the cell of its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: String,
    pub created_by: String,
    /// Grid cell of the position, sent on the wire as `h3_index`.
    #[serde(rename = "h3_index")]
    pub cell_id: GeoCellId,
}

impl Asset {
    pub fn from_input(id: Uuid, input: AssetInput, cell_id: GeoCellId) -> Self {
        Self {
            id,
            name: input.name,
            asset_type: input.asset_type,
            latitude: input.latitude,
            longitude: input.longitude,
            status: input.status,
            created_by: input.created_by,
            cell_id,
        }
    }
}

/// Payload for creating or replacing an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentInput {
    pub asset_id: String,
    pub description: String,
    pub severity: String,
    pub latitude: f64,
    pub longitude: f64,
    pub reported_by: String,
}

/// A reported incident stamped with the cell where it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: Uuid,
    pub asset_id: String,
    pub description: String,
    pub severity: String,
    pub latitude: f64,
    pub longitude: f64,
    pub reported_by: String,
    #[serde(rename = "h3_index")]
    pub cell_id: GeoCellId,
}

impl Incident {
    pub fn from_input(id: Uuid, input: IncidentInput, cell_id: GeoCellId) -> Self {
        Self {
            id,
            asset_id: input.asset_id,
            description: input.description,
            severity: input.severity,
            latitude: input.latitude,
            longitude: input.longitude,
            reported_by: input.reported_by,
            cell_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_type_field_is_renamed() {
        let input: AssetInput = serde_json::from_value(serde_json::json!({
            "name": "pump-7",
            "type": "pump",
            "latitude": 37.7749,
            "longitude": -122.4194,
            "status": "active",
            "created_by": "ops"
        }))
        .unwrap();
        assert_eq!(input.asset_type, "pump");

        let cell = "8828308281fffff".parse().unwrap();
        let asset = Asset::from_input(Uuid::nil(), input, cell);
        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["type"], "pump");
        assert_eq!(json["h3_index"], "8828308281fffff");
        assert!(json.get("asset_type").is_none());
        assert!(json.get("cell_id").is_none());
    }

    #[test]
    fn test_incident_cell_serialized_as_h3_index() {
        let cell: GeoCellId = "8828308281fffff".parse().unwrap();
        let incident = Incident::from_input(
            Uuid::nil(),
            IncidentInput {
                asset_id: "pump-7".into(),
                description: "leak".into(),
                severity: "high".into(),
                latitude: 37.7749,
                longitude: -122.4194,
                reported_by: "ops".into(),
            },
            cell,
        );
        let json = serde_json::to_value(&incident).unwrap();
        assert_eq!(json["h3_index"], "8828308281fffff");

        let back: Incident = serde_json::from_value(json).unwrap();
        assert_eq!(back.cell_id, cell);
    }

    #[test]
    fn test_record_kind_display() {
        assert_eq!(RecordKind::User.to_string(), "User");
        assert_eq!(RecordKind::Asset.to_string(), "Asset");
        assert_eq!(RecordKind::Incident.to_string(), "Incident");
    }
}
