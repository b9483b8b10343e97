//! Tracker implementation for Cellwatch.
//!
//! This module defines the main `Tracker` type: per-type record stores, the
//! geospatial stamping of assets and incidents, proximity lookups, and audit
//! wiring.

use crate::compute::geocell::GeoIndexer;
use crate::compute::neighborhood::{Neighborhood, neighbors};
use crate::config::Config;
use crate::error::{CellwatchError, Result};
use cellwatch_types::audit::{AuditAction, AuditEvent};
use cellwatch_types::cell::GeoCellId;
use cellwatch_types::record::{
    Asset, AssetInput, Incident, IncidentInput, RecordKind, User, UserInput,
};
use cellwatch_types::stats::{RegionSummary, TrackerStats};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

mod audit;
mod store;

pub use audit::{AuditSink, FanoutAuditSink, LoggingAuditSink, MemoryAuditLog};
pub use store::{Located, Record, RecordStore};

/// In-memory asset and incident tracker.
///
/// Assets and incidents are stamped with the grid cell of their coordinates
/// when created and re-stamped on every update. Cheap to clone: clones share
/// the same stores and audit sink.
#[derive(Clone)]
pub struct Tracker {
    pub(crate) users: Arc<RecordStore<User>>,
    pub(crate) assets: Arc<RecordStore<Asset>>,
    pub(crate) incidents: Arc<RecordStore<Incident>>,
    pub(crate) audit: Arc<dyn AuditSink>,
    pub(crate) indexer: GeoIndexer,
    pub(crate) ops_count: Arc<AtomicU64>,
    pub(crate) config: Config,
}

impl Tracker {
    /// Create a tracker with default configuration and an in-memory audit log.
    pub fn new() -> Self {
        Self {
            users: Arc::new(RecordStore::new()),
            assets: Arc::new(RecordStore::new()),
            incidents: Arc::new(RecordStore::new()),
            audit: Arc::new(MemoryAuditLog::new()),
            indexer: GeoIndexer::default(),
            ops_count: Arc::new(AtomicU64::new(0)),
            config: Config::default(),
        }
    }

    pub fn builder() -> crate::builder::TrackerBuilder {
        crate::builder::TrackerBuilder::new()
    }

    /// Create a tracker with custom configuration and audit sink.
    pub fn with_config(config: Config, audit: Arc<dyn AuditSink>) -> Result<Self> {
        config.validate().map_err(CellwatchError::InvalidConfig)?;
        let indexer = GeoIndexer::new(u32::from(config.resolution))?;

        Ok(Self {
            users: Arc::new(RecordStore::new()),
            assets: Arc::new(RecordStore::new()),
            incidents: Arc::new(RecordStore::new()),
            audit,
            indexer,
            ops_count: Arc::new(AtomicU64::new(0)),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolution every record is stamped at.
    pub fn resolution(&self) -> u8 {
        self.indexer.resolution()
    }

    fn record_mutation(&self, action: AuditAction, id: Uuid) {
        self.audit.append(AuditEvent::new(action, id));
        self.ops_count.fetch_add(1, Ordering::Relaxed);
    }

    // ---- users ----

    pub fn create_user(&self, input: UserInput) -> User {
        let user = User::from_input(Uuid::new_v4(), input);
        self.users.insert(user.clone());
        log::debug!("created user {}", user.id);
        self.record_mutation(AuditAction::CreateUser, user.id);
        user
    }

    pub fn users(&self) -> Vec<User> {
        self.users.list()
    }

    pub fn user(&self, id: Uuid) -> Result<User> {
        self.users
            .get(&id)
            .ok_or_else(|| CellwatchError::not_found(RecordKind::User, id))
    }

    pub fn update_user(&self, id: Uuid, input: UserInput) -> Result<User> {
        let user = User::from_input(id, input);
        self.users
            .replace(&id, user.clone())
            .ok_or_else(|| CellwatchError::not_found(RecordKind::User, id))?;
        log::debug!("updated user {}", id);
        self.record_mutation(AuditAction::UpdateUser, id);
        Ok(user)
    }

    pub fn delete_user(&self, id: Uuid) -> Result<User> {
        let user = self
            .users
            .remove(&id)
            .ok_or_else(|| CellwatchError::not_found(RecordKind::User, id))?;
        log::debug!("deleted user {}", id);
        self.record_mutation(AuditAction::DeleteUser, id);
        Ok(user)
    }

    // ---- assets ----

    /// Create an asset, stamping it with the cell of its coordinates.
    ///
    /// # Errors
    ///
    /// `InvalidCoordinate` if the coordinates cannot be indexed. Nothing is
    /// stored in that case.
    pub fn create_asset(&self, input: AssetInput) -> Result<Asset> {
        let cell = self.indexer.index(input.latitude, input.longitude)?;
        let asset = Asset::from_input(Uuid::new_v4(), input, cell);
        self.assets.insert(asset.clone());
        log::debug!("created asset {} in cell {}", asset.id, cell);
        self.record_mutation(AuditAction::CreateAsset, asset.id);
        Ok(asset)
    }

    pub fn assets(&self) -> Vec<Asset> {
        self.assets.list()
    }

    pub fn asset(&self, id: Uuid) -> Result<Asset> {
        self.assets
            .get(&id)
            .ok_or_else(|| CellwatchError::not_found(RecordKind::Asset, id))
    }

    /// Replace an asset, recomputing its cell from the new coordinates.
    pub fn update_asset(&self, id: Uuid, input: AssetInput) -> Result<Asset> {
        if !self.assets.contains(&id) {
            return Err(CellwatchError::not_found(RecordKind::Asset, id));
        }
        let cell = self.indexer.index(input.latitude, input.longitude)?;
        let asset = Asset::from_input(id, input, cell);
        self.assets
            .replace(&id, asset.clone())
            .ok_or_else(|| CellwatchError::not_found(RecordKind::Asset, id))?;
        log::debug!("updated asset {} in cell {}", id, asset.cell_id);
        self.record_mutation(AuditAction::UpdateAsset, id);
        Ok(asset)
    }

    pub fn delete_asset(&self, id: Uuid) -> Result<Asset> {
        let asset = self
            .assets
            .remove(&id)
            .ok_or_else(|| CellwatchError::not_found(RecordKind::Asset, id))?;
        log::debug!("deleted asset {}", id);
        self.record_mutation(AuditAction::DeleteAsset, id);
        Ok(asset)
    }

    /// Assets stamped with exactly `cell`.
    pub fn assets_in_cell(&self, cell: &GeoCellId) -> Vec<Asset> {
        self.assets.in_cell(cell)
    }

    /// Assets in the neighborhood of `(latitude, longitude)`.
    ///
    /// Every cell of the neighborhood counts as equally near; results are in
    /// creation order, not sorted by distance.
    pub fn assets_near(&self, latitude: f64, longitude: f64) -> Result<Vec<Asset>> {
        let ring = self.neighborhood(latitude, longitude)?;
        Ok(self.assets.filter(|a| ring.contains(&a.cell_id)))
    }

    // ---- incidents ----

    pub fn create_incident(&self, input: IncidentInput) -> Result<Incident> {
        let cell = self.indexer.index(input.latitude, input.longitude)?;
        let incident = Incident::from_input(Uuid::new_v4(), input, cell);
        self.incidents.insert(incident.clone());
        log::debug!("created incident {} in cell {}", incident.id, cell);
        self.record_mutation(AuditAction::CreateIncident, incident.id);
        Ok(incident)
    }

    pub fn incidents(&self) -> Vec<Incident> {
        self.incidents.list()
    }

    pub fn incident(&self, id: Uuid) -> Result<Incident> {
        self.incidents
            .get(&id)
            .ok_or_else(|| CellwatchError::not_found(RecordKind::Incident, id))
    }

    pub fn update_incident(&self, id: Uuid, input: IncidentInput) -> Result<Incident> {
        if !self.incidents.contains(&id) {
            return Err(CellwatchError::not_found(RecordKind::Incident, id));
        }
        let cell = self.indexer.index(input.latitude, input.longitude)?;
        let incident = Incident::from_input(id, input, cell);
        self.incidents
            .replace(&id, incident.clone())
            .ok_or_else(|| CellwatchError::not_found(RecordKind::Incident, id))?;
        log::debug!("updated incident {} in cell {}", id, incident.cell_id);
        self.record_mutation(AuditAction::UpdateIncident, id);
        Ok(incident)
    }

    pub fn delete_incident(&self, id: Uuid) -> Result<Incident> {
        let incident = self
            .incidents
            .remove(&id)
            .ok_or_else(|| CellwatchError::not_found(RecordKind::Incident, id))?;
        log::debug!("deleted incident {}", id);
        self.record_mutation(AuditAction::DeleteIncident, id);
        Ok(incident)
    }

    pub fn incidents_in_cell(&self, cell: &GeoCellId) -> Vec<Incident> {
        self.incidents.in_cell(cell)
    }

    pub fn incidents_near(&self, latitude: f64, longitude: f64) -> Result<Vec<Incident>> {
        let ring = self.neighborhood(latitude, longitude)?;
        Ok(self.incidents.filter(|i| ring.contains(&i.cell_id)))
    }

    // ---- geospatial queries ----

    /// Cell of a coordinate at the tracker's resolution.
    pub fn cell_of(&self, latitude: f64, longitude: f64) -> Result<GeoCellId> {
        self.indexer.index(latitude, longitude)
    }

    /// Neighborhood used by "near" queries around `(latitude, longitude)`.
    pub fn neighborhood(&self, latitude: f64, longitude: f64) -> Result<Neighborhood> {
        let center = self.indexer.index(latitude, longitude)?;
        Ok(neighbors(&center, self.config.near_ring_size))
    }

    /// Number of assets per cell.
    pub fn region_summary(&self) -> RegionSummary {
        let mut summary = RegionSummary::new();
        self.assets.for_each_cell(|cell| {
            *summary.entry(cell).or_insert(0) += 1;
        });
        summary
    }

    // ---- audit & stats ----

    /// Audit events retained by the sink, oldest first.
    pub fn audit_log(&self) -> Vec<AuditEvent> {
        self.audit.snapshot()
    }

    pub fn stats(&self) -> TrackerStats {
        TrackerStats {
            users: self.users.len(),
            assets: self.assets.len(),
            incidents: self.incidents.len(),
            audit_events: self.audit.len(),
            operations_count: self.ops_count.load(Ordering::Relaxed),
        }
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}
