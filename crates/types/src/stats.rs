use crate::cell::GeoCellId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Asset count per cell, ordered by cell id.
pub type RegionSummary = BTreeMap<GeoCellId, usize>;

/// Tracker statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerStats {
    pub users: usize,
    pub assets: usize,
    pub incidents: usize,
    /// Audit events currently retained by the sink
    pub audit_events: usize,
    /// Total number of create/update/delete operations performed
    pub operations_count: u64,
}
