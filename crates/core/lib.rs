//! Location-aware asset and incident tracking on a hexagonal grid.
//!
//! ## Features
//! - **Cell indexing**: latitude/longitude to an H3 cell at a fixed resolution
//! - **Neighborhoods**: k-ring expansion with O(1) membership tests
//! - **Record stores**: users, assets, and incidents keyed by id
//! - **Audit trail**: every mutation is appended to a pluggable sink
//!
//! Assets and incidents are stamped with the cell of their coordinates when
//! created and re-stamped when updated. "Near" queries index the query point,
//! expand it by the configured ring size, and return every record whose cell is
//! in that ring. All ring cells count as equally near.
//!
//! ```rust
//! use cellwatch::{AssetInput, Tracker};
//!
//! let tracker = Tracker::new();
//! let asset = tracker.create_asset(AssetInput {
//!     name: "generator".into(),
//!     asset_type: "power".into(),
//!     latitude: 37.7749,
//!     longitude: -122.4194,
//!     status: "active".into(),
//!     created_by: "ops".into(),
//! })?;
//!
//! let near = tracker.assets_near(37.7750, -122.4195)?;
//! assert_eq!(near, vec![asset.clone()]);
//! assert_eq!(tracker.assets_in_cell(&asset.cell_id).len(), 1);
//! # Ok::<(), cellwatch::CellwatchError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod db;
pub mod error;

pub use builder::TrackerBuilder;
pub use config::Config;
pub use db::Tracker;
pub use error::{CellwatchError, Result};

pub type Cellwatch = Tracker;

pub use compute::geocell::{GeoIndexer, index};
pub use compute::neighborhood::{Neighborhood, neighbors, neighbors_of};

pub use db::{
    AuditSink, FanoutAuditSink, Located, LoggingAuditSink, MemoryAuditLog, Record, RecordStore,
};

pub use cellwatch_types::audit::{AuditAction, AuditEvent};
pub use cellwatch_types::cell::GeoCellId;
pub use cellwatch_types::record::{
    Asset, AssetInput, Incident, IncidentInput, RecordKind, User, UserInput,
};
pub use cellwatch_types::stats::{RegionSummary, TrackerStats};

pub use compute::validation;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Cellwatch, CellwatchError, Result, Tracker, TrackerBuilder};

    pub use crate::{Config, GeoCellId, Neighborhood};

    pub use crate::{index, neighbors, neighbors_of};

    pub use crate::{Asset, AssetInput, Incident, IncidentInput, User, UserInput};

    pub use crate::{AuditEvent, AuditSink, MemoryAuditLog};
}
