//! # cellwatch-types
//!
//! Data types shared by the Cellwatch tracker, its HTTP server, and its client.
//!
//! - **Cells**: [`GeoCellId`](cell::GeoCellId), an opaque hexagonal grid cell id
//! - **Records**: `User`, `Asset`, `Incident` and their input payloads
//! - **Audit**: `AuditEvent`, `AuditAction`
//! - **Stats**: `TrackerStats`, `RegionSummary`
//!
//! All types are serializable with Serde. Cell ids always travel as plain
//! strings.
//!
//! ## Examples
//!
//! ```rust
//! use cellwatch_types::cell::GeoCellId;
//! use cellwatch_types::record::{Asset, AssetInput};
//! use uuid::Uuid;
//!
//! let cell: GeoCellId = "8828308281fffff".parse().unwrap();
//! let input = AssetInput {
//!     name: "generator".into(),
//!     asset_type: "power".into(),
//!     latitude: 37.7749,
//!     longitude: -122.4194,
//!     status: "active".into(),
//!     created_by: "ops".into(),
//! };
//! let asset = Asset::from_input(Uuid::new_v4(), input, cell);
//! assert_eq!(asset.cell_id, cell);
//! ```

pub mod audit;
pub mod cell;
pub mod record;
pub mod stats;
