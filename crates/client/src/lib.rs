//! Cellwatch Client
//!
//! Native Rust client for the Cellwatch HTTP API.
//!
//! # Example
//!
//! ```ignore
//! use cellwatch_client::CellwatchClient;
//!
//! let client = CellwatchClient::new("http://127.0.0.1:3000")?;
//! let asset = client.create_asset(&input).await?;
//! let nearby = client.assets_near(37.7749, -122.4194).await?;
//! ```

pub mod transport;

pub use transport::http::{CellwatchClient, ClientError, Result};
