//! Cellwatch Server
//!
//! HTTP/JSON service exposing the Cellwatch tracker: CRUD for users, assets
//! and incidents, grid-cell proximity lookups, per-cell analytics and the
//! audit trail.
//!
//! # Example
//!
//! ```ignore
//! use cellwatch::Tracker;
//! use cellwatch_server::run_server;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! run_server(listener, Tracker::new(), shutdown).await?;
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod protocol;
pub mod transport;

pub use error::ServerError;
pub use protocol::{ErrorResponse, HealthResponse, MessageResponse, NearQuery};

pub use transport::http::{build_router, run_server};
