//! Transport layer for Cellwatch server
//!
//! Available transports:
//! - `http` - HTTP/REST API with JSON bodies (axum)

pub mod http;
