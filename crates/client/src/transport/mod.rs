//! Transport layer for Cellwatch client
//!
//! Available transports:
//! - `http` - HTTP/REST API with JSON bodies (reqwest)

pub mod http;
