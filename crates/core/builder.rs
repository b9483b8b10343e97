//! Tracker builder for flexible configuration
//!
//! This module provides a builder pattern for creating trackers with a custom
//! configuration and audit sink.

use crate::config::Config;
use crate::db::{AuditSink, MemoryAuditLog, Tracker};
use crate::error::Result;
use std::sync::Arc;

/// Builder for tracker configuration and audit wiring.
pub struct TrackerBuilder {
    config: Config,
    audit: Option<Arc<dyn AuditSink>>,
}

impl TrackerBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            audit: None,
        }
    }

    /// Set the tracker configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Grid resolution records are stamped at.
    pub fn resolution(mut self, resolution: u8) -> Self {
        self.config = self.config.with_resolution(resolution);
        self
    }

    /// Ring size used by "near" queries.
    pub fn near_ring_size(mut self, ring_size: u32) -> Self {
        self.config = self.config.with_near_ring_size(ring_size);
        self
    }

    /// Send audit events to `sink` instead of the default in-memory log.
    pub fn audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(sink);
        self
    }

    /// Build the tracker.
    ///
    /// Without an explicit sink, events go to a [`MemoryAuditLog`] bounded by
    /// `config.audit_capacity`.
    pub fn build(self) -> Result<Tracker> {
        let audit = match self.audit {
            Some(sink) => sink,
            None => match self.config.audit_capacity {
                Some(capacity) if capacity > 0 => Arc::new(MemoryAuditLog::with_capacity(capacity)),
                _ => Arc::new(MemoryAuditLog::new()),
            },
        };
        Tracker::with_config(self.config, audit)
    }
}

impl Default for TrackerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TrackerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerBuilder")
            .field("config", &self.config)
            .field("custom_audit_sink", &self.audit.is_some())
            .finish()
    }
}
