//! Configuration for the Cellwatch tracker.
//!
//! The grid resolution and the ring size used by "near" queries are explicit
//! settings here rather than constants buried in the query code. Both default
//! to the values the service has always used (resolution 8, ring 1).
use serde::de::Error;

use crate::compute::geocell::DEFAULT_RESOLUTION;
use crate::compute::validation::{MAX_RING_SIZE, validate_resolution, validate_ring_size};

/// Tracker configuration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Grid resolution every record is indexed at
    #[serde(default = "Config::default_resolution")]
    pub resolution: u8,

    /// Ring size expanded around the query point for "near" lookups
    #[serde(default = "Config::default_near_ring_size")]
    pub near_ring_size: u32,

    /// Maximum number of audit events kept in memory (oldest dropped first)
    #[serde(default)]
    pub audit_capacity: Option<usize>,
}

impl Config {
    const fn default_resolution() -> u8 {
        DEFAULT_RESOLUTION
    }

    const fn default_near_ring_size() -> u32 {
        1
    }

    pub fn with_resolution(mut self, resolution: u8) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_near_ring_size(mut self, ring_size: u32) -> Self {
        self.near_ring_size = ring_size;
        self
    }

    pub fn with_audit_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Audit capacity must be greater than zero");

        if capacity > 1_000_000 {
            log::warn!(
                "Audit capacity of {} is very large and may consume significant memory.",
                capacity
            );
        }

        self.audit_capacity = Some(capacity);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_resolution(u32::from(self.resolution)).map_err(|e| e.to_string())?;

        validate_ring_size(self.near_ring_size).map_err(|_| {
            format!(
                "near_ring_size must be at most {}, got {}",
                MAX_RING_SIZE, self.near_ring_size
            )
        })?;

        if let Some(capacity) = self.audit_capacity
            && capacity == 0
        {
            return Err("Audit capacity must be greater than zero".to_string());
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: Self::default_resolution(),
            near_ring_size: Self::default_near_ring_size(),
            audit_capacity: None,
        }
    }
}
