//! Loading tracker configuration for the server binary.
//!
//! A config file is optional. Its format follows the extension: `.toml`
//! files are parsed as TOML, everything else as JSON. Command-line overrides
//! are applied on top and the result is validated once.

use anyhow::{Context, bail};
use cellwatch::Config;
use std::path::Path;

/// Values given on the command line that take precedence over the file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub resolution: Option<u8>,
    pub near_ring_size: Option<u32>,
}

/// Read a config file.
pub fn load_file(path: &Path) -> anyhow::Result<Config> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let config = if is_toml {
        Config::from_toml(&raw)
            .with_context(|| format!("invalid TOML config {}", path.display()))?
    } else {
        Config::from_json(&raw)
            .with_context(|| format!("invalid JSON config {}", path.display()))?
    };

    Ok(config)
}

/// Build the effective configuration from an optional file plus overrides.
pub fn resolve(path: Option<&Path>, overrides: Overrides) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => load_file(path)?,
        None => Config::default(),
    };

    if let Some(resolution) = overrides.resolution {
        config.resolution = resolution;
    }
    if let Some(ring_size) = overrides.near_ring_size {
        config.near_ring_size = ring_size;
    }

    if let Err(reason) = config.validate() {
        bail!("invalid configuration: {reason}");
    }

    tracing::debug!(?config, "configuration resolved");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_file() {
        let config = resolve(None, Overrides::default()).unwrap();
        assert_eq!(config.resolution, 8);
        assert_eq!(config.near_ring_size, 1);
    }

    #[test]
    fn test_json_file() {
        let file = write_temp(".json", r#"{"resolution": 9, "near_ring_size": 2}"#);
        let config = resolve(Some(file.path()), Overrides::default()).unwrap();
        assert_eq!(config.resolution, 9);
        assert_eq!(config.near_ring_size, 2);
    }

    #[test]
    fn test_toml_file() {
        let file = write_temp(".toml", "resolution = 7\naudit_capacity = 100\n");
        let config = resolve(Some(file.path()), Overrides::default()).unwrap();
        assert_eq!(config.resolution, 7);
        assert_eq!(config.audit_capacity, Some(100));
    }

    #[test]
    fn test_overrides_win() {
        let file = write_temp(".json", r#"{"resolution": 9}"#);
        let overrides = Overrides {
            resolution: Some(10),
            near_ring_size: Some(3),
        };
        let config = resolve(Some(file.path()), overrides).unwrap();
        assert_eq!(config.resolution, 10);
        assert_eq!(config.near_ring_size, 3);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let overrides = Overrides {
            resolution: Some(16),
            near_ring_size: None,
        };
        assert!(resolve(None, overrides).is_err());

        let file = write_temp(".json", r#"{"resolution": 8, "unknown": true}"#);
        assert!(resolve(Some(file.path()), Overrides::default()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = resolve(Some(Path::new("/nonexistent/cellwatch.json")), Overrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
