//! Validation for geographic coordinates and grid parameters.

use crate::error::{CellwatchError, Result};
use h3o::Resolution;

/// Largest ring size the tracker will expand around a query point.
pub const MAX_RING_SIZE: u32 = 32;

/// Validates a latitude/longitude pair.
///
/// Latitude: [-90.0, 90.0], Longitude: [-180.0, 180.0]
///
/// # Examples
///
/// ```
/// use cellwatch::compute::validation::validate_coordinate;
///
/// assert!(validate_coordinate(37.7749, -122.4194).is_ok());
/// assert!(validate_coordinate(91.0, 0.0).is_err());
/// assert!(validate_coordinate(0.0, f64::NAN).is_err());
/// ```
pub fn validate_coordinate(latitude: f64, longitude: f64) -> Result<()> {
    if !latitude.is_finite() {
        return Err(CellwatchError::InvalidCoordinate(format!(
            "Latitude must be finite, got: {}",
            latitude
        )));
    }

    if !longitude.is_finite() {
        return Err(CellwatchError::InvalidCoordinate(format!(
            "Longitude must be finite, got: {}",
            longitude
        )));
    }

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(CellwatchError::InvalidCoordinate(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            latitude
        )));
    }

    if !(-180.0..=180.0).contains(&longitude) {
        return Err(CellwatchError::InvalidCoordinate(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            longitude
        )));
    }

    Ok(())
}

/// Converts a raw resolution into the grid's resolution type.
///
/// # Examples
///
/// ```
/// use cellwatch::compute::validation::validate_resolution;
///
/// assert!(validate_resolution(8).is_ok());
/// assert!(validate_resolution(16).is_err());
/// ```
pub fn validate_resolution(resolution: u32) -> Result<Resolution> {
    u8::try_from(resolution)
        .ok()
        .and_then(|r| Resolution::try_from(r).ok())
        .ok_or(CellwatchError::InvalidResolution(resolution))
}

/// Validates a configured ring size.
pub fn validate_ring_size(ring_size: u32) -> Result<()> {
    if ring_size > MAX_RING_SIZE {
        return Err(CellwatchError::InvalidConfig(format!(
            "Ring size {} exceeds maximum of {}",
            ring_size, MAX_RING_SIZE
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        assert!(validate_coordinate(40.7128, -74.0060).is_ok());
        assert!(validate_coordinate(51.5074, -0.1278).is_ok());
        assert!(validate_coordinate(35.6895, 139.6917).is_ok());

        // Edge cases
        assert!(validate_coordinate(90.0, 0.0).is_ok());
        assert!(validate_coordinate(-90.0, 0.0).is_ok());
        assert!(validate_coordinate(0.0, 180.0).is_ok());
        assert!(validate_coordinate(0.0, -180.0).is_ok());
    }

    #[test]
    fn test_invalid_latitude() {
        assert!(matches!(
            validate_coordinate(91.0, 0.0),
            Err(CellwatchError::InvalidCoordinate(_))
        ));
        assert!(validate_coordinate(-90.1, 0.0).is_err());
    }

    #[test]
    fn test_invalid_longitude() {
        assert!(validate_coordinate(0.0, 180.1).is_err());
        assert!(validate_coordinate(0.0, -200.0).is_err());
    }

    #[test]
    fn test_non_finite_coordinates() {
        assert!(validate_coordinate(f64::NAN, 0.0).is_err());
        assert!(validate_coordinate(0.0, f64::NAN).is_err());
        assert!(validate_coordinate(f64::INFINITY, 0.0).is_err());
        assert!(validate_coordinate(0.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_resolution_range() {
        for r in 0..=15 {
            assert_eq!(u8::from(validate_resolution(r).unwrap()), r as u8);
        }
        assert!(matches!(
            validate_resolution(16),
            Err(CellwatchError::InvalidResolution(16))
        ));
        assert!(matches!(
            validate_resolution(999),
            Err(CellwatchError::InvalidResolution(999))
        ));
        assert!(validate_resolution(u32::MAX).is_err());
    }

    #[test]
    fn test_ring_size_limit() {
        assert!(validate_ring_size(0).is_ok());
        assert!(validate_ring_size(MAX_RING_SIZE).is_ok());
        assert!(validate_ring_size(MAX_RING_SIZE + 1).is_err());
    }
}
