//! Coordinate to cell indexing.
//!
//! Maps a latitude/longitude pair onto the H3 hexagonal grid at a given
//! resolution. Indexing is pure: the same inputs always produce the same
//! [`GeoCellId`], with no shared state, so it can be called from any thread.

use crate::compute::validation::{validate_coordinate, validate_resolution};
use crate::error::{CellwatchError, Result};
use cellwatch_types::cell::GeoCellId;
use h3o::{LatLng, Resolution};

/// Resolution used for every record unless configured otherwise (~0.7 km² cells).
pub const DEFAULT_RESOLUTION: u8 = 8;

/// Index a coordinate at the given resolution.
///
/// # Errors
///
/// - [`CellwatchError::InvalidCoordinate`] if latitude is outside `[-90, 90]`,
///   longitude is outside `[-180, 180]`, or either is not finite.
/// - [`CellwatchError::InvalidResolution`] if `resolution` is above 15.
///
/// # Examples
///
/// ```
/// use cellwatch::compute::geocell::index;
///
/// let a = index(37.7749, -122.4194, 8)?;
/// let b = index(37.7750, -122.4195, 8)?;
/// assert_eq!(a, b);
/// assert_eq!(a.resolution(), 8);
///
/// assert!(index(91.0, 0.0, 8).is_err());
/// assert!(index(0.0, 0.0, 999).is_err());
/// # Ok::<(), cellwatch::CellwatchError>(())
/// ```
pub fn index(latitude: f64, longitude: f64, resolution: u32) -> Result<GeoCellId> {
    let resolution = validate_resolution(resolution)?;
    index_at(latitude, longitude, resolution)
}

fn index_at(latitude: f64, longitude: f64, resolution: Resolution) -> Result<GeoCellId> {
    validate_coordinate(latitude, longitude)?;

    let latlng = LatLng::new(latitude, longitude)
        .map_err(|e| CellwatchError::InvalidCoordinate(e.to_string()))?;

    Ok(GeoCellId::from(latlng.to_cell(resolution)))
}

/// Center of a cell as `(latitude, longitude)` in degrees.
pub fn cell_center(cell: &GeoCellId) -> (f64, f64) {
    let center = LatLng::from(cell.inner());
    (center.lat(), center.lng())
}

/// Indexer bound to one validated resolution.
///
/// Record stores hold one of these so every record is stamped at the same
/// resolution without re-validating it on each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoIndexer {
    resolution: Resolution,
}

impl GeoIndexer {
    pub fn new(resolution: u32) -> Result<Self> {
        Ok(Self {
            resolution: validate_resolution(resolution)?,
        })
    }

    #[inline]
    pub fn resolution(&self) -> u8 {
        u8::from(self.resolution)
    }

    /// Index a coordinate at this indexer's resolution.
    pub fn index(&self, latitude: f64, longitude: f64) -> Result<GeoCellId> {
        index_at(latitude, longitude, self.resolution)
    }
}

impl Default for GeoIndexer {
    fn default() -> Self {
        Self {
            resolution: Resolution::Eight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Distance, Haversine, Point};

    const SF: (f64, f64) = (37.7749, -122.4194);
    const SF_NEARBY: (f64, f64) = (37.7750, -122.4195);
    const LONDON: (f64, f64) = (51.5074, -0.1278);

    #[test]
    fn test_index_is_deterministic() {
        let a = index(SF.0, SF.1, 8).unwrap();
        let b = index(SF.0, SF.1, 8).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_nearby_points_share_cell() {
        let d = Haversine.distance(Point::new(SF.1, SF.0), Point::new(SF_NEARBY.1, SF_NEARBY.0));
        assert!(d < 20.0, "fixture points should be a few meters apart, got {d}");

        assert_eq!(
            index(SF.0, SF.1, 8).unwrap(),
            index(SF_NEARBY.0, SF_NEARBY.1, 8).unwrap()
        );
    }

    #[test]
    fn test_distant_points_differ() {
        assert_ne!(
            index(SF.0, SF.1, 8).unwrap(),
            index(LONDON.0, LONDON.1, 8).unwrap()
        );
    }

    #[test]
    fn test_identifier_shape() {
        let cell = index(SF.0, SF.1, 8).unwrap();
        let s = cell.to_string();
        assert_eq!(s.len(), 15);
        assert!(s.starts_with("88"), "res 8 cells start with 88, got {s}");
        assert!(s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_resolution_is_carried() {
        for r in [0_u32, 5, 8, 15] {
            assert_eq!(index(SF.0, SF.1, r).unwrap().resolution() as u32, r);
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            index(91.0, 0.0, 8),
            Err(CellwatchError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            index(0.0, -180.5, 8),
            Err(CellwatchError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            index(f64::NAN, 0.0, 8),
            Err(CellwatchError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            index(0.0, 0.0, 999),
            Err(CellwatchError::InvalidResolution(999))
        ));
    }

    #[test]
    fn test_extreme_valid_coordinates() {
        for (lat, lon) in [(90.0, 0.0), (-90.0, 0.0), (0.0, 180.0), (0.0, -180.0)] {
            assert!(index(lat, lon, 8).is_ok(), "({lat}, {lon}) should index");
        }
    }

    #[test]
    fn test_center_indexes_back_to_cell() {
        let cell = index(SF.0, SF.1, 8).unwrap();
        let (lat, lon) = cell_center(&cell);
        assert_eq!(index(lat, lon, 8).unwrap(), cell);
    }

    #[test]
    fn test_indexer_matches_free_function() {
        let indexer = GeoIndexer::default();
        assert_eq!(indexer.resolution(), DEFAULT_RESOLUTION);
        assert_eq!(
            indexer.index(SF.0, SF.1).unwrap(),
            index(SF.0, SF.1, 8).unwrap()
        );

        assert!(GeoIndexer::new(16).is_err());
        assert_eq!(GeoIndexer::new(10).unwrap().resolution(), 10);
    }
}
