//! Validation for geographic coordinates.

use crate::error::{HexnearError, Result};
use hexnear_types::Coordinate;

fn invalid(coordinate: &Coordinate, reason: String) -> HexnearError {
    HexnearError::InvalidCoordinate {
        lat: coordinate.lat(),
        lon: coordinate.lon(),
        reason,
    }
}

/// Validates a coordinate has a finite, in-range latitude and longitude.
///
/// Latitude: [-90.0, 90.0], Longitude: [-180.0, 180.0]
///
/// # Examples
///
/// ```
/// use hexnear::compute::validation::validate_coordinate;
/// use hexnear::Coordinate;
///
/// // Valid coordinate
/// let nyc = Coordinate::new(40.7128, -74.0060);
/// assert!(validate_coordinate(&nyc).is_ok());
///
/// // Invalid latitude
/// let invalid = Coordinate::new(200.0, 0.0);
/// assert!(validate_coordinate(&invalid).is_err());
/// ```
pub fn validate_coordinate(coordinate: &Coordinate) -> Result<()> {
    let (lat, lon) = (coordinate.lat(), coordinate.lon());

    if !lat.is_finite() {
        return Err(invalid(
            coordinate,
            format!("Latitude must be finite, got: {}", lat),
        ));
    }

    if !lon.is_finite() {
        return Err(invalid(
            coordinate,
            format!("Longitude must be finite, got: {}", lon),
        ));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(invalid(
            coordinate,
            format!("Latitude out of range [-90.0, 90.0]: {}", lat),
        ));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(invalid(
            coordinate,
            format!("Longitude out of range [-180.0, 180.0]: {}", lon),
        ));
    }

    Ok(())
}

/// Largest ring count any query may expand to.
///
/// A k-ring holds 3k² + 3k + 1 hexagons, so 100 rings is 30,301 cells.
pub const MAX_RING_COUNT: u32 = 100;

/// Validates an explicit ring expansion. Zero (exact cell only) is allowed.
pub fn validate_ring_limit(k: u32) -> Result<()> {
    if k > MAX_RING_COUNT {
        return Err(HexnearError::InvalidInput(format!(
            "Ring count must be at most {}, got {}",
            MAX_RING_COUNT, k
        )));
    }
    Ok(())
}

/// Validates a ring count used as a query default.
///
/// Zero would restrict queries to the exact containing cell, which misses
/// POIs just across a cell boundary.
pub fn validate_ring_count(ring_count: u32) -> Result<()> {
    if ring_count == 0 {
        return Err(HexnearError::InvalidInput(
            "Ring count must be at least 1".to_string(),
        ));
    }
    validate_ring_limit(ring_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        assert!(validate_coordinate(&Coordinate::new(0.0, 0.0)).is_ok());
        assert!(validate_coordinate(&Coordinate::new(90.0, 180.0)).is_ok());
        assert!(validate_coordinate(&Coordinate::new(-90.0, -180.0)).is_ok());
        assert!(validate_coordinate(&Coordinate::new(40.7128, -74.0060)).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        let err = validate_coordinate(&Coordinate::new(200.0, 0.0)).unwrap_err();
        assert!(matches!(err, HexnearError::InvalidCoordinate { lat, .. } if lat == 200.0));

        assert!(validate_coordinate(&Coordinate::new(0.0, 180.5)).is_err());
        assert!(validate_coordinate(&Coordinate::new(-90.1, 0.0)).is_err());
    }

    #[test]
    fn test_non_finite() {
        assert!(validate_coordinate(&Coordinate::new(f64::NAN, 0.0)).is_err());
        assert!(validate_coordinate(&Coordinate::new(0.0, f64::INFINITY)).is_err());
    }

    #[test]
    fn test_ring_count() {
        assert!(validate_ring_count(0).is_err());
        assert!(validate_ring_count(1).is_ok());
        assert!(validate_ring_count(3).is_ok());
        assert!(validate_ring_count(MAX_RING_COUNT).is_ok());
    }

    #[test]
    fn test_ring_count_upper_bound() {
        let err = validate_ring_count(u32::MAX).unwrap_err();
        assert!(matches!(err, HexnearError::InvalidInput(_)));
        assert!(err.is_client_error());

        assert!(validate_ring_limit(0).is_ok());
        assert!(validate_ring_limit(MAX_RING_COUNT + 1).is_err());
    }
}
