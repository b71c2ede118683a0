//! Geographic coordinate wrapped around `geo` primitives.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in signed decimal degrees.
///
/// Construction never validates; range checks belong to the index, which
/// reports out-of-range input as an error instead of panicking.
///
/// # Examples
///
/// ```
/// use hexnear_types::coordinate::Coordinate;
///
/// let nyc = Coordinate::new(40.7128, -74.0060);
/// assert_eq!(nyc.lat(), 40.7128);
/// assert_eq!(nyc.lon(), -74.0060);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude (in that order).
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in degrees.
    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[inline]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Convert into a `geo::Point` (x = longitude, y = latitude).
    #[inline]
    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.lon, self.lat)
    }

    /// Haversine distance to another coordinate in meters.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexnear_types::coordinate::Coordinate;
    ///
    /// let city_hall = Coordinate::new(40.7128, -74.0060);
    /// let wtc = Coordinate::new(40.7127, -74.0134);
    /// let d = city_hall.haversine_distance(&wtc);
    /// assert!(d > 600.0 && d < 650.0);
    /// ```
    #[inline]
    pub fn haversine_distance(&self, other: &Coordinate) -> f64 {
        use geo::Distance;
        geo::Haversine.distance(self.to_point(), other.to_point())
    }

    /// Point on the straight line between `self` and `other` at fraction `t`.
    ///
    /// Interpolates in degree space, which is accurate enough at the
    /// sub-kilometre scale the index works at.
    pub fn lerp(&self, other: &Coordinate, t: f64) -> Coordinate {
        Coordinate::new(
            self.lat + (other.lat - self.lat) * t,
            self.lon + (other.lon - self.lon) * t,
        )
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(point: geo::Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        coordinate.to_point()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}
