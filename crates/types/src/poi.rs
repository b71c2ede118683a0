//! Points of interest.

use crate::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

/// Caller-assigned POI identity. Unique within an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoiId(pub u64);

impl PoiId {
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for PoiId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PoiId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, located point of interest.
///
/// Fields are read-only once the value exists.
///
/// # Examples
///
/// ```
/// use hexnear_types::{Coordinate, Poi};
///
/// let poi = Poi::new(2, "City Hall", Coordinate::new(40.7128, -74.0060));
/// assert_eq!(poi.id().get(), 2);
/// assert_eq!(poi.name(), "City Hall");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    id: PoiId,
    name: String,
    coordinate: Coordinate,
}

impl Poi {
    pub fn new(id: impl Into<PoiId>, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinate,
        }
    }

    #[inline]
    pub fn id(&self) -> PoiId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}
