//! Index builder
//!
//! Collects POIs and settings, then builds the immutable index in one step.

use crate::compute::grid::{H3Grid, Tessellation};
use crate::config::Config;
use crate::error::Result;
use crate::index::PoiIndex;
use hexnear_types::Poi;

/// Builder for a [`PoiIndex`].
///
/// # Examples
///
/// ```rust
/// use hexnear::{Coordinate, IndexBuilder, Poi};
///
/// let index = IndexBuilder::new()
///     .resolution(9)
///     .poi(Poi::new(1, "World Trade Center", Coordinate::new(40.7127, -74.0134)))
///     .poi(Poi::new(2, "City Hall", Coordinate::new(40.7128, -74.0060)))
///     .build()?;
///
/// assert_eq!(index.len(), 2);
/// # Ok::<(), hexnear::HexnearError>(())
/// ```
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    resolution: u8,
    pois: Vec<Poi>,
}

impl IndexBuilder {
    /// Empty builder at the default resolution.
    pub fn new() -> Self {
        Self {
            resolution: Config::default().resolution,
            pois: Vec::new(),
        }
    }

    /// Builder seeded from a configuration's resolution and POI set.
    pub fn from_config(config: &Config) -> Self {
        Self {
            resolution: config.resolution,
            pois: config.pois.clone(),
        }
    }

    pub fn resolution(mut self, resolution: u8) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn poi(mut self, poi: Poi) -> Self {
        self.pois.push(poi);
        self
    }

    pub fn pois(mut self, pois: impl IntoIterator<Item = Poi>) -> Self {
        self.pois.extend(pois);
        self
    }

    /// Build an H3 index.
    pub fn build(self) -> Result<PoiIndex<H3Grid>> {
        PoiIndex::new(self.pois, self.resolution)
    }

    /// Build over a caller-supplied tessellation. The builder's resolution is
    /// ignored in favour of the grid's own.
    pub fn build_with<G: Tessellation>(self, grid: G) -> PoiIndex<G> {
        PoiIndex::build(grid, self.pois)
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}
