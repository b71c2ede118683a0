//! Proximity queries over a built [`PoiIndex`].
//!
//! A query maps the coordinate to its cell, expands to every cell within
//! `k` rings, and returns the union of those buckets deduplicated by POI id.
//! Cell boundaries are arbitrary with respect to physical distance, so the
//! default expansion is one ring: a POI fifty meters away in the adjoining
//! cell is still found.

use crate::compute::grid::{H3Grid, Neighborhood, Tessellation};
use crate::compute::validation::validate_ring_count;
use crate::error::{HexnearError, Result};
use crate::index::PoiIndex;
use hexnear_types::{Coordinate, Poi};
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Ring count used when the caller does not pick one.
pub const DEFAULT_RING_COUNT: u32 = 1;

/// Outcome of a proximity query, including the cells it visited.
#[derive(Debug, Clone)]
pub struct NearbyResult<'a, C> {
    /// Cell containing the query coordinate.
    pub center: C,
    /// Every visited cell, center first.
    pub cells: Neighborhood<C>,
    /// Matching POIs in neighborhood order, then bucket order.
    pub pois: Vec<&'a Poi>,
}

/// Query `index` with an explicit resolution and ring count.
///
/// `resolution` must equal the one the index was built at, otherwise cell
/// keys could never match and the query fails with `ResolutionMismatch`.
///
/// # Examples
///
/// ```rust
/// use hexnear::{Coordinate, PoiIndex, resolver, sample_pois};
///
/// let index = PoiIndex::new(sample_pois(), 9)?;
/// let nearby = resolver::query(&index, Coordinate::new(40.7128, -74.0060), 9, 1)?;
/// assert!(nearby.iter().any(|poi| poi.name() == "City Hall"));
///
/// assert!(resolver::query(&index, Coordinate::new(40.7128, -74.0060), 8, 1).is_err());
/// # Ok::<(), hexnear::HexnearError>(())
/// ```
pub fn query<G: Tessellation>(
    index: &PoiIndex<G>,
    coordinate: Coordinate,
    resolution: u8,
    ring_count: u32,
) -> Result<Vec<&Poi>> {
    if resolution != index.resolution() {
        return Err(HexnearError::ResolutionMismatch {
            index: index.resolution(),
            requested: resolution,
        });
    }
    Ok(lookup(index, coordinate, ring_count)?.pois)
}

/// Neighborhood lookup shared by every query entry point.
///
/// Invalid coordinates propagate before any bucket is read, so there are
/// never partial results.
pub fn lookup<G: Tessellation>(
    index: &PoiIndex<G>,
    coordinate: Coordinate,
    k: u32,
) -> Result<NearbyResult<'_, G::Cell>> {
    let center = index.cell_of(coordinate)?;
    let cells = index.grid().ring(&center, k)?;

    let mut seen = FxHashSet::default();
    let mut pois = Vec::new();
    for cell in &cells {
        for poi in index.bucket(cell) {
            if seen.insert(poi.id()) {
                pois.push(poi);
            }
        }
    }

    log::debug!(
        "Query at {} (cell {}, k={}): {} cells visited, {} POIs",
        coordinate,
        center,
        k,
        cells.len(),
        pois.len()
    );

    Ok(NearbyResult {
        center,
        cells,
        pois,
    })
}

impl<G: Tessellation> PoiIndex<G> {
    /// POIs within [`DEFAULT_RING_COUNT`] rings of `coordinate`.
    pub fn query(&self, coordinate: Coordinate) -> Result<Vec<&Poi>> {
        self.query_within_rings(coordinate, DEFAULT_RING_COUNT)
    }

    /// POIs within `k` rings of `coordinate`.
    ///
    /// `k = 0` restricts the lookup to the containing cell only and will miss
    /// POIs just across a cell boundary.
    pub fn query_within_rings(&self, coordinate: Coordinate, k: u32) -> Result<Vec<&Poi>> {
        Ok(lookup(self, coordinate, k)?.pois)
    }
}

/// Serves proximity queries from a shared, immutable index.
///
/// Cloning is cheap; every clone reads the same index.
///
/// # Examples
///
/// ```rust
/// use hexnear::{Coordinate, PoiIndex, ProximityResolver, sample_pois};
/// use std::sync::Arc;
///
/// let index = Arc::new(PoiIndex::new(sample_pois(), 9)?);
/// let resolver = ProximityResolver::new(index);
///
/// let nearby = resolver.nearby(Coordinate::new(40.7128, -74.0060))?;
/// assert!(nearby.iter().any(|poi| poi.name() == "City Hall"));
///
/// assert!(resolver.nearby(Coordinate::new(0.0, 0.0))?.is_empty());
/// # Ok::<(), hexnear::HexnearError>(())
/// ```
pub struct ProximityResolver<G: Tessellation = H3Grid> {
    index: Arc<PoiIndex<G>>,
    ring_count: u32,
}

impl<G: Tessellation> ProximityResolver<G> {
    pub fn new(index: Arc<PoiIndex<G>>) -> Self {
        Self {
            index,
            ring_count: DEFAULT_RING_COUNT,
        }
    }

    /// Change the default ring count. Must be at least 1.
    pub fn with_ring_count(mut self, ring_count: u32) -> Result<Self> {
        validate_ring_count(ring_count)?;
        self.ring_count = ring_count;
        Ok(self)
    }

    pub fn index(&self) -> &Arc<PoiIndex<G>> {
        &self.index
    }

    pub fn ring_count(&self) -> u32 {
        self.ring_count
    }

    /// POIs near `coordinate` using the configured ring count.
    pub fn nearby(&self, coordinate: Coordinate) -> Result<Vec<&Poi>> {
        self.index.query_within_rings(coordinate, self.ring_count)
    }

    /// POIs within `k` rings of `coordinate`.
    pub fn nearby_within(&self, coordinate: Coordinate, k: u32) -> Result<Vec<&Poi>> {
        self.index.query_within_rings(coordinate, k)
    }

    /// Full lookup with the configured ring count, keeping the visited cells.
    pub fn lookup(&self, coordinate: Coordinate) -> Result<NearbyResult<'_, G::Cell>> {
        lookup(&*self.index, coordinate, self.ring_count)
    }

    /// Full lookup with an explicit ring count.
    pub fn lookup_within(
        &self,
        coordinate: Coordinate,
        k: u32,
    ) -> Result<NearbyResult<'_, G::Cell>> {
        lookup(&*self.index, coordinate, k)
    }
}

impl<G: Tessellation> Clone for ProximityResolver<G> {
    fn clone(&self) -> Self {
        Self {
            index: Arc::clone(&self.index),
            ring_count: self.ring_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::grid::GeohashGrid;
    use crate::sample::sample_pois;
    use hexnear_types::PoiId;

    fn ids(pois: &[&Poi]) -> Vec<u64> {
        pois.iter().map(|p| p.id().get()).collect()
    }

    #[test]
    fn test_query_finds_city_hall() {
        let index = PoiIndex::new(sample_pois(), 9).unwrap();
        let nearby = index.query(Coordinate::new(40.7128, -74.0060)).unwrap();
        assert!(nearby.iter().any(|p| p.id() == PoiId(2)));
    }

    #[test]
    fn test_query_far_away_is_empty() {
        let index = PoiIndex::new(sample_pois(), 9).unwrap();
        assert!(index.query(Coordinate::new(0.0, 0.0)).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_coordinate_propagates() {
        let index = PoiIndex::new(sample_pois(), 9).unwrap();
        let err = index.query(Coordinate::new(200.0, 0.0)).unwrap_err();
        assert!(matches!(err, HexnearError::InvalidCoordinate { .. }));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_empty_index_returns_empty() {
        let index = PoiIndex::new(Vec::new(), 9).unwrap();
        for k in 0..3 {
            assert!(
                index
                    .query_within_rings(Coordinate::new(40.7128, -74.0060), k)
                    .unwrap()
                    .is_empty()
            );
        }
    }

    #[test]
    fn test_larger_rings_are_supersets() {
        // all three samples sit within a few rings of each other at res 9
        let index = PoiIndex::new(sample_pois(), 9).unwrap();
        let at = Coordinate::new(40.7128, -74.0060);

        let mut previous: Vec<u64> = Vec::new();
        for k in 0..12 {
            let current = ids(&index.query_within_rings(at, k).unwrap());
            assert!(previous.iter().all(|id| current.contains(id)));
            previous = current;
        }
        assert_eq!(previous.len(), 3);
    }

    #[test]
    fn test_no_duplicates() {
        let index = PoiIndex::new(sample_pois(), 6).unwrap();
        let result = index
            .query_within_rings(Coordinate::new(40.7128, -74.0060), 3)
            .unwrap();
        let mut unique = ids(&result);
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), result.len());
    }

    #[test]
    fn test_query_is_stable() {
        let index = PoiIndex::new(sample_pois(), 7).unwrap();
        let at = Coordinate::new(40.71, -74.0);
        let first = ids(&index.query_within_rings(at, 2).unwrap());
        for _ in 0..10 {
            assert_eq!(ids(&index.query_within_rings(at, 2).unwrap()), first);
        }
    }

    #[test]
    fn test_resolution_mismatch() {
        let index = PoiIndex::new(sample_pois(), 9).unwrap();
        let err = query(&index, Coordinate::new(40.7128, -74.0060), 7, 1).unwrap_err();
        assert_eq!(
            err,
            HexnearError::ResolutionMismatch {
                index: 9,
                requested: 7
            }
        );
    }

    #[test]
    fn test_lookup_reports_cells() {
        let index = PoiIndex::new(sample_pois(), 9).unwrap();
        let result = lookup(&index, Coordinate::new(40.7128, -74.0060), 1).unwrap();
        assert_eq!(result.cells[0], result.center);
        assert_eq!(result.cells.len(), 7);
        assert_eq!(index.cell_of_poi(PoiId(2)), Some(&result.center));
    }

    #[test]
    fn test_resolver_ring_count() {
        let index = Arc::new(PoiIndex::new(sample_pois(), 9).unwrap());
        let resolver = ProximityResolver::new(index);
        assert_eq!(resolver.ring_count(), DEFAULT_RING_COUNT);

        assert!(resolver.clone().with_ring_count(0).is_err());
        let wide = resolver.with_ring_count(4).unwrap();
        assert_eq!(wide.ring_count(), 4);
        assert_eq!(wide.lookup(Coordinate::new(40.7128, -74.0060)).unwrap().cells.len(), 61);
    }

    #[test]
    fn test_ring_expansion_is_bounded() {
        use crate::compute::validation::MAX_RING_COUNT;

        let index = Arc::new(PoiIndex::new(sample_pois(), 9).unwrap());
        let at = Coordinate::new(40.7128, -74.0060);

        let err = index.query_within_rings(at, u32::MAX).unwrap_err();
        assert!(matches!(err, HexnearError::InvalidInput(_)));
        assert!(index.neighborhood(at, MAX_RING_COUNT + 1).is_err());
        assert_eq!(index.query_within_rings(at, MAX_RING_COUNT).unwrap().len(), 3);

        let resolver = ProximityResolver::new(index);
        assert!(resolver.clone().with_ring_count(MAX_RING_COUNT + 1).is_err());
        assert!(resolver.nearby_within(at, u32::MAX).is_err());
    }

    #[test]
    fn test_resolver_over_geohash() {
        let index = Arc::new(PoiIndex::build(GeohashGrid::new(6).unwrap(), sample_pois()));
        let resolver = ProximityResolver::new(index);
        let nearby = resolver.nearby(Coordinate::new(40.7128, -74.0060)).unwrap();
        assert!(nearby.iter().any(|p| p.id() == PoiId(2)));
    }

    #[test]
    fn test_concurrent_readers() {
        let index = Arc::new(PoiIndex::new(sample_pois(), 9).unwrap());
        let resolver = ProximityResolver::new(index);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let resolver = resolver.clone();
                scope.spawn(move || {
                    for _ in 0..100 {
                        let nearby = resolver.nearby(Coordinate::new(40.7128, -74.0060)).unwrap();
                        assert!(nearby.iter().any(|p| p.name() == "City Hall"));
                    }
                });
            }
        });
    }
}
