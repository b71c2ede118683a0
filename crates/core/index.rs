//! Cell-keyed POI index.
//!
//! The index is built once from a static POI set and never mutated
//! afterwards. Every POI lives in exactly one bucket: the cell containing
//! its coordinate at the grid's resolution.

use crate::compute::grid::{H3Grid, Neighborhood, Tessellation};
use crate::error::Result;
use hexnear_types::{Coordinate, Poi, PoiId};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;

/// Why a POI was left out of the index.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The coordinate could not be mapped to a cell.
    InvalidCoordinate(String),
    /// Another POI with the same id was indexed first.
    DuplicateId,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate(reason) => write!(f, "{}", reason),
            Self::DuplicateId => write!(f, "duplicate id"),
        }
    }
}

/// A POI rejected during construction. Non-fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPoi {
    pub poi: Poi,
    pub reason: SkipReason,
}

/// Summary of an index, as served by the stats endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    pub grid: &'static str,
    pub resolution: u8,
    pub cell_count: usize,
    pub poi_count: usize,
    pub skipped_count: usize,
    pub largest_bucket: usize,
    pub avg_bucket_size: f64,
}

/// POIs bucketed by the cell that contains them.
///
/// # Architecture
///
/// ```text
/// PoiIndex
/// ├─ buckets: FxHashMap<Cell, Vec<Poi>>
/// │  ├─ cell A -> [World Trade Center]
/// │  └─ cell B -> [City Hall, Brooklyn Bridge]
/// ├─ cells: [cell A, cell B]   (first-seen order)
/// ├─ locations: PoiId -> Cell
/// └─ skipped: [SkippedPoi]
/// ```
///
/// # Thread Safety
///
/// There is no interior mutability, so a built index is `Send + Sync` and
/// can be shared behind an `Arc` by any number of concurrent readers.
///
/// # Examples
///
/// ```rust
/// use hexnear::{Coordinate, Poi, PoiIndex};
///
/// let index = PoiIndex::new(
///     vec![Poi::new(2, "City Hall", Coordinate::new(40.7128, -74.0060))],
///     9,
/// )?;
///
/// let nearby = index.query(Coordinate::new(40.7129, -74.0061))?;
/// assert_eq!(nearby.len(), 1);
/// assert_eq!(nearby[0].name(), "City Hall");
/// # Ok::<(), hexnear::HexnearError>(())
/// ```
pub struct PoiIndex<G: Tessellation = H3Grid> {
    grid: G,
    buckets: FxHashMap<G::Cell, Vec<Poi>>,
    cells: Vec<G::Cell>,
    locations: FxHashMap<PoiId, G::Cell>,
    skipped: Vec<SkippedPoi>,
}

impl PoiIndex<H3Grid> {
    /// Build an H3 index at `resolution`.
    ///
    /// Fails only when the resolution is outside 0..=15. POIs with bad
    /// coordinates are skipped, see [`PoiIndex::skipped`].
    pub fn new(pois: impl IntoIterator<Item = Poi>, resolution: u8) -> Result<Self> {
        Ok(Self::build(H3Grid::new(resolution)?, pois))
    }
}

impl<G: Tessellation> PoiIndex<G> {
    /// Build an index over `grid`.
    ///
    /// Same POI sequence and grid always yield the same buckets in the same
    /// order.
    pub fn build(grid: G, pois: impl IntoIterator<Item = Poi>) -> Self {
        let mut index = Self {
            grid,
            buckets: FxHashMap::default(),
            cells: Vec::new(),
            locations: FxHashMap::default(),
            skipped: Vec::new(),
        };

        for poi in pois {
            index.insert(poi);
        }

        log::debug!(
            "Built {} index at resolution {}: {} POIs in {} cells, {} skipped",
            index.grid.name(),
            index.grid.resolution(),
            index.locations.len(),
            index.cells.len(),
            index.skipped.len()
        );

        index
    }

    fn insert(&mut self, poi: Poi) {
        if self.locations.contains_key(&poi.id()) {
            log::warn!(
                "Skipping POI {} ({}): id already indexed",
                poi.id(),
                poi.name()
            );
            self.skipped.push(SkippedPoi {
                poi,
                reason: SkipReason::DuplicateId,
            });
            return;
        }

        let cell = match self.grid.cell_of(poi.coordinate()) {
            Ok(cell) => cell,
            Err(e) => {
                log::warn!("Skipping POI {} ({}): {}", poi.id(), poi.name(), e);
                self.skipped.push(SkippedPoi {
                    poi,
                    reason: SkipReason::InvalidCoordinate(e.to_string()),
                });
                return;
            }
        };

        log::debug!("POI {} ({}) is in cell {}", poi.id(), poi.name(), cell);

        self.locations.insert(poi.id(), cell.clone());
        let bucket = self.buckets.entry(cell.clone()).or_default();
        if bucket.is_empty() {
            self.cells.push(cell);
        }
        bucket.push(poi);
    }

    /// The tessellation this index was built over.
    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn resolution(&self) -> u8 {
        self.grid.resolution()
    }

    /// Number of indexed POIs.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Number of non-empty cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Non-empty cells in the order they were first populated.
    pub fn cells(&self) -> impl Iterator<Item = &G::Cell> {
        self.cells.iter()
    }

    /// POIs stored under `cell`, in insertion order. Empty for unknown cells.
    pub fn bucket(&self, cell: &G::Cell) -> &[Poi] {
        self.buckets.get(cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Buckets in first-populated order.
    pub fn buckets(&self) -> impl Iterator<Item = (&G::Cell, &[Poi])> {
        self.cells.iter().map(|cell| (cell, self.bucket(cell)))
    }

    /// All indexed POIs, bucket by bucket.
    pub fn pois(&self) -> impl Iterator<Item = &Poi> {
        self.buckets().flat_map(|(_, bucket)| bucket.iter())
    }

    /// Cell a POI was filed under.
    pub fn cell_of_poi(&self, id: PoiId) -> Option<&G::Cell> {
        self.locations.get(&id)
    }

    pub fn get(&self, id: PoiId) -> Option<&Poi> {
        let cell = self.locations.get(&id)?;
        self.bucket(cell).iter().find(|poi| poi.id() == id)
    }

    /// POIs rejected during construction.
    pub fn skipped(&self) -> &[SkippedPoi] {
        &self.skipped
    }

    /// Cell containing `coordinate` at this index's resolution.
    pub fn cell_of(&self, coordinate: Coordinate) -> Result<G::Cell> {
        self.grid.cell_of(coordinate)
    }

    /// Cells a `k`-ring query around `coordinate` visits, center first.
    pub fn neighborhood(&self, coordinate: Coordinate, k: u32) -> Result<Neighborhood<G::Cell>> {
        let center = self.grid.cell_of(coordinate)?;
        self.grid.ring(&center, k)
    }

    pub fn stats(&self) -> IndexStats {
        let largest_bucket = self.buckets.values().map(Vec::len).max().unwrap_or(0);
        let avg_bucket_size = if self.cells.is_empty() {
            0.0
        } else {
            self.len() as f64 / self.cells.len() as f64
        };

        IndexStats {
            grid: self.grid.name(),
            resolution: self.grid.resolution(),
            cell_count: self.cells.len(),
            poi_count: self.len(),
            skipped_count: self.skipped.len(),
            largest_bucket,
            avg_bucket_size,
        }
    }
}

impl<G: Tessellation> fmt::Debug for PoiIndex<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoiIndex")
            .field("grid", &self.grid.name())
            .field("resolution", &self.grid.resolution())
            .field("pois", &self.len())
            .field("cells", &self.cells.len())
            .field("skipped", &self.skipped.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::grid::GeohashGrid;
    use crate::sample::sample_pois;

    #[test]
    fn test_every_poi_in_its_own_cell() {
        let index = PoiIndex::new(sample_pois(), 9).unwrap();
        assert_eq!(index.len(), 3);

        for poi in sample_pois() {
            let cell = index.cell_of(poi.coordinate()).unwrap();
            assert_eq!(index.cell_of_poi(poi.id()), Some(&cell));
            assert!(index.bucket(&cell).iter().any(|p| p.id() == poi.id()));
        }

        // exactly one bucket per POI membership
        let total: usize = index.buckets().map(|(_, b)| b.len()).sum();
        assert_eq!(total, index.len());
    }

    #[test]
    fn test_out_of_range_poi_is_skipped() {
        let pois = vec![
            Poi::new(1, "Good", Coordinate::new(40.7128, -74.0060)),
            Poi::new(2, "Bad", Coordinate::new(200.0, 0.0)),
            Poi::new(3, "Also good", Coordinate::new(51.5074, -0.1278)),
        ];
        let index = PoiIndex::new(pois, 9).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.skipped().len(), 1);
        assert_eq!(index.skipped()[0].poi.id(), PoiId(2));
        assert!(matches!(
            index.skipped()[0].reason,
            SkipReason::InvalidCoordinate(_)
        ));
        assert!(index.get(PoiId(3)).is_some());
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let pois = vec![
            Poi::new(1, "First", Coordinate::new(40.7128, -74.0060)),
            Poi::new(1, "Second", Coordinate::new(40.7061, -73.9969)),
        ];
        let index = PoiIndex::new(pois, 9).unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index.get(PoiId(1)).unwrap().name(), "First");
        assert_eq!(index.skipped()[0].reason, SkipReason::DuplicateId);
    }

    #[test]
    fn test_invalid_resolution() {
        assert!(PoiIndex::new(sample_pois(), 16).is_err());
    }

    #[test]
    fn test_shared_cell_keeps_insertion_order() {
        let pois = vec![
            Poi::new(10, "a", Coordinate::new(40.71280, -74.00600)),
            Poi::new(11, "b", Coordinate::new(40.71281, -74.00601)),
            Poi::new(12, "c", Coordinate::new(40.71282, -74.00602)),
        ];
        let index = PoiIndex::new(pois, 7).unwrap();
        assert_eq!(index.cell_count(), 1);

        let (_, bucket) = index.buckets().next().unwrap();
        let ids: Vec<u64> = bucket.iter().map(|p| p.id().get()).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn test_stats() {
        let index = PoiIndex::new(sample_pois(), 5).unwrap();
        let stats = index.stats();
        assert_eq!(stats.grid, "h3");
        assert_eq!(stats.resolution, 5);
        assert_eq!(stats.poi_count, 3);
        assert_eq!(stats.skipped_count, 0);
        assert!(stats.largest_bucket >= 1);
        assert!(stats.avg_bucket_size >= 1.0);
    }

    #[test]
    fn test_empty_index() {
        let index = PoiIndex::new(Vec::new(), 9).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.stats().avg_bucket_size, 0.0);
        assert!(index.get(PoiId(1)).is_none());
    }

    #[test]
    fn test_geohash_backend() {
        let index = PoiIndex::build(GeohashGrid::new(7).unwrap(), sample_pois());
        assert_eq!(index.len(), 3);
        assert_eq!(index.stats().grid, "geohash");
        let cell = index.cell_of_poi(PoiId(2)).unwrap();
        assert_eq!(cell.len(), 7);
    }
}
