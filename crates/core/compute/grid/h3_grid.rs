//! Hexagonal tessellation backed by the H3 grid (`h3o`).

use super::{Neighborhood, Tessellation};
use crate::compute::validation::{validate_coordinate, validate_ring_limit};
use crate::error::{HexnearError, Result};
use h3o::{CellIndex, LatLng, Resolution};
use hexnear_types::Coordinate;

/// H3 hexagonal grid at a fixed resolution.
///
/// Resolution 0 has 122 cells covering the globe; each step down the scale
/// divides a cell's area by roughly seven. Resolution 9 cells have an edge
/// of about 175 meters, a good fit for walkable "nearby" queries.
///
/// # Examples
///
/// ```rust
/// use hexnear::compute::grid::{H3Grid, Tessellation};
/// use hexnear::Coordinate;
///
/// let grid = H3Grid::new(9)?;
/// let cell = grid.cell_of(Coordinate::new(40.7128, -74.0060))?;
///
/// // center + 6 hexagonal neighbours
/// assert_eq!(grid.ring(&cell, 1)?.len(), 7);
/// # Ok::<(), hexnear::HexnearError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct H3Grid {
    resolution: Resolution,
}

impl H3Grid {
    pub const MIN_RESOLUTION: u8 = 0;
    pub const MAX_RESOLUTION: u8 = 15;

    /// Create a grid at `resolution` (0..=15).
    pub fn new(resolution: u8) -> Result<Self> {
        let resolution =
            Resolution::try_from(resolution).map_err(|_| HexnearError::InvalidResolution {
                grid: "h3",
                resolution,
                min: Self::MIN_RESOLUTION,
                max: Self::MAX_RESOLUTION,
            })?;
        Ok(Self { resolution })
    }

    /// Center of `cell` as a coordinate.
    pub fn center_of(&self, cell: CellIndex) -> Coordinate {
        let center = LatLng::from(cell);
        Coordinate::new(center.lat(), center.lng())
    }
}

impl Tessellation for H3Grid {
    type Cell = CellIndex;

    fn name(&self) -> &'static str {
        "h3"
    }

    fn resolution(&self) -> u8 {
        u8::from(self.resolution)
    }

    fn cell_of(&self, coordinate: Coordinate) -> Result<CellIndex> {
        validate_coordinate(&coordinate)?;

        let latlng = LatLng::new(coordinate.lat(), coordinate.lon()).map_err(|e| {
            HexnearError::InvalidCoordinate {
                lat: coordinate.lat(),
                lon: coordinate.lon(),
                reason: e.to_string(),
            }
        })?;

        Ok(latlng.to_cell(self.resolution))
    }

    fn ring(&self, cell: &CellIndex, k: u32) -> Result<Neighborhood<CellIndex>> {
        validate_ring_limit(k)?;

        if cell.resolution() != self.resolution {
            return Err(HexnearError::InvalidCell(format!(
                "{} is at resolution {}, grid is at {}",
                cell,
                u8::from(cell.resolution()),
                u8::from(self.resolution)
            )));
        }

        let mut cells: Neighborhood<CellIndex> = cell.grid_disk(k);

        // Keep the center first without disturbing the rest of the order.
        if let Some(pos) = cells.iter().position(|c| c == cell) {
            cells[..=pos].rotate_right(1);
        }

        Ok(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::validation::MAX_RING_COUNT;

    #[test]
    fn test_resolution_range() {
        assert!(H3Grid::new(0).is_ok());
        assert!(H3Grid::new(15).is_ok());

        let err = H3Grid::new(16).unwrap_err();
        assert!(matches!(
            err,
            HexnearError::InvalidResolution { resolution: 16, .. }
        ));
    }

    #[test]
    fn test_cell_is_at_grid_resolution() {
        for res in [0u8, 5, 9, 15] {
            let grid = H3Grid::new(res).unwrap();
            let cell = grid.cell_of(Coordinate::new(40.7128, -74.0060)).unwrap();
            assert_eq!(u8::from(cell.resolution()), res);
            assert_eq!(grid.resolution(), res);
        }
    }

    #[test]
    fn test_ring_sizes_grow_hexagonally() {
        let grid = H3Grid::new(9).unwrap();
        let cell = grid.cell_of(Coordinate::new(40.7128, -74.0060)).unwrap();

        assert_eq!(grid.ring(&cell, 0).unwrap().len(), 1);
        assert_eq!(grid.ring(&cell, 1).unwrap().len(), 7);
        assert_eq!(grid.ring(&cell, 2).unwrap().len(), 19);
    }

    #[test]
    fn test_ring_neighbours_are_adjacent() {
        let grid = H3Grid::new(9).unwrap();
        let cell = grid.cell_of(Coordinate::new(51.5074, -0.1278)).unwrap();
        let disk = grid.ring(&cell, 1).unwrap();

        assert_eq!(disk[0], cell);
        for neighbour in &disk[1..] {
            assert_eq!(cell.grid_distance(*neighbour).ok(), Some(1));
        }
    }

    #[test]
    fn test_ring_rejects_unbounded_k() {
        let grid = H3Grid::new(9).unwrap();
        let cell = grid.cell_of(Coordinate::new(40.7128, -74.0060)).unwrap();

        assert!(matches!(
            grid.ring(&cell, u32::MAX),
            Err(HexnearError::InvalidInput(_))
        ));
        assert_eq!(grid.ring(&cell, MAX_RING_COUNT).unwrap().len(), 30_301);
    }

    #[test]
    fn test_ring_rejects_foreign_resolution() {
        let coarse = H3Grid::new(5).unwrap();
        let fine = H3Grid::new(9).unwrap();
        let cell = coarse.cell_of(Coordinate::new(0.0, 0.0)).unwrap();
        assert!(matches!(
            fine.ring(&cell, 1),
            Err(HexnearError::InvalidCell(_))
        ));
    }

    #[test]
    fn test_center_maps_back_to_cell() {
        let grid = H3Grid::new(9).unwrap();
        let cell = grid.cell_of(Coordinate::new(-33.8688, 151.2093)).unwrap();
        let center = grid.center_of(cell);
        assert_eq!(grid.cell_of(center).unwrap(), cell);
    }

    #[test]
    fn test_poles_and_antimeridian() {
        let grid = H3Grid::new(7).unwrap();
        for coord in [
            Coordinate::new(90.0, 0.0),
            Coordinate::new(-90.0, 0.0),
            Coordinate::new(0.0, 180.0),
            Coordinate::new(0.0, -180.0),
        ] {
            let cell = grid.cell_of(coord).unwrap();
            assert!(!grid.ring(&cell, 1).unwrap().is_empty());
        }
    }
}
