//! Rectangular tessellation using geohash cells.

use super::{Neighborhood, Tessellation};
use crate::compute::validation::{validate_coordinate, validate_ring_limit};
use crate::error::{HexnearError, Result};
use ::geohash::{Coord, Direction};
use hexnear_types::Coordinate;
use rustc_hash::FxHashSet;

const DIRECTIONS: [Direction; 8] = [
    Direction::N,
    Direction::NE,
    Direction::E,
    Direction::SE,
    Direction::S,
    Direction::SW,
    Direction::W,
    Direction::NW,
];

/// Geohash grid at a fixed precision (1-12 characters).
///
/// Cells are rectangles, so ring 1 holds eight neighbours instead of six.
/// Neighbours that would cross a pole or the antimeridian are dropped.
///
/// # Examples
///
/// ```rust
/// use hexnear::compute::grid::{GeohashGrid, Tessellation};
/// use hexnear::Coordinate;
///
/// let grid = GeohashGrid::new(7)?;
/// let cell = grid.cell_of(Coordinate::new(40.7128, -74.0060))?;
/// assert_eq!(cell, "dr5regw");
/// assert_eq!(grid.ring(&cell, 1)?.len(), 9);
/// # Ok::<(), hexnear::HexnearError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeohashGrid {
    precision: u8,
}

impl GeohashGrid {
    pub const MIN_PRECISION: u8 = 1;
    pub const MAX_PRECISION: u8 = 12;

    pub fn new(precision: u8) -> Result<Self> {
        if !(Self::MIN_PRECISION..=Self::MAX_PRECISION).contains(&precision) {
            return Err(HexnearError::InvalidResolution {
                grid: "geohash",
                resolution: precision,
                min: Self::MIN_PRECISION,
                max: Self::MAX_PRECISION,
            });
        }
        Ok(Self { precision })
    }

    fn check_cell(&self, cell: &str) -> Result<()> {
        if cell.len() != usize::from(self.precision) {
            return Err(HexnearError::InvalidCell(format!(
                "{} has precision {}, grid is at {}",
                cell,
                cell.len(),
                self.precision
            )));
        }
        ::geohash::decode(cell)
            .map(|_| ())
            .map_err(|e| HexnearError::InvalidCell(format!("{}: {}", cell, e)))
    }
}

impl Tessellation for GeohashGrid {
    type Cell = String;

    fn name(&self) -> &'static str {
        "geohash"
    }

    fn resolution(&self) -> u8 {
        self.precision
    }

    fn cell_of(&self, coordinate: Coordinate) -> Result<String> {
        validate_coordinate(&coordinate)?;

        let coord = Coord {
            x: coordinate.lon(),
            y: coordinate.lat(),
        };
        ::geohash::encode(coord, usize::from(self.precision)).map_err(|e| {
            HexnearError::InvalidCoordinate {
                lat: coordinate.lat(),
                lon: coordinate.lon(),
                reason: e.to_string(),
            }
        })
    }

    fn ring(&self, cell: &String, k: u32) -> Result<Neighborhood<String>> {
        validate_ring_limit(k)?;
        self.check_cell(cell)?;

        let mut cells: Neighborhood<String> = Neighborhood::new();
        let mut seen = FxHashSet::default();
        cells.push(cell.clone());
        seen.insert(cell.clone());

        // Breadth-first: each pass adds the next square ring.
        let mut frontier = 0;
        for _ in 0..k {
            let end = cells.len();
            if frontier == end {
                break;
            }
            for idx in frontier..end {
                for direction in DIRECTIONS {
                    if let Ok(neighbor) = ::geohash::neighbor(&cells[idx], direction)
                        && seen.insert(neighbor.clone())
                    {
                        cells.push(neighbor);
                    }
                }
            }
            frontier = end;
        }

        Ok(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_range() {
        assert!(GeohashGrid::new(0).is_err());
        assert!(GeohashGrid::new(13).is_err());
        for precision in 1..=12 {
            assert_eq!(GeohashGrid::new(precision).unwrap().resolution(), precision);
        }
    }

    #[test]
    fn test_cell_length_matches_precision() {
        let grid = GeohashGrid::new(5).unwrap();
        let cell = grid.cell_of(Coordinate::new(51.5074, -0.1278)).unwrap();
        assert_eq!(cell.len(), 5);
    }

    #[test]
    fn test_square_rings() {
        let grid = GeohashGrid::new(6).unwrap();
        let cell = grid.cell_of(Coordinate::new(40.7128, -74.0060)).unwrap();

        assert_eq!(grid.ring(&cell, 0).unwrap().len(), 1);
        assert_eq!(grid.ring(&cell, 1).unwrap().len(), 9);
        assert_eq!(grid.ring(&cell, 2).unwrap().len(), 25);
    }

    #[test]
    fn test_coarse_ring_stops_growing() {
        // 32 cells cover the globe at precision 1
        let grid = GeohashGrid::new(1).unwrap();
        let cell = grid.cell_of(Coordinate::new(40.7128, -74.0060)).unwrap();

        let full = grid.ring(&cell, 50).unwrap();
        assert!(full.len() <= 32);
        assert_eq!(grid.ring(&cell, 100).unwrap(), full);
        assert!(matches!(
            grid.ring(&cell, u32::MAX),
            Err(HexnearError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_ring_rejects_malformed_cells() {
        let grid = GeohashGrid::new(7).unwrap();
        assert!(grid.ring(&"dr5".to_string(), 1).is_err());
        assert!(grid.ring(&"dr5regA".to_string(), 1).is_err());
    }
}
