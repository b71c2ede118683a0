//! # Pluggable Tessellations
//!
//! A tessellation partitions the sphere into cells at one fixed resolution
//! and knows which cells border each other. The index and the proximity
//! resolver only talk to the [`Tessellation`] trait, so the concrete grid can
//! be swapped without touching either of them.
//!
//! ## Backends
//!
//! | Backend          | Cell shape | Resolutions | Neighbours per ring 1 |
//! |------------------|------------|-------------|-----------------------|
//! | [`H3Grid`]       | hexagon    | 0..=15      | 6 (5 at pentagons)    |
//! | [`GeohashGrid`]  | rectangle  | 1..=12      | 8                     |
//!
//! `H3Grid` is the default everywhere. The geohash backend exists for
//! deployments that already key data by geohash.
//!
//! ## Contract
//!
//! - `cell_of` is deterministic and total over valid coordinates; it fails
//!   with `InvalidCoordinate` for anything out of range or non-finite.
//! - `ring(cell, k)` returns every cell within grid distance `k`, the center
//!   first, in an order that only depends on its inputs. `k` above
//!   [`MAX_RING_COUNT`](crate::validation::MAX_RING_COUNT) fails with
//!   `InvalidInput`.
//! - Two coordinates close to each other map to the same cell or to cells
//!   within ring 1 of each other.

mod geohash_grid;
mod h3_grid;

pub use geohash_grid::GeohashGrid;
pub use h3_grid::H3Grid;

use crate::error::Result;
use hexnear_types::Coordinate;
use smallvec::SmallVec;
use std::fmt;
use std::hash::Hash;

/// Cells visited by a query. Inline capacity covers the center plus a
/// full first ring on either backend.
pub type Neighborhood<C> = SmallVec<[C; 9]>;

/// A global tessellation at one fixed resolution.
pub trait Tessellation: Send + Sync {
    /// Opaque cell identifier. Equality and hashing are stable across runs.
    type Cell: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync;

    /// Short backend name used in logs and statistics.
    fn name(&self) -> &'static str;

    /// Resolution (or precision) every cell of this grid is computed at.
    fn resolution(&self) -> u8;

    /// Cell containing `coordinate`.
    fn cell_of(&self, coordinate: Coordinate) -> Result<Self::Cell>;

    /// All cells within grid distance `k` of `cell`, center first.
    fn ring(&self, cell: &Self::Cell, k: u32) -> Result<Neighborhood<Self::Cell>>;
}
