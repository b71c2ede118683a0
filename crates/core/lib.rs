//! Hexagonal-grid point-of-interest index with ring-expanded proximity queries.
//!
//! ## Features
//! - **Cell-keyed index**: POIs bucketed by the H3 cell containing them, built once and read-only afterwards
//! - **Ring expansion**: queries visit the containing cell plus `k` rings of neighbours (default 1), so POIs just across a cell boundary are not missed
//! - **Pluggable grids**: anything implementing [`Tessellation`] can back the index; H3 and geohash ship in the box
//! - **Non-fatal construction**: POIs with unusable coordinates are skipped and reported, never abort the build
//!
//! ```rust
//! use hexnear::{Coordinate, PoiIndex, ProximityResolver, sample_pois};
//! use std::sync::Arc;
//!
//! let index = Arc::new(PoiIndex::new(sample_pois(), 9)?);
//! let resolver = ProximityResolver::new(index);
//!
//! let nearby = resolver.nearby(Coordinate::new(40.7128, -74.0060))?;
//! assert!(nearby.iter().any(|poi| poi.name() == "City Hall"));
//!
//! // Out-of-range input is an error, not an empty result
//! assert!(resolver.nearby(Coordinate::new(200.0, 0.0)).is_err());
//! # Ok::<(), hexnear::HexnearError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod index;
pub mod resolver;
pub mod sample;

pub use builder::IndexBuilder;
pub use config::Config;
pub use error::{HexnearError, Result};
pub use index::{IndexStats, PoiIndex, SkipReason, SkippedPoi};
pub use resolver::{DEFAULT_RING_COUNT, NearbyResult, ProximityResolver};
pub use sample::{NYC, sample_pois};

pub use compute::grid::{GeohashGrid, H3Grid, Neighborhood, Tessellation};

pub use hexnear_types::{Coordinate, Poi, PoiId};

// Re-export validation and GeoJSON utilities
pub use compute::geojson;
pub use compute::validation;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, HexnearError, IndexBuilder, Result};

    pub use crate::{Coordinate, Poi, PoiId};

    pub use crate::{PoiIndex, ProximityResolver};

    pub use crate::{GeohashGrid, H3Grid, Tessellation};

    pub use crate::{geojson, validation};
}
