//! # hexnear-types
//!
//! Core data types for the hexnear proximity index.
//!
//! - **Coordinate**: latitude/longitude pair built on `geo` primitives
//! - **Poi / PoiId**: named, located points of interest with caller-assigned identity
//!
//! All types are serializable with Serde.
//!
//! ## Examples
//!
//! ```rust
//! use hexnear_types::{Coordinate, Poi};
//!
//! let city_hall = Poi::new(2, "City Hall", Coordinate::new(40.7128, -74.0060));
//! let bridge = Coordinate::new(40.7061, -73.9969);
//! assert!(city_hall.coordinate().haversine_distance(&bridge) < 1_500.0);
//! ```

pub mod coordinate;
pub mod poi;

pub use coordinate::Coordinate;
pub use poi::{Poi, PoiId};
