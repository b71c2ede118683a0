//! Tessellations, validation, and GeoJSON conversion.

pub mod geojson;
pub mod grid;
pub mod validation;
