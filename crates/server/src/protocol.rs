//! JSON request and response types for the HTTP API.

use hexnear::{IndexStats, Poi};
use hexnear_types::Coordinate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PoiView {
    pub id: u64,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl From<&Poi> for PoiView {
    fn from(poi: &Poi) -> Self {
        Self {
            id: poi.id().get(),
            name: poi.name().to_string(),
            lat: poi.coordinate().lat(),
            lon: poi.coordinate().lon(),
        }
    }
}

/// Where the query coordinate came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    /// Supplied directly in the request
    Query,
    /// Resolved from the caller's IP
    Ip,
    /// Loopback caller, configured fallback used
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyResponse {
    pub location: Coordinate,
    pub source: LocationSource,
    pub cell: String,
    pub rings: u32,
    pub pois: Vec<PoiView>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NearbyParams {
    pub lat: f64,
    pub lon: f64,
    pub rings: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub grid: String,
    pub resolution: u8,
    pub ring_count: u32,
    pub cell_count: usize,
    pub poi_count: usize,
    pub skipped_count: usize,
    pub largest_bucket: usize,
    pub avg_bucket_size: f64,
}

impl StatsResponse {
    pub fn new(stats: IndexStats, ring_count: u32) -> Self {
        Self {
            grid: stats.grid.to_string(),
            resolution: stats.resolution,
            ring_count,
            cell_count: stats.cell_count,
            poi_count: stats.poi_count,
            skipped_count: stats.skipped_count,
            largest_bucket: stats.largest_bucket,
            avg_bucket_size: stats.avg_bucket_size,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
