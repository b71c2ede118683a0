//! GeoJSON conversion for POIs and indexes.

use crate::compute::grid::Tessellation;
use crate::error::{HexnearError, Result};
use crate::index::PoiIndex;
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use hexnear_types::{Coordinate, Poi, PoiId};
use serde_json::json;

/// Converts a POI to a Point feature with `name` (and optionally `cell`) properties.
pub fn poi_to_feature(poi: &Poi, cell: Option<String>) -> Feature {
    let coordinate = poi.coordinate();
    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), json!(poi.name()));
    if let Some(cell) = cell {
        properties.insert("cell".to_string(), json!(cell));
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![
            coordinate.lon(),
            coordinate.lat(),
        ]))),
        id: Some(Id::Number(poi.id().get().into())),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Every indexed POI as a FeatureCollection, bucket by bucket.
pub fn index_to_feature_collection<G: Tessellation>(index: &PoiIndex<G>) -> FeatureCollection {
    let features = index
        .buckets()
        .flat_map(|(cell, bucket)| {
            bucket
                .iter()
                .map(move |poi| poi_to_feature(poi, Some(cell.to_string())))
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Serializes the index to a GeoJSON string.
pub fn index_to_geojson<G: Tessellation>(index: &PoiIndex<G>) -> Result<String> {
    serde_json::to_string(&index_to_feature_collection(index)).map_err(|e| {
        HexnearError::Serialization(format!("Failed to serialize index: {}", e))
    })
}

fn feature_id(feature: &Feature, position: usize) -> Result<PoiId> {
    let from_id = match &feature.id {
        Some(Id::Number(n)) => n.as_u64(),
        Some(Id::String(s)) => s.parse().ok(),
        None => None,
    };

    from_id
        .or_else(|| feature.property("id").and_then(|v| v.as_u64()))
        .map(PoiId)
        .ok_or_else(|| {
            HexnearError::InvalidInput(format!(
                "Feature at index {} has no unsigned integer id",
                position
            ))
        })
}

/// Parses a FeatureCollection of Point features into POIs.
///
/// The id comes from the feature `id` (or an `id` property); the name from
/// the `name` property. Coordinates are not range-checked here: bad ones are
/// skipped later by the index.
///
/// # Examples
///
/// ```
/// use hexnear::compute::geojson::pois_from_geojson;
///
/// let json = r#"{
///   "type": "FeatureCollection",
///   "features": [{
///     "type": "Feature",
///     "id": 2,
///     "geometry": {"type": "Point", "coordinates": [-74.0060, 40.7128]},
///     "properties": {"name": "City Hall"}
///   }]
/// }"#;
///
/// let pois = pois_from_geojson(json).unwrap();
/// assert_eq!(pois[0].name(), "City Hall");
/// assert_eq!(pois[0].coordinate().lat(), 40.7128);
/// ```
pub fn pois_from_geojson(geojson: &str) -> Result<Vec<Poi>> {
    let parsed: GeoJson = geojson
        .parse()
        .map_err(|e| HexnearError::InvalidInput(format!("Failed to parse GeoJSON: {}", e)))?;

    let GeoJson::FeatureCollection(collection) = parsed else {
        return Err(HexnearError::InvalidInput(
            "GeoJSON must be a FeatureCollection".to_string(),
        ));
    };

    collection
        .features
        .iter()
        .enumerate()
        .map(|(position, feature)| {
            let id = feature_id(feature, position)?;

            let name = feature
                .property("name")
                .and_then(|v| v.as_str())
                .ok_or_else(|| {
                    HexnearError::InvalidInput(format!(
                        "Feature at index {} has no name property",
                        position
                    ))
                })?;

            match feature.geometry.as_ref().map(|g| &g.value) {
                Some(Value::Point(coords)) if coords.len() >= 2 => {
                    Ok(Poi::new(id, name, Coordinate::new(coords[1], coords[0])))
                }
                _ => Err(HexnearError::InvalidInput(format!(
                    "Feature at index {} is not a Point",
                    position
                ))),
            }
        })
        .collect()
}
