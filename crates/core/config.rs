//! Index configuration.
//!
//! Resolution and ring count are process-wide settings: the index is built
//! once at the configured resolution and every query uses the same one.
use crate::compute::grid::H3Grid;
use crate::compute::validation::validate_ring_count;
use crate::error::HexnearError;
use crate::sample::sample_pois;
use hexnear_types::Poi;
use serde::de::Error;
use std::path::Path;

/// Index configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// H3 resolution (0..=15). Smaller numbers mean larger cells.
    #[serde(default = "Config::default_resolution")]
    pub resolution: u8,

    /// Rings expanded around the query cell, 1..=`MAX_RING_COUNT`.
    #[serde(default = "Config::default_ring_count")]
    pub ring_count: u32,

    /// Static POI set indexed at startup
    #[serde(default = "sample_pois")]
    pub pois: Vec<Poi>,
}

impl Config {
    const fn default_resolution() -> u8 {
        9
    }

    const fn default_ring_count() -> u32 {
        crate::resolver::DEFAULT_RING_COUNT
    }

    pub fn with_resolution(mut self, resolution: u8) -> Self {
        self.resolution = resolution;
        self
    }

    /// Out-of-range values are accepted here and rejected by [`Config::validate`].
    pub fn with_ring_count(mut self, ring_count: u32) -> Self {
        self.ring_count = ring_count;
        self
    }

    pub fn with_pois(mut self, pois: Vec<Poi>) -> Self {
        self.pois = pois;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.resolution > H3Grid::MAX_RESOLUTION {
            return Err(format!(
                "Resolution must be between {} and {}, got {}",
                H3Grid::MIN_RESOLUTION,
                H3Grid::MAX_RESOLUTION,
                self.resolution
            ));
        }

        validate_ring_count(self.ring_count).map_err(|e| e.to_string())?;

        if self.pois.len() > 1_000_000 {
            log::warn!(
                "POI set of {} entries is very large; the whole index is held in memory",
                self.pois.len()
            );
        }

        Ok(())
    }

    /// Load a configuration file, picking the format from its extension.
    ///
    /// `.toml` needs the `toml` feature; `.geojson` is read as a POI
    /// FeatureCollection with every other setting at its default; anything
    /// else is parsed as JSON.
    pub fn from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            HexnearError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let parse_err =
            |e: String| HexnearError::InvalidConfig(format!("{}: {}", path.display(), e));

        match path.extension().and_then(|ext| ext.to_str()) {
            #[cfg(feature = "toml")]
            Some("toml") => Self::from_toml(&contents).map_err(|e| parse_err(e.to_string())),
            #[cfg(not(feature = "toml"))]
            Some("toml") => Err(parse_err(
                "TOML configuration requires the `toml` feature".to_string(),
            )),
            Some("geojson") => {
                let pois = crate::compute::geojson::pois_from_geojson(&contents)
                    .map_err(|e| parse_err(e.to_string()))?;
                Ok(Self::default().with_pois(pois))
            }
            _ => Self::from_json(&contents).map_err(|e| parse_err(e.to_string())),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: Self::default_resolution(),
            ring_count: Self::default_ring_count(),
            pois: sample_pois(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexnear_types::Coordinate;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.resolution, 9);
        assert_eq!(config.ring_count, 1);
        assert_eq!(config.pois.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default()
            .with_resolution(8)
            .with_ring_count(2)
            .with_pois(vec![Poi::new(7, "Pier 17", Coordinate::new(40.7057, -74.0018))]);

        let json = config.to_json().unwrap();
        let deserialized = Config::from_json(&json).unwrap();

        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config = Config::from_json(r#"{"resolution": 7}"#).unwrap();
        assert_eq!(config.resolution, 7);
        assert_eq!(config.ring_count, 1);
        assert_eq!(config.pois.len(), 3);
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::from_json(r#"{"resolution": 16}"#).is_err());
        assert!(Config::from_json(r#"{"ring_count": 0}"#).is_err());
        assert!(Config::from_json(r#"{"rings": 2}"#).is_err());
    }

    #[test]
    fn test_ring_count_checked_by_validate() {
        assert!(Config::default().with_ring_count(0).validate().is_err());
        assert!(Config::default().with_ring_count(u32::MAX).validate().is_err());
        assert!(Config::from_json(r#"{"ring_count": 4294967295}"#).is_err());
        assert!(Config::default().with_ring_count(100).validate().is_ok());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_config_toml_roundtrip() {
        let config = Config::default().with_resolution(10);
        let toml_str = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&toml_str).unwrap(), config);
    }
}
