//! Error types for index construction and proximity queries.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HexnearError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HexnearError {
    /// Latitude/longitude outside the geographic range, or not finite.
    #[error("Invalid coordinate ({lat}, {lon}): {reason}")]
    InvalidCoordinate { lat: f64, lon: f64, reason: String },

    #[error("Invalid {grid} resolution {resolution}, expected {min}..={max}")]
    InvalidResolution {
        grid: &'static str,
        resolution: u8,
        min: u8,
        max: u8,
    },

    /// A query asked for a resolution other than the one the index was built at.
    #[error("Resolution mismatch: index built at {index}, query requested {requested}")]
    ResolutionMismatch { index: u8, requested: u8 },

    #[error("Invalid cell identifier: {0}")]
    InvalidCell(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl HexnearError {
    /// True for errors caused by caller input rather than by the index itself.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCoordinate { .. }
                | Self::InvalidResolution { .. }
                | Self::ResolutionMismatch { .. }
                | Self::InvalidInput(_)
        )
    }
}

impl From<serde_json::Error> for HexnearError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
