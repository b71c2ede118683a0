//! IP geolocation collaborator.
//!
//! The lookup is a slow, unreliable network call. Whatever it returns is
//! validated before it reaches the index, and every failure is reported to
//! the caller as a [`GeolocationError`].

use crate::error::GeolocationError;
use hexnear::validation::validate_coordinate;
use hexnear_types::Coordinate;
use serde::Deserialize;
use std::future::Future;
use std::net::IpAddr;
use std::time::Duration;

pub const DEFAULT_GEOIP_URL: &str = "http://ip-api.com";
pub const DEFAULT_GEOIP_TIMEOUT: Duration = Duration::from_secs(3);

/// Resolves a client IP address to an approximate coordinate.
pub trait GeoLocator: Send + Sync + 'static {
    fn locate(
        &self,
        ip: IpAddr,
    ) -> impl Future<Output = Result<Coordinate, GeolocationError>> + Send;
}

/// Response body of the ip-api.com JSON endpoint.
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

impl IpApiResponse {
    fn into_coordinate(self, ip: IpAddr) -> Result<Coordinate, GeolocationError> {
        if self.status != "success" {
            return Err(GeolocationError::Rejected {
                ip: ip.to_string(),
                message: self.message.unwrap_or_else(|| self.status.clone()),
            });
        }

        let (Some(lat), Some(lon)) = (self.lat, self.lon) else {
            return Err(GeolocationError::Malformed(
                "response is missing lat/lon".to_string(),
            ));
        };

        let coordinate = Coordinate::new(lat, lon);
        validate_coordinate(&coordinate)
            .map_err(|e| GeolocationError::Malformed(e.to_string()))?;
        Ok(coordinate)
    }
}

/// Geolocation through an ip-api.com compatible HTTP service
/// (`GET {base_url}/json/{ip}`).
#[derive(Debug, Clone)]
pub struct IpApiLocator {
    client: reqwest::Client,
    base_url: String,
}

impl IpApiLocator {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GeolocationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeolocationError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl GeoLocator for IpApiLocator {
    async fn locate(&self, ip: IpAddr) -> Result<Coordinate, GeolocationError> {
        let url = format!("{}/json/{}", self.base_url, ip);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GeolocationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeolocationError::Status(status.as_u16()));
        }

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|e| GeolocationError::Malformed(e.to_string()))?;

        tracing::debug!("Geolocation response for {}: {:?}", ip, body);

        body.into_coordinate(ip)
    }
}

/// Always answers with the same coordinate.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub Coordinate);

impl GeoLocator for FixedLocator {
    async fn locate(&self, _ip: IpAddr) -> Result<Coordinate, GeolocationError> {
        Ok(self.0)
    }
}
