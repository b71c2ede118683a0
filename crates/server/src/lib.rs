//! hexnear server
//!
//! HTTP front end for the hexnear POI index: geolocates the caller's IP,
//! resolves the surrounding H3 cells and returns the POIs bucketed there.
//!
//! # Example
//!
//! ```no_run
//! use hexnear::{PoiIndex, ProximityResolver, sample_pois};
//! use hexnear_server::{
//!     AppState, DEFAULT_GEOIP_TIMEOUT, DEFAULT_GEOIP_URL, IpApiLocator, run_server,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let resolver = ProximityResolver::new(Arc::new(PoiIndex::new(sample_pois(), 9)?));
//!     let locator = IpApiLocator::new(DEFAULT_GEOIP_URL, DEFAULT_GEOIP_TIMEOUT)?;
//!     let state = AppState::new(resolver, locator);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     let shutdown = async {
//!         tokio::signal::ctrl_c().await.ok();
//!     };
//!     run_server(listener, state, shutdown).await
//! }
//! ```

pub mod client_ip;
pub mod error;
pub mod geolocate;
pub mod handler;
pub mod protocol;
pub mod transport;

pub use error::{GeolocationError, ServerError};
pub use geolocate::{
    DEFAULT_GEOIP_TIMEOUT, DEFAULT_GEOIP_URL, FixedLocator, GeoLocator, IpApiLocator,
};
pub use handler::AppState;
pub use protocol::{LocationSource, NearbyResponse, PoiView, StatsResponse};

pub use transport::http::{router, run_server};
