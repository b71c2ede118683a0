//! HTTP transport
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | plain-text recommendations for the caller's IP |
//! | `GET /v1/locate` | the same, as JSON |
//! | `GET /v1/nearby?lat=&lon=[&rings=]` | recommendations for an explicit coordinate |
//! | `GET /v1/stats` | index statistics |
//! | `GET /v1/pois.geojson` | indexed POIs as a GeoJSON FeatureCollection |
//! | `GET /health` | `ok` |

use crate::geolocate::GeoLocator;
use crate::handler::{self, AppState};
use axum::Router;
use axum::routing::get;
use std::future::Future;
use std::net::SocketAddr;
use tracing::info;

pub fn router<L: GeoLocator>(state: AppState<L>) -> Router {
    Router::new()
        .route("/", get(handler::home::<L>))
        .route("/v1/locate", get(handler::locate::<L>))
        .route("/v1/nearby", get(handler::nearby::<L>))
        .route("/v1/stats", get(handler::stats::<L>))
        .route("/v1/pois.geojson", get(handler::pois_geojson::<L>))
        .route("/health", get(handler::health))
        .with_state(state)
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn run_server<L: GeoLocator>(
    listener: tokio::net::TcpListener,
    state: AppState<L>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    info!("hexnear HTTP server listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await?;

    info!("Server stopped");
    Ok(())
}
