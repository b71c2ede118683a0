//! Request handlers for the hexnear HTTP service

use crate::client_ip::{client_ip, is_local};
use crate::error::ServerError;
use crate::geolocate::GeoLocator;
use crate::protocol::{LocationSource, NearbyParams, NearbyResponse, PoiView, StatsResponse};
use axum::Json;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use hexnear::validation::validate_ring_count;
use hexnear::{NYC, ProximityResolver, geojson};
use hexnear_types::Coordinate;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared state: the read-only resolver plus the geolocation collaborator.
pub struct AppState<L> {
    resolver: ProximityResolver,
    locator: Arc<L>,
    fallback: Coordinate,
}

impl<L: GeoLocator> AppState<L> {
    pub fn new(resolver: ProximityResolver, locator: L) -> Self {
        Self {
            resolver,
            locator: Arc::new(locator),
            fallback: NYC,
        }
    }

    /// Coordinate used for loopback callers.
    pub fn with_fallback(mut self, fallback: Coordinate) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn resolver(&self) -> &ProximityResolver {
        &self.resolver
    }

    /// Resolve the caller's position. Loopback addresses use the fallback;
    /// everything else goes through the locator and fails loudly.
    pub async fn locate(&self, ip: IpAddr) -> Result<(Coordinate, LocationSource), ServerError> {
        if is_local(ip) {
            info!("Local request from {}, using fallback {}", ip, self.fallback);
            return Ok((self.fallback, LocationSource::Fallback));
        }

        match self.locator.locate(ip).await {
            Ok(coordinate) => {
                info!("Located {} at {}", ip, coordinate);
                Ok((coordinate, LocationSource::Ip))
            }
            Err(e) => {
                warn!("Error getting location for {}: {}", ip, e);
                Err(e.into())
            }
        }
    }

    pub fn nearby(
        &self,
        location: Coordinate,
        source: LocationSource,
        rings: Option<u32>,
    ) -> Result<NearbyResponse, ServerError> {
        let rings = match rings {
            Some(k) => {
                validate_ring_count(k)?;
                k
            }
            None => self.resolver.ring_count(),
        };

        let result = self.resolver.lookup_within(location, rings)?;

        Ok(NearbyResponse {
            location,
            source,
            cell: result.center.to_string(),
            rings,
            pois: result.pois.into_iter().map(PoiView::from).collect(),
        })
    }
}

impl<L> Clone for AppState<L> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
            locator: Arc::clone(&self.locator),
            fallback: self.fallback,
        }
    }
}

fn render_text(response: &NearbyResponse) -> String {
    let label = match response.source {
        LocationSource::Fallback => "Your location (localhost fallback)",
        _ => "Your location",
    };

    let mut lines = vec![
        format!(
            "{}: {}, {}",
            label,
            response.location.lat(),
            response.location.lon()
        ),
        "Recommended POIs:".to_string(),
    ];
    lines.extend(response.pois.iter().map(|poi| format!("- {}", poi.name)));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

async fn locate_caller<L: GeoLocator>(
    state: &AppState<L>,
    peer: SocketAddr,
    headers: &HeaderMap,
) -> Result<NearbyResponse, ServerError> {
    let ip = client_ip(headers, peer);
    let (location, source) = state.locate(ip).await?;
    state.nearby(location, source, None)
}

/// `GET /`: plain-text recommendations for the caller's location.
pub async fn home<L: GeoLocator>(
    State(state): State<AppState<L>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Response {
    match locate_caller(&state, peer, &headers).await {
        Ok(response) => render_text(&response).into_response(),
        Err(e) => e.into_text_response(),
    }
}

/// `GET /v1/locate`: JSON recommendations for the caller's location.
pub async fn locate<L: GeoLocator>(
    State(state): State<AppState<L>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Json<NearbyResponse>, ServerError> {
    locate_caller(&state, peer, &headers).await.map(Json)
}

/// `GET /v1/nearby?lat=&lon=[&rings=]`
pub async fn nearby<L: GeoLocator>(
    State(state): State<AppState<L>>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<NearbyResponse>, ServerError> {
    let location = Coordinate::new(params.lat, params.lon);
    state
        .nearby(location, LocationSource::Query, params.rings)
        .map(Json)
}

/// `GET /v1/stats`
pub async fn stats<L: GeoLocator>(State(state): State<AppState<L>>) -> Json<StatsResponse> {
    let resolver = state.resolver();
    Json(StatsResponse::new(
        resolver.index().stats(),
        resolver.ring_count(),
    ))
}

/// `GET /v1/pois.geojson`
pub async fn pois_geojson<L: GeoLocator>(
    State(state): State<AppState<L>>,
) -> Result<Response, ServerError> {
    let body = geojson::index_to_geojson(&**state.resolver().index())?;
    Ok(([(header::CONTENT_TYPE, "application/geo+json")], body).into_response())
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}
