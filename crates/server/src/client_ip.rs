//! Caller IP extraction.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

pub const FORWARDED_FOR: &str = "x-forwarded-for";

/// The caller's IP: the first `X-Forwarded-For` entry when it parses,
/// otherwise the peer address of the connection.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> IpAddr {
    let forwarded = headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    if let Some(raw) = forwarded {
        match parse_forwarded(raw) {
            Some(ip) => return ip,
            None => tracing::warn!("Ignoring unparseable X-Forwarded-For entry: {}", raw),
        }
    }

    peer.ip()
}

/// Accepts a bare address or one with a port (`1.2.3.4:5678`, `[::1]:80`).
fn parse_forwarded(raw: &str) -> Option<IpAddr> {
    raw.parse::<IpAddr>()
        .ok()
        .or_else(|| raw.parse::<SocketAddr>().ok().map(|addr| addr.ip()))
        .or_else(|| {
            raw.strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
                .and_then(|inner| inner.parse().ok())
        })
}

/// Loopback callers (local testing) cannot be geolocated.
pub fn is_local(ip: IpAddr) -> bool {
    ip.to_canonical().is_loopback()
}
