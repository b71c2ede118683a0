//! Error types for the HTTP surface and the geolocation collaborator.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hexnear::HexnearError;
use thiserror::Error;

use crate::protocol::ErrorBody;

/// Failure to turn a client IP into a coordinate.
///
/// Always surfaced to the caller; the server never substitutes a made-up
/// location.
#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("Geolocation request failed: {0}")]
    Transport(String),
    #[error("Geolocation service returned HTTP {0}")]
    Status(u16),
    #[error("Geolocation service rejected {ip}: {message}")]
    Rejected { ip: String, message: String },
    #[error("Invalid geolocation response: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
    #[error(transparent)]
    Query(#[from] HexnearError),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Geolocation(_) => StatusCode::BAD_GATEWAY,
            Self::Query(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Plain-text rendering for the text endpoints.
    pub fn into_text_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        let message = match &self {
            Self::Geolocation(_) => "Error retrieving location".to_string(),
            other => other.to_string(),
        };
        (status, message).into_response()
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("{}", self);
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
