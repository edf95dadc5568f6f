//! HTTP API
//!
//! Routes:
//!
//! - `GET /holders/{network}/{token_address}`: JSON array of holder addresses
//! - `GET /abi/{network}/{token_address}`: the contract ABI as published
//! - `GET /health`: liveness probe
//! - `GET /stats`: cache statistics
//!
//! Failures, including undecodable paths, are returned as
//! `{"code": ..., "message": ...}` with a status that tells client errors
//! apart from upstream trouble.

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::errors::ScrapeError;
use crate::service::{ExplorerService, ServiceStats};

/// Shared handler state
pub type AppState = Arc<ExplorerService>;

/// Error response body for API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// An error on its way out of a handler
#[derive(Debug)]
pub enum ApiError {
    /// The lookup itself failed
    Scrape(ScrapeError),
    /// The request path could not be decoded
    BadRequest(String),
}

impl From<ScrapeError> for ApiError {
    fn from(err: ScrapeError) -> Self {
        Self::Scrape(err)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    /// HTTP status and error code for the error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        let error = match self {
            ApiError::Scrape(error) => error,
            ApiError::BadRequest(_) => return (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
        };
        match error {
            ScrapeError::UnsupportedNetwork { .. } => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_NETWORK")
            }
            ScrapeError::InvalidUrl { .. } => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ScrapeError::Request { source, .. } if source.is_timeout() => {
                (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT")
            }
            ScrapeError::Request { .. } | ScrapeError::HttpStatus { .. } => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE")
            }
            ScrapeError::MalformedAbi { .. } => (StatusCode::BAD_GATEWAY, "MALFORMED_ABI"),
            ScrapeError::ClientInit(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match self {
            ApiError::Scrape(error) => error.to_string(),
            ApiError::BadRequest(message) => message,
        };
        if status.is_server_error() {
            warn!(error = %message, code = code, "Request failed");
        }
        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

/// Builds the API router around a shared service
pub fn router(service: AppState) -> Router {
    Router::new()
        .route("/holders/{network}/{token_address}", get(get_holders))
        .route("/abi/{network}/{token_address}", get(get_abi))
        .route("/health", get(health))
        .route("/stats", get(get_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Handler for `GET /holders/{network}/{token_address}`
async fn get_holders(
    State(service): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Vec<String>>, ApiError> {
    let Path((network, token_address)) = path?;
    info!(network = %network, token_address = %token_address, "Received holders request");
    let holders = service.holders(&network, &token_address).await?;
    Ok(Json(holders))
}

/// Handler for `GET /abi/{network}/{token_address}`
async fn get_abi(
    State(service): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path((network, token_address)) = path?;
    info!(network = %network, token_address = %token_address, "Received ABI request");
    let abi = service.abi(&network, &token_address).await?;
    Ok(Json(abi))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_stats(State(service): State<AppState>) -> Json<ServiceStats> {
    Json(service.stats().await)
}
