//! REST API endpoints.
//!
//! Axum-based HTTP API for registering players, reporting matches,
//! and querying standings and next-round pairings.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::calculate::EngineError;
use crate::storage::StorageError;
use crate::tournament::TournamentError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<TournamentError> for ApiError {
    fn from(err: TournamentError) -> Self {
        let message = err.to_string();
        match err {
            TournamentError::InvalidName => ApiError::BadRequest(message),
            TournamentError::Storage(StorageError::SelfMatch(_)) => ApiError::BadRequest(message),
            TournamentError::Storage(StorageError::UnknownPlayer(_)) => ApiError::NotFound(message),
            TournamentError::Storage(StorageError::PlayersReferenced(_)) => {
                ApiError::Conflict(message)
            }
            TournamentError::Storage(_) => ApiError::Internal(message),
            TournamentError::Engine(EngineError::OddPlayerCount(_))
            | TournamentError::Engine(EngineError::NoValidPairing(_)) => ApiError::Conflict(message),
            TournamentError::Engine(EngineError::InvalidReference(_)) => {
                ApiError::Internal(message)
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }

    match origin.parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            tracing::warn!("Invalid CORS origin {:?}, allowing any origin", origin);
            layer.allow_origin(Any)
        }
    }
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/players",
            get(routes::players::list_players)
                .post(routes::players::register_player)
                .delete(routes::players::delete_players),
        )
        .route(
            "/api/matches",
            get(routes::matches::list_matches)
                .post(routes::matches::report_match)
                .delete(routes::matches::delete_matches),
        )
        .route("/api/standings", get(routes::standings::get_standings))
        .route("/api/pairings", get(routes::standings::get_pairings))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
