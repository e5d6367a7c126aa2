//! REST API endpoints.
//!
//! Axum-based HTTP API mirroring what the UI and admin pages need:
//! round statuses, the make-tip payload, tip submission, standings,
//! and the duplicate report.

pub mod routes;
pub mod state;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::EngineError;
use crate::storage::StorageError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NoFixturesForRound { .. } => ApiError::NotFound(err.to_string()),
            EngineError::Storage(inner) => ApiError::Internal(inner.to_string()),
            _ => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Internal(err.to_string())
    }
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
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/rounds", get(routes::rounds::round_statuses))
        .route("/api/rounds/current", get(routes::rounds::current_round))
        .route("/api/make-tip", get(routes::tips::make_tip_payload))
        .route("/api/submit-tip", post(routes::tips::submit_tip))
        .route("/api/round-tips", get(routes::tips::round_tips))
        .route("/api/leaderboard", get(routes::leaderboard::leaderboard))
        .route("/api/duplicates", get(routes::cleanup::duplicate_report))
        .route("/api/cleanup", post(routes::cleanup::run_cleanup))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
