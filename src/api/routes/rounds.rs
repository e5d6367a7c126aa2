//! Round status endpoints.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::RoundStatus;
use crate::tipping;

#[derive(Debug, Serialize)]
pub struct RoundStatusesResponse {
    pub season: u32,
    pub statuses: BTreeMap<u32, RoundStatus>,
}

/// GET /api/rounds — status of every round as of now.
pub async fn round_statuses(
    State(state): State<AppState>,
) -> Result<Json<RoundStatusesResponse>, ApiError> {
    let fixtures = state.store.load_fixtures()?;
    let statuses = tipping::round_statuses(&fixtures, Utc::now());

    Ok(Json(RoundStatusesResponse {
        season: state.store.season(),
        statuses,
    }))
}

#[derive(Debug, Serialize)]
pub struct CurrentRoundResponse {
    pub season: u32,
    pub current_tipping_round: u32,
    pub most_recent_closed_round: u32,
}

/// GET /api/rounds/current — the round open for tipping.
pub async fn current_round(
    State(state): State<AppState>,
) -> Result<Json<CurrentRoundResponse>, ApiError> {
    let fixtures = state.store.load_fixtures()?;
    let now = Utc::now();

    Ok(Json(CurrentRoundResponse {
        season: state.store.season(),
        current_tipping_round: tipping::current_tipping_round(&fixtures, now),
        most_recent_closed_round: tipping::most_recent_closed_round(&fixtures, now),
    }))
}
