//! Standings endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::leaderboard::{self, CountingMode};
use crate::models::StandingsRow;
use crate::tipping;

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    /// Inclusive round cutoff; whole season when omitted.
    pub round: Option<u32>,

    /// Counting mode; standings default to scored-only.
    pub mode: Option<CountingMode>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub season: u32,
    pub cutoff: Option<u32>,
    pub mode: CountingMode,
    pub rows: Vec<StandingsRow>,
}

/// GET /api/leaderboard?round=&mode= — ranked standings.
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let fixtures = state.store.load_fixtures()?;
    let tips = state.store.load_tips()?;
    let projections = tipping::project_results(&fixtures)?;

    let mode = params.mode.unwrap_or(CountingMode::ScoredOnly);
    let rows = leaderboard::standings(&tips, &projections, params.round, mode);

    Ok(Json(LeaderboardResponse {
        season: state.store.season(),
        cutoff: params.round,
        mode,
        rows,
    }))
}
