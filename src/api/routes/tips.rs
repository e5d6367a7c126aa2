//! Tipping endpoints: the make-tip payload, submission, and the
//! per-round tips view.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::leaderboard;
use crate::models::{AvailableSelection, CommittedTip, TipResultRow, User};
use crate::tipping::{self, RoundMenu};

#[derive(Debug, Deserialize)]
pub struct MakeTipParams {
    pub email: String,
}

/// A blocked team with every reason it is blocked.
#[derive(Debug, Serialize)]
pub struct UnavailableTeam {
    pub team: String,
    pub reasons: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MakeTipResponse {
    pub current_round: u32,
    pub user: User,
    pub available: Vec<AvailableSelection>,
    pub unavailable: Vec<UnavailableTeam>,
}

fn resolve_menu_for_user(
    state: &AppState,
    email: &str,
) -> Result<(User, u32, RoundMenu), ApiError> {
    let user = state
        .store
        .find_user(email)?
        .ok_or_else(|| ApiError::NotFound(format!("No user found with email: {}", email)))?;

    let fixtures = state.store.load_fixtures()?;
    let now = Utc::now();
    let round = tipping::current_tipping_round(&fixtures, now);

    let selections = tipping::selections_for_round(&fixtures, state.store.season(), round)?;

    let history: Vec<CommittedTip> = state
        .store
        .load_tips()?
        .into_iter()
        .filter(|t| user.matches_email(&t.email))
        .collect();

    let menu = tipping::resolve_eligibility(&state.config.season, round, selections, &history, now);
    Ok((user, round, menu))
}

/// GET /api/make-tip?email= — the round's menu for one user.
pub async fn make_tip_payload(
    State(state): State<AppState>,
    Query(params): Query<MakeTipParams>,
) -> Result<Json<MakeTipResponse>, ApiError> {
    let (user, round, menu) = resolve_menu_for_user(&state, &params.email)?;

    let available = menu.eligible().into_iter().cloned().collect();
    let unavailable = menu
        .ineligible()
        .into_iter()
        .map(|verdict| UnavailableTeam {
            team: verdict.selection.team.clone(),
            reasons: verdict.reasons.iter().map(|r| r.to_string()).collect(),
        })
        .collect();

    Ok(Json(MakeTipResponse {
        current_round: round,
        user,
        available,
        unavailable,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SubmitTipRequest {
    pub email: String,

    /// The user's derived PIN; submissions without it are rejected.
    pub pin: String,

    pub team: String,

    /// Submission instant; defaults to now. Naive timestamps are taken
    /// as UTC, offsets are converted.
    pub submitted_at: Option<String>,
}

/// POST /api/submit-tip — check the PIN, gate on eligibility, validate
/// timing, store.
pub async fn submit_tip(
    State(state): State<AppState>,
    Json(request): Json<SubmitTipRequest>,
) -> Result<Json<CommittedTip>, ApiError> {
    let (user, round, menu) = resolve_menu_for_user(&state, &request.email)?;

    if request.pin != user.pin(&state.config.season.pin_salt) {
        return Err(ApiError::BadRequest("Incorrect PIN".to_string()));
    }

    menu.require_eligible()?;

    let verdict = menu.find(&request.team).ok_or_else(|| {
        ApiError::BadRequest(format!(
            "{} is not in the round {} menu",
            request.team, round
        ))
    })?;

    if !verdict.is_eligible() {
        let reasons: Vec<String> = verdict.reasons.iter().map(|r| r.to_string()).collect();
        return Err(ApiError::BadRequest(format!(
            "{} is not eligible this round: {}",
            request.team,
            reasons.join("; ")
        )));
    }

    let tip = match request.submitted_at.as_deref() {
        Some(raw) => {
            tipping::validate_tip_raw(&state.config.season, &user, &verdict.selection, raw)?
        }
        None => tipping::validate_tip(&state.config.season, &user, &verdict.selection, Utc::now())?,
    };

    state.store.append_tip(&tip)?;
    info!(email = %tip.email, round, team = %tip.team, "Tip submitted via API");

    Ok(Json(tip))
}

#[derive(Debug, Deserialize)]
pub struct RoundTipsParams {
    /// Round to list; defaults to the most recent closed round.
    pub round: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct RoundTipsResponse {
    pub round: u32,
    pub tips: Vec<TipResultRow>,
}

/// GET /api/round-tips?round= — committed tips joined to results for
/// one round. Defaults to the most recent closed round so in-progress
/// picks aren't leaked.
pub async fn round_tips(
    State(state): State<AppState>,
    Query(params): Query<RoundTipsParams>,
) -> Result<Json<RoundTipsResponse>, ApiError> {
    let fixtures = state.store.load_fixtures()?;
    let round = params
        .round
        .unwrap_or_else(|| tipping::most_recent_closed_round(&fixtures, Utc::now()));

    let tips = state.store.load_tips()?;
    let projections = tipping::project_results(&fixtures)?;
    let rows = leaderboard::build_result_rows(&tips, &projections);

    Ok(Json(RoundTipsResponse {
        round,
        tips: leaderboard::result_rows_for_round(&rows, round),
    }))
}
