//! Duplicate report and cleanup endpoints (administrative).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::cleanup::{self, CleanupReport};
use crate::models::CommittedTip;

/// GET /api/duplicates — dry-run report, never deletes.
pub async fn duplicate_report(
    State(state): State<AppState>,
) -> Result<Json<CleanupReport>, ApiError> {
    let tips = state.store.load_tips()?;
    let fixtures = state.store.load_fixtures()?;

    Ok(Json(cleanup::build_report(&tips, &fixtures)))
}

#[derive(Debug, Deserialize)]
pub struct CleanupRequest {
    /// Report only; nothing is deleted. Defaults to true.
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Batch bound; defaults to the configured conservative size.
    pub batch: Option<usize>,
}

fn default_dry_run() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub dry_run: bool,
    pub deleted: Vec<CommittedTip>,
    pub remaining_candidates: usize,
}

/// POST /api/cleanup — resolve duplicates, bounded batch at a time.
pub async fn run_cleanup(
    State(state): State<AppState>,
    Json(request): Json<CleanupRequest>,
) -> Result<Json<CleanupResponse>, ApiError> {
    let tips = state.store.load_tips()?;
    let candidates = cleanup::deletion_candidates(&tips);

    if request.dry_run {
        return Ok(Json(CleanupResponse {
            dry_run: true,
            deleted: Vec::new(),
            remaining_candidates: candidates.len(),
        }));
    }

    let batch = request
        .batch
        .unwrap_or(state.config.season.cleanup_batch_size);
    let deleted = cleanup::apply_deletions(&state.store, &candidates, batch)?;

    let remaining = cleanup::deletion_candidates(&state.store.load_tips()?).len();

    Ok(Json(CleanupResponse {
        dry_run: false,
        deleted,
        remaining_candidates: remaining,
    }))
}
