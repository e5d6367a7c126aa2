//! Tip submission validation.
//!
//! Enforces the commit-time timing invariant only: never accept a tip
//! for a match that kicked off more than the commit grace ago.
//! Eligibility is a menu-time concern and is deliberately NOT re-run
//! here; callers gate on the resolver before handing a selection in.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::config::SeasonConfig;
use crate::error::EngineError;
use crate::models::{AvailableSelection, CommittedTip, User};
use crate::time::parse_utc;

/// Validate a submission and build the immutable committed tip.
///
/// Fails with `SubmissionTooLate` when the submission instant is past
/// the selection's cutoff plus the commit grace period.
pub fn validate_tip(
    config: &SeasonConfig,
    user: &User,
    selection: &AvailableSelection,
    submitted_at: DateTime<Utc>,
) -> Result<CommittedTip, EngineError> {
    let cutoff = selection.available_until + Duration::minutes(config.commit_grace_minutes);

    if submitted_at > cutoff {
        return Err(EngineError::SubmissionTooLate {
            team: selection.team.clone(),
            round: selection.round,
            cutoff,
            submitted_at,
        });
    }

    info!(
        email = %user.email,
        round = selection.round,
        team = %selection.team,
        "Committed tip"
    );

    Ok(CommittedTip {
        email: user.email.clone(),
        username: user.username.clone(),
        season: selection.season,
        round: selection.round,
        team: selection.team.clone(),
        opponent: selection.opponent.clone(),
        is_home: selection.is_home,
        committed_at: submitted_at,
    })
}

/// Validate a submission whose instant arrives as a raw timestamp
/// string from the host. The string resolves through the UTC
/// normalizer first, so a timestamp that can't be pinned to UTC is a
/// `TimezoneViolation` before any timing check runs.
pub fn validate_tip_raw(
    config: &SeasonConfig,
    user: &User,
    selection: &AvailableSelection,
    submitted_at: &str,
) -> Result<CommittedTip, EngineError> {
    let instant = parse_utc(submitted_at)?;
    validate_tip(config, user, selection, instant)
}
