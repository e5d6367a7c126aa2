//! Engine error types.
//!
//! All conditions here are local and recoverable. Each variant carries
//! enough structure for the caller to render a user-facing message; the
//! engine never panics on malformed input.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::storage::StorageError;

/// Errors produced by the tipping engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A timestamp could not be resolved to a UTC instant.
    #[error("Timestamp not resolvable to UTC: {0:?}")]
    TimezoneViolation(String),

    /// A tip was submitted after the fixture cutoff plus grace.
    #[error(
        "Can't make tip for a game that has already kicked off: \
         {team} in round {round} closed at {cutoff}, submitted at {submitted_at}"
    )]
    SubmissionTooLate {
        team: String,
        round: u32,
        cutoff: DateTime<Utc>,
        submitted_at: DateTime<Utc>,
    },

    /// No fixtures exist for the requested round.
    #[error("No fixtures found for season {season} round {round}")]
    NoFixturesForRound { season: u32, round: u32 },

    /// A fixture has no clearly identified home/away sides.
    /// The offending fixture is skipped loudly, never guessed at.
    #[error(
        "Fixture in season {season} round {round} has ambiguous teams: \
         home={home_team:?} away={away_team:?}"
    )]
    AmbiguousFixtureTeams {
        season: u32,
        round: u32,
        home_team: String,
        away_team: String,
    },

    /// A duplicate deletion candidate was not found in the tip store.
    #[error("Deletion candidate not found in store: {email} round {round} ({team})")]
    UnresolvedDuplicateDeletion {
        email: String,
        round: u32,
        team: String,
    },

    /// Every selection in the round's menu is ineligible or closed.
    #[error("No eligible selections remain for round {round}")]
    NoEligibleSelections { round: u32 },

    /// Underlying store failure while applying a resolver decision.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
