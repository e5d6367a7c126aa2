//! Result projection.
//!
//! Expands each finalized fixture into two team-perspective outcome
//! records. A fixture with only one score (or none) projects nothing;
//! a fixture without clearly identified sides aborts loudly.

use tracing::debug;

use crate::error::EngineError;
use crate::models::{Fixture, ResultProjection};

/// Project all finalized fixtures into per-team result records.
///
/// Exactly two projections per finalized fixture, scored/conceded
/// swapped and `is_home` flipped. Errors on the first fixture whose
/// sides cannot be identified rather than guessing.
pub fn project_results(fixtures: &[Fixture]) -> Result<Vec<ResultProjection>, EngineError> {
    let mut projections = Vec::new();

    for fixture in fixtures {
        let (home_score, away_score) = match (fixture.home_score, fixture.away_score) {
            (Some(h), Some(a)) => (h, a),
            // Never partially project: one missing score means no rows.
            _ => continue,
        };

        fixture.check_sides()?;

        projections.push(ResultProjection {
            season: fixture.season,
            round: fixture.round,
            team: fixture.home_team.clone(),
            opponent: fixture.away_team.clone(),
            is_home: true,
            points_scored: home_score,
            points_conceded: away_score,
        });
        projections.push(ResultProjection {
            season: fixture.season,
            round: fixture.round,
            team: fixture.away_team.clone(),
            opponent: fixture.home_team.clone(),
            is_home: false,
            points_scored: away_score,
            points_conceded: home_score,
        });
    }

    debug!(
        count = projections.len(),
        "Projected results from finalized fixtures"
    );
    Ok(projections)
}
