//! Fixture model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A single scheduled match between two teams.
///
/// Fixtures are owned by the external fixture store; the engine only
/// reads them. Scores transition once from absent to present when the
/// game is finalized and never change again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    /// Season year
    pub season: u32,

    /// Round number within the season
    pub round: u32,

    /// Kickoff instant, normalized to UTC
    pub kickoff: DateTime<Utc>,

    /// Home side team name
    pub home_team: String,

    /// Away side team name
    pub away_team: String,

    /// Venue name
    pub venue: String,

    /// Home final score, present once finalized
    pub home_score: Option<u32>,

    /// Away final score, present once finalized
    pub away_score: Option<u32>,
}

impl Fixture {
    /// Create an unfinalized fixture.
    pub fn new(
        season: u32,
        round: u32,
        kickoff: DateTime<Utc>,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        venue: impl Into<String>,
    ) -> Self {
        Self {
            season,
            round,
            kickoff,
            home_team: home_team.into(),
            away_team: away_team.into(),
            venue: venue.into(),
            home_score: None,
            away_score: None,
        }
    }

    /// Builder method to set final scores.
    pub fn with_scores(mut self, home: u32, away: u32) -> Self {
        self.home_score = Some(home);
        self.away_score = Some(away);
        self
    }

    /// Both final scores are present.
    pub fn is_finalized(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }

    /// The fixture's kickoff is at or before the given instant.
    pub fn has_kicked_off(&self, at: DateTime<Utc>) -> bool {
        self.kickoff <= at
    }

    /// Whether the given team plays in this fixture, on either side.
    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }

    /// Check the home/away sides are clearly identified.
    ///
    /// A fixture with an empty side or the same team on both sides must
    /// never be projected or offered; the caller surfaces the failure
    /// instead of guessing.
    pub fn check_sides(&self) -> Result<(), EngineError> {
        let home = self.home_team.trim();
        let away = self.away_team.trim();

        if home.is_empty() || away.is_empty() || home == away {
            return Err(EngineError::AmbiguousFixtureTeams {
                season: self.season,
                round: self.round,
                home_team: self.home_team.clone(),
                away_team: self.away_team.clone(),
            });
        }
        Ok(())
    }
}
