//! Team-perspective result projection.

use serde::{Deserialize, Serialize};

use super::SelectionKey;

/// One side's view of a finalized fixture.
///
/// Each finalized fixture yields exactly two projections, one per team,
/// with scored/conceded swapped and `is_home` flipped. Unfinalized
/// fixtures yield none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultProjection {
    /// Season year
    pub season: u32,

    /// Round number
    pub round: u32,

    /// Team this projection is from the perspective of
    pub team: String,

    /// The opposing team
    pub opponent: String,

    /// Whether `team` was the home side
    pub is_home: bool,

    /// Points scored by `team`
    pub points_scored: u32,

    /// Points conceded by `team`
    pub points_conceded: u32,
}

impl ResultProjection {
    /// Winning margin from this team's perspective.
    pub fn margin(&self) -> i32 {
        self.points_scored as i32 - self.points_conceded as i32
    }

    /// Join key shared with committed tips and available selections.
    pub fn key(&self) -> SelectionKey {
        SelectionKey {
            season: self.season,
            round: self.round,
            team: self.team.clone(),
            opponent: self.opponent.clone(),
            is_home: self.is_home,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection(scored: u32, conceded: u32) -> ResultProjection {
        ResultProjection {
            season: 2026,
            round: 1,
            team: "Broncos".to_string(),
            opponent: "Roosters".to_string(),
            is_home: true,
            points_scored: scored,
            points_conceded: conceded,
        }
    }

    #[test]
    fn test_margin_positive() {
        assert_eq!(projection(24, 12).margin(), 12);
    }

    #[test]
    fn test_margin_negative() {
        assert_eq!(projection(12, 24).margin(), -12);
    }

    #[test]
    fn test_margin_zero() {
        assert_eq!(projection(18, 18).margin(), 0);
    }

    #[test]
    fn test_key_fields() {
        let key = projection(24, 12).key();
        assert_eq!(key.round, 1);
        assert_eq!(key.team, "Broncos");
        assert!(key.is_home);
    }

    #[test]
    fn test_projection_serialization() {
        let p = projection(24, 12);
        let json = serde_json::to_string(&p).unwrap();
        let parsed: ResultProjection = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.margin(), 12);
    }
}
