//! Selection and committed tip models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Join key linking selections, committed tips and result projections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionKey {
    pub season: u32,
    pub round: u32,
    pub team: String,
    pub opponent: String,
    pub is_home: bool,
}

/// One pickable side of a fixture in a round's menu.
///
/// Exactly two exist per fixture (home and away). The full set for a
/// round is the round's menu; `available_until` is the fixture kickoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSelection {
    /// Season year
    pub season: u32,

    /// Round number
    pub round: u32,

    /// Pickable team
    pub team: String,

    /// The team it plays against this round
    pub opponent: String,

    /// Whether `team` is the home side
    pub is_home: bool,

    /// Fixture kickoff; the selection stops being offered shortly after
    pub available_until: DateTime<Utc>,
}

impl AvailableSelection {
    /// Join key for this selection.
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

/// An immutable committed tip record.
///
/// Created only by the submission validator. At most one should exist
/// per (user, round); duplicates are a recognized failure mode resolved
/// after the fact by the cleanup pass, not prevented at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedTip {
    /// Submitting user's email (identity key)
    pub email: String,

    /// Display name at time of submission
    pub username: String,

    /// Season year
    pub season: u32,

    /// Round number
    pub round: u32,

    /// Tipped team
    pub team: String,

    /// Opposing team
    pub opponent: String,

    /// Whether the tipped team was the home side
    pub is_home: bool,

    /// When the tip was committed, UTC
    pub committed_at: DateTime<Utc>,
}

impl CommittedTip {
    /// Join key matching the tipped selection.
    pub fn key(&self) -> SelectionKey {
        SelectionKey {
            season: self.season,
            round: self.round,
            team: self.team.clone(),
            opponent: self.opponent.clone(),
            is_home: self.is_home,
        }
    }

    /// Duplicate-resolution identity: (user, season, round, team, opponent).
    ///
    /// Deliberately excludes `committed_at` and `is_home` — two tips
    /// for the same side of the same game are the same tip repeated.
    pub fn dedup_key(&self) -> (String, u32, u32, String, String) {
        (
            self.email.to_lowercase(),
            self.season,
            self.round,
            self.team.clone(),
            self.opponent.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn tip(email: &str, committed_at: DateTime<Utc>) -> CommittedTip {
        CommittedTip {
            email: email.to_string(),
            username: "Tester".to_string(),
            season: 2026,
            round: 2,
            team: "Broncos".to_string(),
            opponent: "Roosters".to_string(),
            is_home: true,
            committed_at,
        }
    }

    #[test]
    fn test_selection_key_equality() {
        let at = Utc.with_ymd_and_hms(2026, 3, 4, 0, 0, 0).unwrap();
        let selection = AvailableSelection {
            season: 2026,
            round: 2,
            team: "Broncos".to_string(),
            opponent: "Roosters".to_string(),
            is_home: true,
            available_until: at,
        };

        assert_eq!(selection.key(), tip("a@example.com", at).key());
    }

    #[test]
    fn test_dedup_key_case_insensitive_email() {
        let at = Utc.with_ymd_and_hms(2026, 3, 4, 0, 0, 0).unwrap();
        let a = tip("Casey@Example.com", at);
        let b = tip("casey@example.com", at + chrono::Duration::hours(1));

        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_dedup_key_ignores_committed_at() {
        let at = Utc.with_ymd_and_hms(2026, 3, 4, 0, 0, 0).unwrap();
        let a = tip("a@example.com", at);
        let b = tip("a@example.com", at + chrono::Duration::days(1));

        assert_eq!(a.dedup_key(), b.dedup_key());
        assert_ne!(a, b);
    }

    #[test]
    fn test_committed_tip_serialization() {
        let at = Utc.with_ymd_and_hms(2026, 3, 4, 10, 30, 0).unwrap();
        let original = tip("a@example.com", at);

        let json = serde_json::to_string(&original).unwrap();
        let parsed: CommittedTip = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, original);
    }
}
