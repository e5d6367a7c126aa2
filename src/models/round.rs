//! Round status model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Temporal state of a round, derived from its fixtures. Never stored.
///
/// A round is `Upcoming` while no fixture has kicked off, `Closed` once
/// every fixture has, and `InProgress` for any mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    Upcoming,
    InProgress,
    Closed,
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoundStatus::Upcoming => "upcoming",
            RoundStatus::InProgress => "in_progress",
            RoundStatus::Closed => "closed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RoundStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn test_round_status_display() {
        assert_eq!(RoundStatus::Upcoming.to_string(), "upcoming");
        assert_eq!(RoundStatus::Closed.to_string(), "closed");
    }

    #[test]
    fn test_round_status_roundtrip() {
        let status: RoundStatus = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(status, RoundStatus::Closed);
    }
}
