//! Standings and per-tip result models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a tip against the finalized result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipOutcome {
    Win,
    Draw,
    Loss,
}

impl TipOutcome {
    /// Classify a margin.
    pub fn from_margin(margin: i32) -> Self {
        match margin.cmp(&0) {
            std::cmp::Ordering::Greater => TipOutcome::Win,
            std::cmp::Ordering::Equal => TipOutcome::Draw,
            std::cmp::Ordering::Less => TipOutcome::Loss,
        }
    }

    /// Competition points: 2 for a win, 1 for a draw, 0 for a loss.
    pub fn points(&self) -> u32 {
        match self {
            TipOutcome::Win => 2,
            TipOutcome::Draw => 1,
            TipOutcome::Loss => 0,
        }
    }
}

impl fmt::Display for TipOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TipOutcome::Win => "win",
            TipOutcome::Draw => "draw",
            TipOutcome::Loss => "loss",
        };
        write!(f, "{}", s)
    }
}

/// A committed tip joined to its finalized result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipResultRow {
    pub email: String,
    pub username: String,
    pub season: u32,
    pub round: u32,
    pub team: String,
    pub opponent: String,
    pub is_home: bool,
    pub committed_at: DateTime<Utc>,

    /// Margin from the tipped team's perspective
    pub margin: i32,

    /// Win/draw/loss for the tipped team
    pub outcome: TipOutcome,

    /// Competition points earned by this tip
    pub points: u32,
}

/// One user's row in the standings table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsRow {
    pub email: String,
    pub username: String,

    /// Number of tips counted (meaning depends on the counting mode)
    pub tips_count: u32,

    /// Sum of points over scored tips
    pub total_points: u32,

    /// Sum of margins over scored tips
    pub total_margin: i32,

    /// 1-based rank after sorting
    pub position: u32,
}
