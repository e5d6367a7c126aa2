//! Tip eligibility resolution.
//!
//! Computes the legal set of pickable teams for a round from the
//! round's menu and the user's tip history. Rules apply independently
//! and their reasons union: an ineligible team reports every rule it
//! trips, not just the first.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::SeasonConfig;
use crate::error::EngineError;
use crate::models::{AvailableSelection, CommittedTip, Fixture};

/// Why a team cannot be tipped this round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum IneligibilityReason {
    /// Team was the user's tip in the immediately previous round.
    PreviousRoundTeam,

    /// Team plays against the user's previous-round opponent, so
    /// picking it would mean tipping against the same side twice
    /// running.
    PreviousRoundOpponent { opponent: String },

    /// Team is itself the user's previous-round opponent.
    PreviousOpponentTeam,

    /// Team has already been tipped the season-cap number of times.
    TeamCapReached { times_tipped: u32 },

    /// The home-side pick quota is exhausted.
    HomeQuotaReached { quota: u32 },

    /// The away-side pick quota is exhausted.
    AwayQuotaReached { quota: u32 },

    /// The fixture kicked off too long ago to still offer.
    SelectionClosed,
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IneligibilityReason::PreviousRoundTeam => write!(f, "Last round tip"),
            IneligibilityReason::PreviousRoundOpponent { opponent } => {
                write!(f, "Playing last round tip's opponent {}", opponent)
            }
            IneligibilityReason::PreviousOpponentTeam => {
                write!(f, "Last round tip's opponent")
            }
            IneligibilityReason::TeamCapReached { times_tipped } => {
                write!(f, "Team already tipped {} times", times_tipped)
            }
            IneligibilityReason::HomeQuotaReached { quota } => {
                write!(f, "Already tipped {} home teams", quota)
            }
            IneligibilityReason::AwayQuotaReached { quota } => {
                write!(f, "Already tipped {} away teams", quota)
            }
            IneligibilityReason::SelectionClosed => write!(f, "Game has kicked off"),
        }
    }
}

/// One menu entry with its eligibility verdict.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionVerdict {
    pub selection: AvailableSelection,
    pub reasons: Vec<IneligibilityReason>,
}

impl SelectionVerdict {
    pub fn is_eligible(&self) -> bool {
        self.reasons.is_empty()
    }
}

/// A round's full menu with per-team verdicts.
#[derive(Debug, Clone, Serialize)]
pub struct RoundMenu {
    pub season: u32,
    pub round: u32,
    pub verdicts: Vec<SelectionVerdict>,
}

impl RoundMenu {
    /// Selections still open to the user.
    pub fn eligible(&self) -> Vec<&AvailableSelection> {
        self.verdicts
            .iter()
            .filter(|v| v.is_eligible())
            .map(|v| &v.selection)
            .collect()
    }

    /// Verdicts for blocked teams, with all their reasons.
    pub fn ineligible(&self) -> Vec<&SelectionVerdict> {
        self.verdicts.iter().filter(|v| !v.is_eligible()).collect()
    }

    /// Verdict for a specific team, if it is in this round's menu.
    pub fn find(&self, team: &str) -> Option<&SelectionVerdict> {
        self.verdicts.iter().find(|v| v.selection.team == team)
    }

    /// Error when nothing in the menu is left to pick.
    pub fn require_eligible(&self) -> Result<(), EngineError> {
        if self.verdicts.iter().any(|v| v.is_eligible()) {
            Ok(())
        } else {
            Err(EngineError::NoEligibleSelections { round: self.round })
        }
    }
}

/// Build the round's menu from its fixtures: two selections per
/// fixture, one per side, available until kickoff.
///
/// Errors with `NoFixturesForRound` on an empty round and
/// `AmbiguousFixtureTeams` on a fixture whose sides cannot be told
/// apart.
pub fn selections_for_round(
    fixtures: &[Fixture],
    season: u32,
    round: u32,
) -> Result<Vec<AvailableSelection>, EngineError> {
    let round_fixtures = super::rounds::fixtures_for_round(fixtures, season, round);

    if round_fixtures.is_empty() {
        return Err(EngineError::NoFixturesForRound { season, round });
    }

    let mut selections = Vec::with_capacity(round_fixtures.len() * 2);
    for fixture in round_fixtures {
        fixture.check_sides()?;

        selections.push(AvailableSelection {
            season,
            round,
            team: fixture.home_team.clone(),
            opponent: fixture.away_team.clone(),
            is_home: true,
            available_until: fixture.kickoff,
        });
        selections.push(AvailableSelection {
            season,
            round,
            team: fixture.away_team.clone(),
            opponent: fixture.home_team.clone(),
            is_home: false,
            available_until: fixture.kickoff,
        });
    }

    selections.sort_by(|a, b| a.team.cmp(&b.team));
    Ok(selections)
}

/// Resolve eligibility for every selection in a round's menu.
///
/// `history` is the user's committed tips; only tips from the
/// configured season in rounds before `round` are considered, so the
/// caller may pass the full set. Round 1 skips the two repeat rules.
pub fn resolve_eligibility(
    config: &SeasonConfig,
    round: u32,
    selections: Vec<AvailableSelection>,
    history: &[CommittedTip],
    now: DateTime<Utc>,
) -> RoundMenu {
    let prior: Vec<&CommittedTip> = history
        .iter()
        .filter(|t| t.season == config.season && t.round < round)
        .collect();

    let previous_round = round.checked_sub(1).filter(|r| *r >= 1);
    let previous_tips: Vec<&CommittedTip> = previous_round
        .map(|prev| {
            prior
                .iter()
                .copied()
                .filter(|t| t.round == prev)
                .collect()
        })
        .unwrap_or_default();

    let mut team_counts: HashMap<&str, u32> = HashMap::new();
    for tip in &prior {
        *team_counts.entry(tip.team.as_str()).or_insert(0) += 1;
    }

    // Venue quotas exclude the magic round by convention.
    let home_count = prior
        .iter()
        .filter(|t| t.round != config.magic_round && t.is_home)
        .count() as u32;
    let away_count = prior
        .iter()
        .filter(|t| t.round != config.magic_round && !t.is_home)
        .count() as u32;

    let display_grace = Duration::minutes(config.display_grace_minutes);

    let verdicts = selections
        .into_iter()
        .map(|selection| {
            let mut reasons = Vec::new();

            if previous_tips.iter().any(|t| t.team == selection.team) {
                reasons.push(IneligibilityReason::PreviousRoundTeam);
            }

            if let Some(prev) = previous_tips.iter().find(|t| t.opponent == selection.opponent) {
                reasons.push(IneligibilityReason::PreviousRoundOpponent {
                    opponent: prev.opponent.clone(),
                });
            }

            // The previous opponent is blocked on both sides: as the
            // opponent of a menu team (above) and as a menu team itself.
            if previous_tips.iter().any(|t| t.opponent == selection.team) {
                reasons.push(IneligibilityReason::PreviousOpponentTeam);
            }

            if let Some(&count) = team_counts.get(selection.team.as_str()) {
                if count >= config.max_tips_per_team {
                    reasons.push(IneligibilityReason::TeamCapReached {
                        times_tipped: count,
                    });
                }
            }

            // The magic round is excluded from the counts above, but an
            // exhausted quota blocks in every round's menu, the magic
            // round included.
            if selection.is_home && home_count >= config.max_home_away_tips {
                reasons.push(IneligibilityReason::HomeQuotaReached {
                    quota: config.max_home_away_tips,
                });
            } else if !selection.is_home && away_count >= config.max_home_away_tips {
                reasons.push(IneligibilityReason::AwayQuotaReached {
                    quota: config.max_home_away_tips,
                });
            }

            if now > selection.available_until + display_grace {
                reasons.push(IneligibilityReason::SelectionClosed);
            }

            SelectionVerdict { selection, reasons }
        })
        .collect::<Vec<_>>();

    debug!(
        round,
        eligible = verdicts.iter().filter(|v| v.is_eligible()).count(),
        blocked = verdicts.iter().filter(|v| !v.is_eligible()).count(),
        "Resolved round menu"
    );

    RoundMenu {
        season: config.season,
        round,
        verdicts,
    }
}
