//! Round status classification.
//!
//! Derives each round's temporal state from its fixtures and a
//! reference instant. Pure and deterministic: the same fixtures and
//! instant always classify the same way, which is what makes
//! retroactive eligibility checks possible.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::models::{Fixture, RoundStatus};

/// Classify every round in the fixture list as of `at`.
///
/// A round with no fixture kicked off is `Upcoming`; with every fixture
/// kicked off it is `Closed`; any mix is `InProgress`.
pub fn round_statuses(fixtures: &[Fixture], at: DateTime<Utc>) -> BTreeMap<u32, RoundStatus> {
    let mut by_round: BTreeMap<u32, (u32, u32)> = BTreeMap::new();

    for fixture in fixtures {
        let entry = by_round.entry(fixture.round).or_insert((0, 0));
        if fixture.has_kicked_off(at) {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    by_round
        .into_iter()
        .map(|(round, (past, future))| {
            let status = if past == 0 {
                RoundStatus::Upcoming
            } else if future == 0 {
                RoundStatus::Closed
            } else {
                RoundStatus::InProgress
            };
            (round, status)
        })
        .collect()
}

/// Highest round number with status `Closed`, or 0 if none.
pub fn most_recent_closed_round(fixtures: &[Fixture], at: DateTime<Utc>) -> u32 {
    round_statuses(fixtures, at)
        .into_iter()
        .filter(|(_, status)| *status == RoundStatus::Closed)
        .map(|(round, _)| round)
        .max()
        .unwrap_or(0)
}

/// The round currently open for tipping: one past the most recent
/// closed round, or round 1 at the start of the season.
pub fn current_tipping_round(fixtures: &[Fixture], at: DateTime<Utc>) -> u32 {
    match most_recent_closed_round(fixtures, at) {
        0 => 1,
        closed => closed + 1,
    }
}

/// Fixtures belonging to one round of one season.
pub fn fixtures_for_round(fixtures: &[Fixture], season: u32, round: u32) -> Vec<&Fixture> {
    fixtures
        .iter()
        .filter(|f| f.season == season && f.round == round)
        .collect()
}
