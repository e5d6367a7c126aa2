//! Leaderboard aggregation.
//!
//! Folds committed tips and result projections into per-user totals
//! and a ranked standings table, as of an optional round cutoff.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{CommittedTip, ResultProjection, SelectionKey, StandingsRow, TipOutcome, TipResultRow};

/// How `tips_count` treats tips whose game isn't finalized yet.
///
/// Standings views count only scored tips; admin views count every
/// submitted tip. One parameterized path instead of two near-duplicate
/// ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountingMode {
    /// Only tips with a matching result projection count.
    ScoredOnly,
    /// Every committed tip counts, scored or not.
    AllSubmitted,
}

/// Join committed tips to their result projections.
///
/// A tip joins on (season, round, team, opponent, is_home); tips with
/// no matching projection (game not finalized) produce no row.
pub fn build_result_rows(
    tips: &[CommittedTip],
    projections: &[ResultProjection],
) -> Vec<TipResultRow> {
    let by_key: HashMap<SelectionKey, &ResultProjection> =
        projections.iter().map(|p| (p.key(), p)).collect();

    let rows: Vec<TipResultRow> = tips
        .iter()
        .filter_map(|tip| {
            let projection = by_key.get(&tip.key())?;
            let margin = projection.margin();
            let outcome = TipOutcome::from_margin(margin);

            Some(TipResultRow {
                email: tip.email.clone(),
                username: tip.username.clone(),
                season: tip.season,
                round: tip.round,
                team: tip.team.clone(),
                opponent: tip.opponent.clone(),
                is_home: tip.is_home,
                committed_at: tip.committed_at,
                margin,
                outcome,
                points: outcome.points(),
            })
        })
        .collect();

    debug!(
        tips = tips.len(),
        scored = rows.len(),
        "Joined tips to results"
    );
    rows
}

/// Result rows for a single round (admin round view).
pub fn result_rows_for_round(rows: &[TipResultRow], round: u32) -> Vec<TipResultRow> {
    rows.iter().filter(|r| r.round == round).cloned().collect()
}

/// Build the ranked standings table.
///
/// `cutoff` limits both tips and results to rounds `<= cutoff`
/// (inclusive); `None` means the whole season. Ranking key: points
/// desc, margin desc, then username asc as the explicit deterministic
/// tie-break. Position is the 1-based rank after sorting.
pub fn standings(
    tips: &[CommittedTip],
    projections: &[ResultProjection],
    cutoff: Option<u32>,
    mode: CountingMode,
) -> Vec<StandingsRow> {
    let in_cutoff = |round: u32| cutoff.map_or(true, |max| round <= max);

    let scored = build_result_rows(tips, projections);

    struct Totals {
        username: String,
        points: u32,
        margin: i32,
        scored_count: u32,
        submitted_count: u32,
    }

    let mut by_user: HashMap<String, Totals> = HashMap::new();

    for row in scored.iter().filter(|r| in_cutoff(r.round)) {
        let entry = by_user
            .entry(row.email.to_lowercase())
            .or_insert_with(|| Totals {
                username: row.username.clone(),
                points: 0,
                margin: 0,
                scored_count: 0,
                submitted_count: 0,
            });
        entry.points += row.points;
        entry.margin += row.margin;
        entry.scored_count += 1;
    }

    for tip in tips.iter().filter(|t| in_cutoff(t.round)) {
        let entry = by_user
            .entry(tip.email.to_lowercase())
            .or_insert_with(|| Totals {
                username: tip.username.clone(),
                points: 0,
                margin: 0,
                scored_count: 0,
                submitted_count: 0,
            });
        entry.submitted_count += 1;
    }

    let mut rows: Vec<StandingsRow> = by_user
        .into_iter()
        .map(|(email, totals)| StandingsRow {
            email,
            username: totals.username,
            tips_count: match mode {
                CountingMode::ScoredOnly => totals.scored_count,
                CountingMode::AllSubmitted => totals.submitted_count,
            },
            total_points: totals.points,
            total_margin: totals.margin,
            position: 0,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then(b.total_margin.cmp(&a.total_margin))
            .then(a.username.cmp(&b.username))
    });

    for (index, row) in rows.iter_mut().enumerate() {
        row.position = index as u32 + 1;
    }

    rows
}
