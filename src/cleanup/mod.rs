//! Duplicate tip detection and resolution.
//!
//! The tip write path has no uniqueness constraint, so two tips for
//! the same (user, round) can land in the store. This pass detects the
//! groups, keeps the latest tip, and deletes earlier copies of the
//! same selection in small bounded batches. It always reports before
//! it deletes.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::EngineError;
use crate::models::{CommittedTip, Fixture};
use crate::storage::SeasonStore;

/// Multiple committed tips for one (user, round).
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    pub email: String,
    pub round: u32,

    /// The group's tips, earliest first.
    pub tips: Vec<CommittedTip>,
}

impl DuplicateGroup {
    /// The tip retained by resolution policy: latest `committed_at`.
    /// Groups are built non-empty and sorted ascending.
    pub fn retained(&self) -> Option<&CommittedTip> {
        self.tips.last()
    }
}

/// A tip committed after its fixture kicked off.
///
/// Informational integrity warning; late tips are never auto-deleted.
#[derive(Debug, Clone, Serialize)]
pub struct LateTipWarning {
    pub tip: CommittedTip,
    pub kickoff: DateTime<Utc>,
}

/// Everything an administrator needs before deciding to delete.
#[derive(Debug, Clone, Serialize)]
pub struct CleanupReport {
    /// (user, round) groups holding more than one tip.
    pub duplicate_groups: Vec<DuplicateGroup>,

    /// Tips safe to delete: earlier copies of a retained selection.
    pub deletion_candidates: Vec<CommittedTip>,

    /// Tips committed after their fixture's kickoff.
    pub late_tips: Vec<LateTipWarning>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.duplicate_groups.is_empty() && self.late_tips.is_empty()
    }
}

/// Find all (user, round) groups with more than one tip.
///
/// Output is deterministic: groups ordered by (email, round), tips
/// within a group by `committed_at` ascending.
pub fn find_duplicate_groups(tips: &[CommittedTip]) -> Vec<DuplicateGroup> {
    let mut by_user_round: HashMap<(String, u32), Vec<CommittedTip>> = HashMap::new();

    for tip in tips {
        by_user_round
            .entry((tip.email.to_lowercase(), tip.round))
            .or_default()
            .push(tip.clone());
    }

    let mut groups: Vec<DuplicateGroup> = by_user_round
        .into_iter()
        .filter(|(_, group)| group.len() > 1)
        .map(|((email, round), mut group)| {
            group.sort_by_key(|t| t.committed_at);
            DuplicateGroup {
                email,
                round,
                tips: group,
            }
        })
        .collect();

    groups.sort_by(|a, b| a.email.cmp(&b.email).then(a.round.cmp(&b.round)));
    groups
}

/// Tips that are earlier copies of another tip with the same
/// (user, season, round, team, opponent) tuple. The latest copy is
/// retained; everything before it is a deletion candidate.
pub fn deletion_candidates(tips: &[CommittedTip]) -> Vec<CommittedTip> {
    let mut by_tuple: HashMap<(String, u32, u32, String, String), Vec<CommittedTip>> =
        HashMap::new();

    for tip in tips {
        by_tuple.entry(tip.dedup_key()).or_default().push(tip.clone());
    }

    let mut candidates: Vec<CommittedTip> = by_tuple
        .into_values()
        .filter(|group| group.len() > 1)
        .flat_map(|mut group| {
            group.sort_by_key(|t| t.committed_at);
            group.pop(); // keep the latest
            group
        })
        .collect();

    candidates.sort_by(|a, b| {
        a.email
            .to_lowercase()
            .cmp(&b.email.to_lowercase())
            .then(a.round.cmp(&b.round))
            .then(a.committed_at.cmp(&b.committed_at))
    });
    candidates
}

/// Tips committed after their fixture's kickoff.
pub fn late_tip_warnings(tips: &[CommittedTip], fixtures: &[Fixture]) -> Vec<LateTipWarning> {
    tips.iter()
        .filter_map(|tip| {
            let fixture = fixtures.iter().find(|f| {
                f.season == tip.season && f.round == tip.round && f.involves(&tip.team)
            })?;

            if tip.committed_at > fixture.kickoff {
                Some(LateTipWarning {
                    tip: tip.clone(),
                    kickoff: fixture.kickoff,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Build the full dry-run report for a tip set.
pub fn build_report(tips: &[CommittedTip], fixtures: &[Fixture]) -> CleanupReport {
    let report = CleanupReport {
        duplicate_groups: find_duplicate_groups(tips),
        deletion_candidates: deletion_candidates(tips),
        late_tips: late_tip_warnings(tips, fixtures),
    };

    if !report.is_clean() {
        warn!(
            groups = report.duplicate_groups.len(),
            candidates = report.deletion_candidates.len(),
            late = report.late_tips.len(),
            "Tip store integrity issues found"
        );
    }

    report
}

/// Delete up to `batch_size` candidates from the store.
///
/// Processes a bounded batch so one bad deletion against the backing
/// store can't cascade. A candidate missing at delete time is an
/// `UnresolvedDuplicateDeletion`. Returns the tips actually deleted.
pub fn apply_deletions(
    store: &SeasonStore,
    candidates: &[CommittedTip],
    batch_size: usize,
) -> Result<Vec<CommittedTip>, EngineError> {
    let mut deleted = Vec::new();

    for candidate in candidates.iter().take(batch_size) {
        if !store.delete_tip(candidate)? {
            return Err(EngineError::UnresolvedDuplicateDeletion {
                email: candidate.email.clone(),
                round: candidate.round,
                team: candidate.team.clone(),
            });
        }
        deleted.push(candidate.clone());
    }

    info!(deleted = deleted.len(), "Cleanup batch applied");
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageConfig;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 10, minute, 0).unwrap()
    }

    fn tip(email: &str, round: u32, team: &str, committed_at: DateTime<Utc>) -> CommittedTip {
        CommittedTip {
            email: email.to_string(),
            username: "Tester".to_string(),
            season: 2026,
            round,
            team: team.to_string(),
            opponent: "Roosters".to_string(),
            is_home: true,
            committed_at,
        }
    }

    #[test]
    fn test_no_duplicates_in_clean_set() {
        let tips = vec![
            tip("a@example.com", 1, "Broncos", at(0)),
            tip("a@example.com", 2, "Storm", at(1)),
            tip("b@example.com", 1, "Sharks", at(2)),
        ];

        assert!(find_duplicate_groups(&tips).is_empty());
        assert!(deletion_candidates(&tips).is_empty());
    }

    #[test]
    fn test_duplicate_group_detected_and_sorted() {
        let tips = vec![
            tip("a@example.com", 1, "Broncos", at(5)),
            tip("a@example.com", 1, "Broncos", at(0)),
        ];

        let groups = find_duplicate_groups(&tips);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].tips[0].committed_at, at(0));
        assert_eq!(groups[0].retained().unwrap().committed_at, at(5));
    }

    #[test]
    fn test_duplicate_grouping_ignores_email_case() {
        let tips = vec![
            tip("A@Example.com", 1, "Broncos", at(0)),
            tip("a@example.com", 1, "Broncos", at(5)),
        ];

        assert_eq!(find_duplicate_groups(&tips).len(), 1);
    }

    #[test]
    fn test_candidates_keep_latest_copy() {
        let tips = vec![
            tip("a@example.com", 1, "Broncos", at(0)),
            tip("a@example.com", 1, "Broncos", at(5)),
            tip("a@example.com", 1, "Broncos", at(9)),
        ];

        let candidates = deletion_candidates(&tips);
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.committed_at < at(9)));
    }

    #[test]
    fn test_conflicting_teams_flagged_but_not_candidates() {
        // Same user tipped two different teams in one round. That's a
        // duplicate group to review, but neither copy shares the
        // retained tip's selection tuple, so nothing is auto-deletable.
        let tips = vec![
            tip("a@example.com", 1, "Broncos", at(0)),
            tip("a@example.com", 1, "Storm", at(5)),
        ];

        assert_eq!(find_duplicate_groups(&tips).len(), 1);
        assert!(deletion_candidates(&tips).is_empty());
    }

    #[test]
    fn test_idempotent_after_resolution() {
        let tips = vec![
            tip("a@example.com", 1, "Broncos", at(0)),
            tip("a@example.com", 1, "Broncos", at(5)),
        ];

        let candidates = deletion_candidates(&tips);
        assert_eq!(candidates.len(), 1);

        // Remove the candidates as the store would, then re-run.
        let cleaned: Vec<CommittedTip> = tips
            .into_iter()
            .filter(|t| !candidates.contains(t))
            .collect();

        assert!(deletion_candidates(&cleaned).is_empty());
        assert!(find_duplicate_groups(&cleaned).is_empty());
    }

    #[test]
    fn test_late_tip_flagged() {
        let kickoff = at(30);
        let fixtures = vec![Fixture::new(
            2026,
            1,
            kickoff,
            "Broncos",
            "Roosters",
            "Suncorp Stadium",
        )];

        let tips = vec![
            tip("a@example.com", 1, "Broncos", at(40)),
            tip("b@example.com", 1, "Roosters", at(10)),
        ];

        let warnings = late_tip_warnings(&tips, &fixtures);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].tip.email, "a@example.com");
        assert_eq!(warnings[0].kickoff, kickoff);
    }

    #[test]
    fn test_late_tip_matches_away_side() {
        let fixtures = vec![Fixture::new(
            2026,
            1,
            at(30),
            "Broncos",
            "Roosters",
            "Suncorp Stadium",
        )];

        let mut away = tip("a@example.com", 1, "Roosters", at(45));
        away.is_home = false;
        away.opponent = "Broncos".to_string();

        assert_eq!(late_tip_warnings(&[away], &fixtures).len(), 1);
    }

    #[test]
    fn test_report_clean() {
        let report = build_report(&[tip("a@example.com", 1, "Broncos", at(0))], &[]);
        assert!(report.is_clean());
        assert!(report.deletion_candidates.is_empty());
    }

    #[test]
    fn test_apply_deletions_bounded_batch() {
        let dir = TempDir::new().unwrap();
        let store = SeasonStore::new(StorageConfig::new(dir.path().to_path_buf()), 2026);

        for minute in [0, 5, 9] {
            store
                .append_tip(&tip("a@example.com", 1, "Broncos", at(minute)))
                .unwrap();
        }

        let candidates = deletion_candidates(&store.load_tips().unwrap());
        assert_eq!(candidates.len(), 2);

        // Conservative single-item batch.
        let deleted = apply_deletions(&store, &candidates, 1).unwrap();
        assert_eq!(deleted.len(), 1);
        assert_eq!(store.load_tips().unwrap().len(), 2);

        // Second run finishes the job; a third finds nothing.
        let candidates = deletion_candidates(&store.load_tips().unwrap());
        assert_eq!(candidates.len(), 1);
        apply_deletions(&store, &candidates, 10).unwrap();

        let remaining = store.load_tips().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].committed_at, at(9));
        assert!(deletion_candidates(&remaining).is_empty());
    }

    #[test]
    fn test_apply_deletions_missing_candidate_errors() {
        let dir = TempDir::new().unwrap();
        let store = SeasonStore::new(StorageConfig::new(dir.path().to_path_buf()), 2026);

        store
            .append_tip(&tip("a@example.com", 1, "Broncos", at(0)))
            .unwrap();

        // Candidate computed from a stale snapshot no longer in store.
        let stale = tip("a@example.com", 1, "Broncos", at(50));
        let result = apply_deletions(&store, &[stale], 1);

        assert!(matches!(
            result,
            Err(EngineError::UnresolvedDuplicateDeletion { .. })
        ));
    }
}
