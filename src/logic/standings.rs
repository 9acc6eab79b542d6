//! Standings: ranking with deterministic tie-breaks, qualification cutoff,
//! and full stats recomputation from finished fixtures.

use crate::models::{Fixture, FixtureStatus, LeagueError, Player, PlayerStats};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One row of the computed standings table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    pub username: String,
    pub team: String,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_diff: i64,
    pub points: u32,
}

impl RankedRow {
    fn from_player(p: &Player) -> Self {
        let s = p.stats;
        Self {
            username: p.username.clone(),
            team: p.team.clone(),
            wins: s.wins,
            draws: s.draws,
            losses: s.losses,
            goals_for: s.goals_for,
            goals_against: s.goals_against,
            goal_diff: s.goals_for as i64 - s.goals_against as i64,
            points: 3 * s.wins + s.draws,
        }
    }
}

/// Compute the full standings, best first.
///
/// Order: points desc, goal difference desc, goals for desc, then username
/// ascending. The username tie-break makes the order total: no two distinct
/// players ever compare equal.
pub fn compute_ranking(players: &[Player]) -> Vec<RankedRow> {
    let mut rows: Vec<RankedRow> = players.iter().map(RankedRow::from_player).collect();
    rows.sort_by(compare_rows);
    rows
}

fn compare_rows(a: &RankedRow, b: &RankedRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(b.goal_diff.cmp(&a.goal_diff))
        .then(b.goals_for.cmp(&a.goals_for))
        .then(a.username.cmp(&b.username))
}

/// How many ranked players qualify for the playoffs: 8, else 4, else 2.
/// Fewer than 2 ranked players cannot form a bracket.
pub fn qualifier_count(ranked_len: usize) -> Result<usize, LeagueError> {
    match ranked_len {
        0 | 1 => Err(LeagueError::NotEnoughQualifiers),
        2..=3 => Ok(2),
        4..=7 => Ok(4),
        _ => Ok(8),
    }
}

/// Rebuild every player's stats from scratch by folding over all finished
/// fixtures. Not incremental, so edits or deletions of historical results
/// stay consistent, and running it twice on the same fixture set yields
/// identical stats.
///
/// Fixtures naming a player not in `players` contribute nothing for that
/// side (stats are only tracked for current signups).
pub fn recompute_stats(
    players: &[Player],
    fixtures: &[Fixture],
) -> BTreeMap<String, PlayerStats> {
    let mut stats: BTreeMap<String, PlayerStats> = players
        .iter()
        .map(|p| (p.username.clone(), PlayerStats::zeroed()))
        .collect();

    for fixture in fixtures {
        if fixture.status != FixtureStatus::Finished {
            continue;
        }
        let (home_score, away_score) = match (fixture.home_score, fixture.away_score) {
            (Some(h), Some(a)) => (h, a),
            _ => continue,
        };

        if let Some(s) = stats.get_mut(&fixture.home) {
            apply_side(s, home_score, away_score);
        }
        if let Some(s) = stats.get_mut(&fixture.away) {
            apply_side(s, away_score, home_score);
        }
    }

    stats
}

/// Accumulate one finished fixture into one side's stats.
fn apply_side(stats: &mut PlayerStats, scored: u32, conceded: u32) {
    stats.goals_for += scored;
    stats.goals_against += conceded;
    stats.games_played += 1;
    match scored.cmp(&conceded) {
        Ordering::Greater => stats.wins += 1,
        Ordering::Less => stats.losses += 1,
        Ordering::Equal => stats.draws += 1,
    }
}
