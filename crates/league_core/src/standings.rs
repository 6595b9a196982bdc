//! Standings ranker.
//!
//! Pure, read-only computation of a ranked league table. Per-team figures
//! are rebuilt by replaying the season's completed matches rather than
//! trusting the cumulative `Team.stats` cache, which may be stale relative
//! to fair-play adjustments.
//!
//! Tie-break cascade, each stage only breaking ties the previous left:
//! points, goal difference, goals for, goals against, pairwise
//! head-to-head, fair-play points (lower is better), team name. The name
//! stage guarantees a total order; head-to-head is strictly a two-team
//! comparator and is never used to build a global ordering.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::applier::team_result;
use crate::config::EngineConfig;
use crate::models::{EventType, SeasonId, TeamId};
use crate::state::LeagueState;

/// Aggregated result of the matches played directly between two teams,
/// from one of the two perspectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeadToHead {
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl HeadToHead {
    pub fn goal_difference(&self) -> i32 {
        self.goals_for as i32 - self.goals_against as i32
    }
}

/// Per-team figures derived for ranking, replayed from completed matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnhancedStats {
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    /// Disciplinary score, lower is better: active fair-play records plus
    /// per-card charges from match events.
    pub fair_play_points: u32,
    pub head_to_head: HashMap<TeamId, HeadToHead>,
}

impl EnhancedStats {
    pub fn goal_difference(&self) -> i32 {
        self.goals_for as i32 - self.goals_against as i32
    }
}

/// One row of the computed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team: TeamId,
    pub name: String,
    /// 1-based position; no two rows share a rank.
    pub rank: u32,
    pub points: u32,
    pub goal_difference: i32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub fair_play_points: u32,
}

struct TableEntry {
    team: TeamId,
    name: String,
    stats: EnhancedStats,
}

/// Compute the ranked table for one season.
///
/// Side-effect free; operates on whatever snapshot of the store the caller
/// holds. Teams with zero completed matches rank with all-zero figures.
pub fn compute_standings(
    state: &LeagueState,
    config: &EngineConfig,
    season: SeasonId,
) -> Vec<StandingsRow> {
    let mut entries: Vec<TableEntry> = state
        .teams_in_season(season)
        .map(|team| TableEntry {
            team: team.id,
            name: team.name.clone(),
            stats: enhanced_stats(state, config, team.id, season),
        })
        .collect();

    // The head-to-head stage only applies when exactly two teams are tied
    // after the score-derived stages. Counting the tie groups up front keeps
    // the comparator a strict weak ordering even under cyclic direct
    // results among three or more teams.
    let mut tie_sizes: HashMap<TieKey, usize> = HashMap::new();
    for entry in &entries {
        *tie_sizes.entry(tie_key(entry)).or_insert(0) += 1;
    }

    entries.sort_by(|a, b| {
        compare_primary(a, b)
            .then_with(|| {
                if tie_sizes.get(&tie_key(a)) == Some(&2) {
                    compare_head_to_head(a, b)
                } else {
                    Ordering::Equal
                }
            })
            .then_with(|| a.stats.fair_play_points.cmp(&b.stats.fair_play_points))
            .then_with(|| a.name.cmp(&b.name))
    });

    entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| StandingsRow {
            team: entry.team,
            name: entry.name,
            rank: idx as u32 + 1,
            points: entry.stats.points,
            goal_difference: entry.stats.goal_difference(),
            goals_for: entry.stats.goals_for,
            goals_against: entry.stats.goals_against,
            fair_play_points: entry.stats.fair_play_points,
        })
        .collect()
}

/// Replay one team's completed season matches into ranking figures.
pub fn enhanced_stats(
    state: &LeagueState,
    config: &EngineConfig,
    team_id: TeamId,
    season: SeasonId,
) -> EnhancedStats {
    let mut stats = EnhancedStats::default();
    let mut wins = 0u32;
    let mut draws = 0u32;

    for m in state.completed_matches_in_season(season) {
        let Some(side) = m.side_of(team_id) else { continue };
        let Some((scored, conceded)) = team_result(m, team_id) else { continue };
        stats.goals_for += scored as u32;
        stats.goals_against += conceded as u32;

        let opponent = m.team_on(side.opposite());
        let h2h = stats.head_to_head.entry(opponent).or_default();
        h2h.goals_for += scored as u32;
        h2h.goals_against += conceded as u32;
        match scored.cmp(&conceded) {
            Ordering::Greater => {
                wins += 1;
                h2h.points += config.points_win;
            }
            Ordering::Equal => {
                draws += 1;
                h2h.points += config.points_draw;
            }
            Ordering::Less => {}
        }

        // Card charges count toward fair play from the raw event stream.
        for event in &m.events {
            if event.side != side {
                continue;
            }
            match event.event_type {
                EventType::YellowCard => {
                    stats.fair_play_points += config.yellow_card_fair_play_points
                }
                EventType::RedCard => stats.fair_play_points += config.red_card_fair_play_points,
                _ => {}
            }
        }
    }

    stats.points = config.points_win * wins + config.points_draw * draws;
    stats.fair_play_points += state
        .fair_play_for_team(team_id)
        .map(|r| r.counted_points())
        .sum::<u32>();
    stats
}

/// Everything the score-derived stages see, used both for comparison and
/// for sizing tie groups.
type TieKey = (u32, i32, u32, u32);

fn tie_key(entry: &TableEntry) -> TieKey {
    (
        entry.stats.points,
        entry.stats.goal_difference(),
        entry.stats.goals_for,
        entry.stats.goals_against,
    )
}

/// Stages 1-4: points and goal-difference descending, goals for descending,
/// goals against ascending.
fn compare_primary(a: &TableEntry, b: &TableEntry) -> Ordering {
    b.stats
        .points
        .cmp(&a.stats.points)
        .then_with(|| b.stats.goal_difference().cmp(&a.stats.goal_difference()))
        .then_with(|| b.stats.goals_for.cmp(&a.stats.goals_for))
        .then_with(|| a.stats.goals_against.cmp(&b.stats.goals_against))
}

/// Pairwise head-to-head stage. Applies only when the two teams have a
/// direct result; otherwise leaves the tie for the later stages.
fn compare_head_to_head(a: &TableEntry, b: &TableEntry) -> Ordering {
    let (Some(a_vs_b), Some(b_vs_a)) =
        (a.stats.head_to_head.get(&b.team), b.stats.head_to_head.get(&a.team))
    else {
        return Ordering::Equal;
    };
    b_vs_a
        .points
        .cmp(&a_vs_b.points)
        .then_with(|| b_vs_a.goal_difference().cmp(&a_vs_b.goal_difference()))
}
