use serde::{Deserialize, Serialize};

use super::ids::{SeasonId, TeamId};
use crate::config::EngineConfig;

/// Cumulative table statistics for one team in one season.
///
/// These counters are a cache over the team's completed matches: they are
/// written only by the match result applier and can always be rebuilt from
/// source via `recompute_team_stats`. Goal difference is deliberately not a
/// field; it is derived on read so it can never drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TeamStats {
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl TeamStats {
    pub fn goal_difference(&self) -> i32 {
        self.goals_for as i32 - self.goals_against as i32
    }

    /// Fold one completed match result into the counters.
    pub fn record_result(&mut self, scored: u8, conceded: u8, config: &EngineConfig) {
        self.matches_played += 1;
        self.goals_for += scored as u32;
        self.goals_against += conceded as u32;
        if scored > conceded {
            self.wins += 1;
        } else if scored == conceded {
            self.draws += 1;
        } else {
            self.losses += 1;
        }
        self.points = config.points_win * self.wins + config.points_draw * self.draws;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub season: SeasonId,
    pub stats: TeamStats,
}

impl Team {
    pub fn new(name: impl Into<String>, season: SeasonId) -> Self {
        Self { id: TeamId::new(), name: name.into(), season, stats: TeamStats::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_result_classifies_win_draw_loss() {
        let config = EngineConfig::default();
        let mut stats = TeamStats::default();
        stats.record_result(3, 1, &config);
        stats.record_result(2, 2, &config);
        stats.record_result(0, 1, &config);

        assert_eq!(stats.matches_played, 3);
        assert_eq!((stats.wins, stats.draws, stats.losses), (1, 1, 1));
        assert_eq!(stats.goals_for, 5);
        assert_eq!(stats.goals_against, 4);
        assert_eq!(stats.points, 4);
        assert_eq!(stats.goal_difference(), 1);
    }

    #[test]
    fn points_follow_configured_scheme() {
        let config = EngineConfig { points_win: 2, points_draw: 1, ..EngineConfig::default() };
        let mut stats = TeamStats::default();
        stats.record_result(1, 0, &config);
        stats.record_result(1, 1, &config);
        assert_eq!(stats.points, 3);
    }
}
