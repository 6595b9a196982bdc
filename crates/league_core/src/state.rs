//! In-memory league record store.
//!
//! `LeagueState` holds the explicit records the engine operates over. How
//! these records are persisted or served is a collaborator concern; the
//! engine only requires that an operation runs against an internally
//! consistent snapshot of this store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::models::{
    FairPlayRecord, Match, MatchId, MatchStatus, Player, PlayerId, RecordId, SeasonId, Team, TeamId,
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LeagueState {
    pub teams: HashMap<TeamId, Team>,
    pub players: HashMap<PlayerId, Player>,
    pub matches: HashMap<MatchId, Match>,
    pub fair_play: HashMap<RecordId, FairPlayRecord>,
}

impl LeagueState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_team(&mut self, team: Team) -> TeamId {
        let id = team.id;
        self.teams.insert(id, team);
        id
    }

    pub fn insert_player(&mut self, player: Player) -> PlayerId {
        let id = player.id;
        self.players.insert(id, player);
        id
    }

    pub fn insert_match(&mut self, m: Match) -> MatchId {
        let id = m.id;
        self.matches.insert(id, m);
        id
    }

    pub fn insert_fair_play(&mut self, record: FairPlayRecord) -> RecordId {
        let id = record.id;
        self.fair_play.insert(id, record);
        id
    }

    pub fn expect_match(&self, id: MatchId) -> Result<&Match> {
        self.matches
            .get(&id)
            .ok_or(EngineError::NotFound { kind: "match", id: id.to_string() })
    }

    pub fn expect_match_mut(&mut self, id: MatchId) -> Result<&mut Match> {
        self.matches
            .get_mut(&id)
            .ok_or(EngineError::NotFound { kind: "match", id: id.to_string() })
    }

    pub fn expect_team(&self, id: TeamId) -> Result<&Team> {
        self.teams
            .get(&id)
            .ok_or(EngineError::NotFound { kind: "team", id: id.to_string() })
    }

    pub fn expect_team_mut(&mut self, id: TeamId) -> Result<&mut Team> {
        self.teams
            .get_mut(&id)
            .ok_or(EngineError::NotFound { kind: "team", id: id.to_string() })
    }

    /// Compare-and-swap check on the match version guard. A mismatch means
    /// the record changed under the caller; the whole operation must be
    /// retried against a fresh read.
    pub fn guard_match_version(&self, id: MatchId, expected: u64) -> Result<()> {
        let found = self.expect_match(id)?.version;
        if found != expected {
            return Err(EngineError::Conflict { id: id.to_string(), expected, found });
        }
        Ok(())
    }

    /// Move a match to `next`, enforcing the lifecycle.
    ///
    /// Resetting a completed match back to scheduled additionally requires
    /// that its statistics have been reverted first; the status change never
    /// implies the revert.
    pub fn transition_match(&mut self, id: MatchId, next: MatchStatus) -> Result<()> {
        let m = self.expect_match_mut(id)?;
        if !m.status.can_transition_to(next) {
            return Err(EngineError::Precondition(format!(
                "illegal match transition {:?} → {:?} for {}",
                m.status, next, id
            )));
        }
        if m.status == MatchStatus::Completed && next == MatchStatus::Scheduled && m.stats_updated {
            return Err(EngineError::Precondition(format!(
                "match {} must have its statistics reverted before reset to scheduled",
                id
            )));
        }
        m.status = next;
        m.version += 1;
        Ok(())
    }

    /// Completed matches whose deltas are currently in the cumulative
    /// statistics for `team` in `season`.
    pub fn applied_matches_for_team(
        &self,
        team: TeamId,
        season: SeasonId,
    ) -> impl Iterator<Item = &Match> {
        self.matches.values().filter(move |m| {
            m.season == season && m.involves(team) && m.is_completed() && m.stats_updated
        })
    }

    /// All completed matches of a season, the standings ranker's input.
    pub fn completed_matches_in_season(&self, season: SeasonId) -> impl Iterator<Item = &Match> {
        self.matches
            .values()
            .filter(move |m| m.season == season && m.is_completed())
    }

    pub fn teams_in_season(&self, season: SeasonId) -> impl Iterator<Item = &Team> {
        self.teams.values().filter(move |t| t.season == season)
    }

    pub fn fair_play_for_team(&self, team: TeamId) -> impl Iterator<Item = &FairPlayRecord> {
        self.fair_play.values().filter(move |r| r.team == team)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn seeded() -> (LeagueState, MatchId) {
        let mut state = LeagueState::new();
        let season = SeasonId::new();
        let home = state.insert_team(Team::new("Alpha", season));
        let away = state.insert_team(Team::new("Omega", season));
        let match_id = state.insert_match(Match::new(season, home, away, Utc::now()));
        (state, match_id)
    }

    #[test]
    fn missing_match_is_not_found() {
        let state = LeagueState::new();
        let err = state.expect_match(MatchId::new()).unwrap_err();
        assert!(matches!(err, EngineError::NotFound { kind: "match", .. }));
    }

    #[test]
    fn transition_bumps_version() {
        let (mut state, match_id) = seeded();
        state.transition_match(match_id, MatchStatus::Live).unwrap();
        state.transition_match(match_id, MatchStatus::Completed).unwrap();
        assert_eq!(state.expect_match(match_id).unwrap().version, 2);
    }

    #[test]
    fn illegal_transition_is_a_precondition_error() {
        let (mut state, match_id) = seeded();
        let err = state.transition_match(match_id, MatchStatus::Scheduled).unwrap_err();
        assert!(matches!(err, EngineError::Precondition(_)));
    }

    #[test]
    fn reset_requires_reverted_stats() {
        let (mut state, match_id) = seeded();
        state.transition_match(match_id, MatchStatus::Completed).unwrap();
        state.expect_match_mut(match_id).unwrap().stats_updated = true;

        let err = state.transition_match(match_id, MatchStatus::Scheduled).unwrap_err();
        assert!(matches!(err, EngineError::Precondition(_)));

        state.expect_match_mut(match_id).unwrap().stats_updated = false;
        state.transition_match(match_id, MatchStatus::Scheduled).unwrap();
    }

    #[test]
    fn stale_version_guard_conflicts() {
        let (mut state, match_id) = seeded();
        state.guard_match_version(match_id, 0).unwrap();
        state.transition_match(match_id, MatchStatus::Live).unwrap();
        let err = state.guard_match_version(match_id, 0).unwrap_err();
        assert!(err.is_retryable());
    }
}
