use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::{MatchEvent, MatchSide};
use super::ids::{MatchId, SeasonId, TeamId};
use super::player::MatchOutcome;

/// Lifecycle of a match record.
///
/// `scheduled → live → completed` is the normal path; postponement and
/// cancellation are only reachable from `scheduled`. A completed match may
/// be reset back to `scheduled` by an editing workflow, which must first
/// revert its applied statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Completed,
    Postponed,
    Cancelled,
}

impl MatchStatus {
    pub fn can_transition_to(self, next: MatchStatus) -> bool {
        use MatchStatus::*;
        matches!(
            (self, next),
            (Scheduled, Live)
                | (Scheduled, Completed)
                | (Scheduled, Postponed)
                | (Scheduled, Cancelled)
                | (Live, Completed)
                | (Completed, Scheduled)
                | (Postponed, Scheduled)
        )
    }
}

/// Live-control substate, maintained by the live console while a match runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LiveState {
    pub is_live: bool,
    pub current_minute: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

/// One fixture between two teams of a season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub season: SeasonId,
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub kickoff: DateTime<Utc>,
    pub status: MatchStatus,
    pub home_score: u8,
    pub away_score: u8,
    pub events: Vec<MatchEvent>,
    /// Idempotency guard: true exactly while this match's deltas are present
    /// in the cumulative team/player statistics.
    pub stats_updated: bool,
    /// Optimistic-concurrency version, bumped on every write to this record.
    pub version: u64,
    pub live: LiveState,
}

impl Match {
    pub fn new(season: SeasonId, home_team: TeamId, away_team: TeamId, kickoff: DateTime<Utc>) -> Self {
        Self {
            id: MatchId::new(),
            season,
            home_team,
            away_team,
            kickoff,
            status: MatchStatus::Scheduled,
            home_score: 0,
            away_score: 0,
            events: Vec::new(),
            stats_updated: false,
            version: 0,
            live: LiveState::default(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn team_on(&self, side: MatchSide) -> TeamId {
        match side {
            MatchSide::Home => self.home_team,
            MatchSide::Away => self.away_team,
        }
    }

    pub fn score_for(&self, side: MatchSide) -> (u8, u8) {
        match side {
            MatchSide::Home => (self.home_score, self.away_score),
            MatchSide::Away => (self.away_score, self.home_score),
        }
    }

    /// The result from the perspective of one side.
    pub fn outcome_for(&self, side: MatchSide) -> MatchOutcome {
        let (scored, conceded) = self.score_for(side);
        if scored > conceded {
            MatchOutcome::Win
        } else if scored == conceded {
            MatchOutcome::Draw
        } else {
            MatchOutcome::Loss
        }
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.home_team == team || self.away_team == team
    }

    pub fn side_of(&self, team: TeamId) -> Option<MatchSide> {
        if self.home_team == team {
            Some(MatchSide::Home)
        } else if self.away_team == team {
            Some(MatchSide::Away)
        } else {
            None
        }
    }
}
