//! Match result applier.
//!
//! Folds a completed match's score and events into the cumulative team and
//! player statistics exactly once, and undoes that application when a match
//! is edited or reset. The `stats_updated` guard on the match record is the
//! idempotency contract: true exactly while the match's deltas are present
//! in the cumulative counters.
//!
//! Team counters are a cache over completed matches. Reverting therefore
//! rebuilds them from source rather than subtracting the old deltas;
//! subtraction accumulates errors across repeated edit cycles, a rebuild
//! cannot.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::models::{
    EventType, Match, MatchHistoryEntry, MatchId, MatchSide, PlayerId, SeasonId, TeamId, TeamStats,
};
use crate::state::LeagueState;

/// A player-level contribution that could not be credited because the
/// referenced player no longer exists. The rest of the match still applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEvent {
    pub player: PlayerId,
    pub event_type: EventType,
    pub minute: u8,
}

/// What `apply_match_result` did, for operator visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub match_id: MatchId,
    pub players_credited: usize,
    /// Event contributions skipped over dangling player references.
    pub skipped: Vec<SkippedEvent>,
    /// Involved teams whose record no longer exists; their table deltas
    /// were skipped.
    pub missing_teams: Vec<TeamId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevertReport {
    pub match_id: MatchId,
    pub players_reverted: usize,
}

/// Outcome of a full team rebuild from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftReport {
    pub team: TeamId,
    pub stored: TeamStats,
    pub rebuilt: TeamStats,
}

impl DriftReport {
    pub fn drifted(&self) -> bool {
        self.stored != self.rebuilt
    }
}

/// Per-player tally of one match's events, grouped before crediting so a
/// player with several events still receives exactly one appearance.
#[derive(Debug, Clone, Copy)]
struct PlayerTally {
    side: MatchSide,
    goals: u32,
    own_goals: u32,
    assists: u32,
    yellow_cards: u32,
    red_cards: u32,
}

impl PlayerTally {
    fn new(side: MatchSide) -> Self {
        Self { side, goals: 0, own_goals: 0, assists: 0, yellow_cards: 0, red_cards: 0 }
    }

    fn add(&mut self, event_type: EventType) {
        match event_type {
            EventType::Goal => self.goals += 1,
            EventType::OwnGoal => self.own_goals += 1,
            EventType::Assist => self.assists += 1,
            EventType::YellowCard => self.yellow_cards += 1,
            EventType::RedCard => self.red_cards += 1,
        }
    }
}

/// Apply a completed match's deltas to team and player statistics.
///
/// Preconditions: the match exists, `status == Completed`, and
/// `stats_updated == false`. Violating either is a programming error and
/// surfaces as `EngineError::Precondition`; use [`apply_if_pending`] for the
/// idempotent re-save workflows.
///
/// Dangling references inside the match are tolerated: an event pointing at
/// a deleted player is skipped and reported, a deleted team loses only its
/// own table delta. Scoring a completed match is never blocked by stale
/// registration data.
pub fn apply_match_result(
    state: &mut LeagueState,
    config: &EngineConfig,
    match_id: MatchId,
) -> Result<ApplyReport> {
    let m = state.expect_match(match_id)?;
    if !m.is_completed() {
        return Err(EngineError::Precondition(format!(
            "cannot apply statistics for match {} in status {:?}",
            match_id, m.status
        )));
    }
    if m.stats_updated {
        return Err(EngineError::Precondition(format!(
            "statistics already applied for match {}",
            match_id
        )));
    }
    let snapshot = m.clone();

    let mut report = ApplyReport {
        match_id,
        players_credited: 0,
        skipped: Vec::new(),
        missing_teams: Vec::new(),
    };

    // Team table deltas from the final score.
    for side in [MatchSide::Home, MatchSide::Away] {
        let team_id = snapshot.team_on(side);
        let (scored, conceded) = snapshot.score_for(side);
        match state.teams.get_mut(&team_id) {
            Some(team) => team.stats.record_result(scored, conceded, config),
            None => {
                warn!(%team_id, %match_id, "team record missing, skipping table delta");
                report.missing_teams.push(team_id);
            }
        }
    }

    // Group events by player. BTreeMap keeps crediting order deterministic.
    let mut tallies: BTreeMap<PlayerId, PlayerTally> = BTreeMap::new();
    for event in &snapshot.events {
        let Some(player_id) = event.player else { continue };
        if !state.players.contains_key(&player_id) {
            warn!(%player_id, %match_id, minute = event.minute,
                "player record missing, skipping event contribution");
            report.skipped.push(SkippedEvent {
                player: player_id,
                event_type: event.event_type,
                minute: event.minute,
            });
            continue;
        }
        tallies
            .entry(player_id)
            .or_insert_with(|| PlayerTally::new(event.side))
            .add(event.event_type);
    }

    // One appearance and one history entry per involved player, regardless
    // of how many events the player produced.
    for (player_id, tally) in tallies {
        let Some(player) = state.players.get_mut(&player_id) else { continue };
        if player.history_entry(match_id).is_some() {
            warn!(%player_id, %match_id, "history entry already present, not crediting twice");
            continue;
        }
        player.apply_entry(MatchHistoryEntry {
            match_id,
            season: snapshot.season,
            opponent: snapshot.team_on(tally.side.opposite()),
            goals: tally.goals,
            own_goals: tally.own_goals,
            assists: tally.assists,
            yellow_cards: tally.yellow_cards,
            red_cards: tally.red_cards,
            minutes_played: config.match_duration_minutes as u32,
            outcome: snapshot.outcome_for(tally.side),
        });
        report.players_credited += 1;
    }

    let m = state.expect_match_mut(match_id)?;
    m.stats_updated = true;
    m.version += 1;
    debug!(%match_id, players = report.players_credited, skipped = report.skipped.len(),
        "match statistics applied");
    Ok(report)
}

/// Idempotent form of [`apply_match_result`] for re-save workflows: a match
/// whose statistics are already applied is a no-op, not an error.
pub fn apply_if_pending(
    state: &mut LeagueState,
    config: &EngineConfig,
    match_id: MatchId,
) -> Result<Option<ApplyReport>> {
    if state.expect_match(match_id)?.stats_updated {
        return Ok(None);
    }
    apply_match_result(state, config, match_id).map(Some)
}

/// [`apply_match_result`] under optimistic concurrency control: fails with a
/// retryable `Conflict` when the match record changed since the caller read
/// `expected_version`. Two racing completions of the same match serialize
/// here; the loser re-reads and retries the whole operation.
pub fn apply_match_result_guarded(
    state: &mut LeagueState,
    config: &EngineConfig,
    match_id: MatchId,
    expected_version: u64,
) -> Result<ApplyReport> {
    state.guard_match_version(match_id, expected_version)?;
    apply_match_result(state, config, match_id)
}

/// Undo a previously applied match, used when a completed match is reset to
/// scheduled or deleted.
///
/// Player statistics are withdrawn entry by entry (floored at zero); team
/// statistics are rebuilt from all other applied matches rather than
/// subtracted, per the module-level design rule.
pub fn revert_match_result(
    state: &mut LeagueState,
    config: &EngineConfig,
    match_id: MatchId,
) -> Result<RevertReport> {
    let m = state.expect_match(match_id)?;
    if !m.stats_updated {
        return Err(EngineError::Precondition(format!(
            "statistics were never applied for match {}",
            match_id
        )));
    }
    let home = m.home_team;
    let away = m.away_team;
    let season = m.season;

    let player_ids: Vec<PlayerId> = state
        .players
        .values()
        .filter(|p| p.history_entry(match_id).is_some())
        .map(|p| p.id)
        .collect();
    let mut players_reverted = 0;
    for player_id in player_ids {
        if let Some(player) = state.players.get_mut(&player_id) {
            if player.revert_entry(match_id).is_some() {
                players_reverted += 1;
            }
        }
    }

    // Clear the guard first so the rebuild below excludes this match.
    let m = state.expect_match_mut(match_id)?;
    m.stats_updated = false;
    m.version += 1;

    for team_id in [home, away] {
        if state.teams.contains_key(&team_id) {
            let rebuilt = rebuild_team_stats(state, config, team_id, season);
            state.expect_team_mut(team_id)?.stats = rebuilt;
        } else {
            warn!(%team_id, %match_id, "team record missing, skipping table rebuild");
        }
    }

    debug!(%match_id, players_reverted, "match statistics reverted");
    Ok(RevertReport { match_id, players_reverted })
}

/// Guarded form of [`revert_match_result`], see [`apply_match_result_guarded`].
pub fn revert_match_result_guarded(
    state: &mut LeagueState,
    config: &EngineConfig,
    match_id: MatchId,
    expected_version: u64,
) -> Result<RevertReport> {
    state.guard_match_version(match_id, expected_version)?;
    revert_match_result(state, config, match_id)
}

fn rebuild_team_stats(
    state: &LeagueState,
    config: &EngineConfig,
    team_id: TeamId,
    season: SeasonId,
) -> TeamStats {
    let mut stats = TeamStats::default();
    for m in state.applied_matches_for_team(team_id, season) {
        if let Some(side) = m.side_of(team_id) {
            let (scored, conceded) = m.score_for(side);
            stats.record_result(scored, conceded, config);
        }
    }
    stats
}

/// Full rebuild of one team's cumulative statistics from its applied
/// matches, the first-class drift repair operation.
///
/// Detected drift is logged for operator attention and the rebuilt values
/// are persisted as authoritative; drift is never fatal.
pub fn recompute_team_stats(
    state: &mut LeagueState,
    config: &EngineConfig,
    team_id: TeamId,
    season: SeasonId,
) -> Result<DriftReport> {
    let stored = state.expect_team(team_id)?.stats;
    let rebuilt = rebuild_team_stats(state, config, team_id, season);
    if stored != rebuilt {
        warn!(%team_id, ?stored, ?rebuilt, "team statistics drift detected, rebuilt values win");
    }
    state.expect_team_mut(team_id)?.stats = rebuilt;
    Ok(DriftReport { team: team_id, stored, rebuilt })
}

/// Player-side counterpart of [`recompute_team_stats`]: rebuild one player's
/// career and season buckets from the match-history detail list. Returns
/// whether drift was repaired.
pub fn rebuild_player_stats(state: &mut LeagueState, player_id: PlayerId) -> Result<bool> {
    let player = state
        .players
        .get_mut(&player_id)
        .ok_or(EngineError::NotFound { kind: "player", id: player_id.to_string() })?;
    let drifted = player.rebuild_from_history();
    if drifted {
        warn!(%player_id, "player statistics drift detected, rebuilt from match history");
    }
    Ok(drifted)
}

/// Replay of one match used by revert tests and the standings ranker; kept
/// here so both sides agree on what a match contributes to a team.
pub(crate) fn team_result(m: &Match, team_id: TeamId) -> Option<(u8, u8)> {
    m.side_of(team_id).map(|side| m.score_for(side))
}
