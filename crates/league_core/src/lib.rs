//! # league_core - League Statistics Aggregation & Standings Engine
//!
//! Pure state-transition logic for a competitive league: completed matches
//! produce events (goals, own goals, assists, cards) that are folded into
//! cumulative player and team statistics exactly once, and a ranked table
//! is computed over teams with a deterministic tie-break cascade.
//!
//! ## Features
//! - Idempotent match application guarded by `stats_updated` plus an
//!   optimistic version counter
//! - Safe revert for edit/reset workflows, with team counters rebuilt from
//!   source instead of subtracted
//! - First-class drift repair (`recompute_team_stats`, `rebuild_player_stats`)
//! - Standings with head-to-head and fair-play sub-computations
//!
//! Persistence, transport, access control, and rendering are collaborator
//! concerns; the engine operates over an explicit in-memory [`LeagueState`].

pub mod applier;
pub mod config;
pub mod error;
pub mod models;
pub mod standings;
pub mod state;

pub use applier::{
    apply_if_pending, apply_match_result, apply_match_result_guarded, rebuild_player_stats,
    recompute_team_stats, revert_match_result, revert_match_result_guarded, ApplyReport,
    DriftReport, RevertReport, SkippedEvent,
};
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use models::{
    EventType, FairPlayRecord, FairPlayStatus, FairPlaySubject, LiveState, Match,
    MatchEvent, MatchHistoryEntry, MatchId, MatchOutcome, MatchSide, MatchStatus, Player,
    PlayerId, RecordId, SeasonId, StatLine, Team, TeamId, TeamStats,
};
pub use standings::{compute_standings, enhanced_stats, EnhancedStats, HeadToHead, StandingsRow};
pub use state::LeagueState;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    /// End-to-end: schedule, complete, apply, rank, edit, re-rank.
    #[test]
    fn full_season_workflow() {
        let mut state = LeagueState::new();
        let config = EngineConfig { match_duration_minutes: 40, ..EngineConfig::default() };
        let season = SeasonId::new();

        let alpha = state.insert_team(Team::new("Alpha", season));
        let omega = state.insert_team(Team::new("Omega", season));
        let nine = state.insert_player(Player::new("Nine", Some(alpha)));

        let m = Match::new(season, alpha, omega, Utc::now());
        let match_id = m.id;
        state.insert_match(m);
        state.transition_match(match_id, MatchStatus::Live).unwrap();
        state.transition_match(match_id, MatchStatus::Completed).unwrap();
        {
            let m = state.expect_match_mut(match_id).unwrap();
            m.home_score = 2;
            m.away_score = 1;
            m.events = vec![
                MatchEvent::goal(MatchSide::Home, nine, 12),
                MatchEvent::goal(MatchSide::Home, nine, 68),
            ];
        }

        let report = apply_match_result(&mut state, &config, match_id).unwrap();
        assert_eq!(report.players_credited, 1);
        assert_eq!(state.players[&nine].career_stats.minutes_played, 40);

        let table = compute_standings(&state, &config, season);
        assert_eq!(table[0].name, "Alpha");
        assert_eq!(table[0].points, 3);
        assert_eq!(table[1].points, 0);

        // Operator corrects the result to a draw.
        revert_match_result(&mut state, &config, match_id).unwrap();
        {
            let m = state.expect_match_mut(match_id).unwrap();
            m.home_score = 1;
            m.away_score = 1;
            m.events = vec![MatchEvent::goal(MatchSide::Home, nine, 12)];
            m.version += 1;
        }
        apply_match_result(&mut state, &config, match_id).unwrap();

        let table = compute_standings(&state, &config, season);
        assert_eq!(table[0].points, 1);
        assert_eq!(table[1].points, 1);
        assert_eq!(state.players[&nine].career_stats.goals, 1);
        assert_eq!(state.players[&nine].career_stats.appearances, 1);
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut state = LeagueState::new();
        let season = SeasonId::new();
        let alpha = state.insert_team(Team::new("Alpha", season));
        let omega = state.insert_team(Team::new("Omega", season));
        state.insert_player(Player::new("Nine", Some(alpha)));
        state.insert_match(Match::new(season, alpha, omega, Utc::now()));
        state.insert_fair_play(FairPlayRecord::new(
            omega,
            FairPlaySubject::Named("touchline coach".into()),
            2,
        ));

        let json = serde_json::to_string(&state).unwrap();
        let back: LeagueState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
