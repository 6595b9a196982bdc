use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::{MatchId, PlayerId, SeasonId, TeamId};

/// The result of a match from one participant's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

/// One bucket of per-player counters.
///
/// The same shape serves career totals, per-season totals, and (through
/// `MatchHistoryEntry`) per-match contributions, so the conservation
/// invariant `career == Σ history` can be stated field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StatLine {
    pub appearances: u32,
    pub goals: u32,
    pub own_goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub minutes_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl StatLine {
    /// Credit one match-history entry to this bucket.
    pub fn credit(&mut self, entry: &MatchHistoryEntry) {
        self.appearances += 1;
        self.goals += entry.goals;
        self.own_goals += entry.own_goals;
        self.assists += entry.assists;
        self.yellow_cards += entry.yellow_cards;
        self.red_cards += entry.red_cards;
        self.minutes_played += entry.minutes_played;
        match entry.outcome {
            MatchOutcome::Win => self.wins += 1,
            MatchOutcome::Draw => self.draws += 1,
            MatchOutcome::Loss => self.losses += 1,
        }
    }

    /// Withdraw one match-history entry, flooring every counter at zero.
    ///
    /// Saturating rather than panicking: a revert against drifted counters
    /// must still leave the bucket in a legal state.
    pub fn withdraw(&mut self, entry: &MatchHistoryEntry) {
        self.appearances = self.appearances.saturating_sub(1);
        self.goals = self.goals.saturating_sub(entry.goals);
        self.own_goals = self.own_goals.saturating_sub(entry.own_goals);
        self.assists = self.assists.saturating_sub(entry.assists);
        self.yellow_cards = self.yellow_cards.saturating_sub(entry.yellow_cards);
        self.red_cards = self.red_cards.saturating_sub(entry.red_cards);
        self.minutes_played = self.minutes_played.saturating_sub(entry.minutes_played);
        match entry.outcome {
            MatchOutcome::Win => self.wins = self.wins.saturating_sub(1),
            MatchOutcome::Draw => self.draws = self.draws.saturating_sub(1),
            MatchOutcome::Loss => self.losses = self.losses.saturating_sub(1),
        }
    }
}

/// One player's summarized contribution to one match.
///
/// At most one entry exists per match id per player; the appearance is
/// implicit in the entry itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchHistoryEntry {
    pub match_id: MatchId,
    pub season: SeasonId,
    pub opponent: TeamId,
    pub goals: u32,
    pub own_goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub minutes_played: u32,
    pub outcome: MatchOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_team: Option<TeamId>,
    pub career_stats: StatLine,
    /// Per-season buckets, keyed by season id. Entries are created lazily by
    /// `season_stats_mut`; an absent key reads as an all-zero bucket.
    pub season_stats: BTreeMap<SeasonId, StatLine>,
    /// Source of truth for the cumulative buckets above. Ordered by
    /// application; one entry per match appeared in.
    pub match_history: Vec<MatchHistoryEntry>,
}

impl Player {
    pub fn new(name: impl Into<String>, current_team: Option<TeamId>) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            current_team,
            career_stats: StatLine::default(),
            season_stats: BTreeMap::new(),
            match_history: Vec::new(),
        }
    }

    /// Get-or-create the bucket for one season.
    pub fn season_stats_mut(&mut self, season: SeasonId) -> &mut StatLine {
        self.season_stats.entry(season).or_default()
    }

    pub fn history_entry(&self, match_id: MatchId) -> Option<&MatchHistoryEntry> {
        self.match_history.iter().find(|e| e.match_id == match_id)
    }

    /// Credit a history entry to career and the season bucket, and append it.
    pub fn apply_entry(&mut self, entry: MatchHistoryEntry) {
        self.career_stats.credit(&entry);
        self.season_stats_mut(entry.season).credit(&entry);
        self.match_history.push(entry);
    }

    /// Withdraw and remove the entry for `match_id`, if present.
    pub fn revert_entry(&mut self, match_id: MatchId) -> Option<MatchHistoryEntry> {
        let idx = self.match_history.iter().position(|e| e.match_id == match_id)?;
        let entry = self.match_history.remove(idx);
        self.career_stats.withdraw(&entry);
        if let Some(bucket) = self.season_stats.get_mut(&entry.season) {
            bucket.withdraw(&entry);
            // Drop the bucket once empty so a full revert leaves no trace.
            if *bucket == StatLine::default() {
                self.season_stats.remove(&entry.season);
            }
        }
        Some(entry)
    }

    /// Rebuild career and season buckets from `match_history`.
    ///
    /// The history list is authoritative; the cumulative buckets are a cache.
    /// Returns `true` when the rebuilt values differ from the cached ones,
    /// i.e. drift was present and has been repaired.
    pub fn rebuild_from_history(&mut self) -> bool {
        let mut career = StatLine::default();
        let mut seasons: BTreeMap<SeasonId, StatLine> = BTreeMap::new();
        for entry in &self.match_history {
            career.credit(entry);
            seasons.entry(entry.season).or_default().credit(entry);
        }
        let drifted = career != self.career_stats || seasons != self.season_stats;
        self.career_stats = career;
        self.season_stats = seasons;
        drifted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(season: SeasonId, goals: u32, outcome: MatchOutcome) -> MatchHistoryEntry {
        MatchHistoryEntry {
            match_id: MatchId::new(),
            season,
            opponent: TeamId::new(),
            goals,
            own_goals: 0,
            assists: 1,
            yellow_cards: 0,
            red_cards: 0,
            minutes_played: 90,
            outcome,
        }
    }

    #[test]
    fn apply_entry_updates_career_and_season_in_lockstep() {
        let season = SeasonId::new();
        let mut player = Player::new("Nine", None);
        player.apply_entry(entry(season, 2, MatchOutcome::Win));
        player.apply_entry(entry(season, 0, MatchOutcome::Draw));

        assert_eq!(player.career_stats.appearances, 2);
        assert_eq!(player.career_stats.goals, 2);
        assert_eq!(player.career_stats.wins, 1);
        assert_eq!(player.career_stats.draws, 1);
        assert_eq!(player.season_stats[&season], player.career_stats);
    }

    #[test]
    fn revert_entry_removes_exactly_one_entry() {
        let season = SeasonId::new();
        let mut player = Player::new("Nine", None);
        let first = entry(season, 1, MatchOutcome::Loss);
        let match_id = first.match_id;
        player.apply_entry(first);
        player.apply_entry(entry(season, 3, MatchOutcome::Win));

        let removed = player.revert_entry(match_id).unwrap();
        assert_eq!(removed.goals, 1);
        assert_eq!(player.match_history.len(), 1);
        assert_eq!(player.career_stats.goals, 3);
        assert_eq!(player.career_stats.losses, 0);
        assert!(player.revert_entry(match_id).is_none());
    }

    #[test]
    fn withdraw_floors_at_zero_on_drifted_counters() {
        let season = SeasonId::new();
        let mut line = StatLine::default();
        line.withdraw(&entry(season, 5, MatchOutcome::Win));
        assert_eq!(line, StatLine::default());
    }

    #[test]
    fn rebuild_from_history_repairs_drift() {
        let season = SeasonId::new();
        let mut player = Player::new("Nine", None);
        player.apply_entry(entry(season, 2, MatchOutcome::Win));

        // Simulate a drifted cache.
        player.career_stats.goals = 99;
        assert!(player.rebuild_from_history());
        assert_eq!(player.career_stats.goals, 2);
        assert!(!player.rebuild_from_history());
    }

    #[test]
    fn absent_season_reads_as_zero_and_is_created_on_write() {
        let season = SeasonId::new();
        let mut player = Player::new("Nine", None);
        assert!(player.season_stats.get(&season).is_none());
        player.season_stats_mut(season).goals += 1;
        assert_eq!(player.season_stats[&season].goals, 1);
    }
}
