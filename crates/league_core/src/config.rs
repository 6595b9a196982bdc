use serde::{Deserialize, Serialize};

/// Externally supplied engine configuration.
///
/// The match duration is deliberately not a literal in the applier: the
/// league changed formats mid-project (90-minute matches, later 40), so
/// minutes credited per appearance must come from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minutes credited to each appearing player per completed match.
    pub match_duration_minutes: u16,
    /// Table points awarded for a win.
    pub points_win: u32,
    /// Table points awarded for a draw.
    pub points_draw: u32,
    /// Fair-play points charged per yellow card (lower totals rank higher).
    pub yellow_card_fair_play_points: u32,
    /// Fair-play points charged per red card.
    pub red_card_fair_play_points: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            match_duration_minutes: 90,
            points_win: 3,
            points_draw: 1,
            yellow_card_fair_play_points: 1,
            red_card_fair_play_points: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_standard_league_scheme() {
        let config = EngineConfig::default();
        assert_eq!(config.match_duration_minutes, 90);
        assert_eq!(config.points_win, 3);
        assert_eq!(config.points_draw, 1);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = EngineConfig { match_duration_minutes: 40, ..EngineConfig::default() };
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
