use serde::{Deserialize, Serialize};

use super::ids::PlayerId;

/// The fixed event taxonomy the statistics engine understands.
///
/// Events are recorded when a match is completed (or amended live); anything
/// outside this enumeration is a collaborator concern and never reaches the
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Goal,
    /// Scored into the scorer's own net. Counted separately from `Goal` in
    /// player statistics, see `StatLine::own_goals`.
    OwnGoal,
    Assist,
    YellowCard,
    RedCard,
}

/// Which team an event is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSide {
    Home,
    Away,
}

impl MatchSide {
    pub fn opposite(self) -> Self {
        match self {
            MatchSide::Home => MatchSide::Away,
            MatchSide::Away => MatchSide::Home,
        }
    }
}

/// An immutable in-match occurrence attributed to a side, a minute, and
/// usually a roster player.
///
/// Events carry no derived numbers; every cumulative figure is computed by
/// the applier. `player` is `None` only for synthetic/administrative entries
/// that should not credit any roster player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub minute: u8,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub side: MatchSide,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerId>,
}

impl MatchEvent {
    pub fn new(event_type: EventType, side: MatchSide, player: PlayerId, minute: u8) -> Self {
        Self { minute, event_type, side, player: Some(player) }
    }

    /// Administrative entry with no attributable player.
    pub fn unattributed(event_type: EventType, side: MatchSide, minute: u8) -> Self {
        Self { minute, event_type, side, player: None }
    }

    pub fn goal(side: MatchSide, player: PlayerId, minute: u8) -> Self {
        Self::new(EventType::Goal, side, player, minute)
    }

    pub fn own_goal(side: MatchSide, player: PlayerId, minute: u8) -> Self {
        Self::new(EventType::OwnGoal, side, player, minute)
    }

    pub fn assist(side: MatchSide, player: PlayerId, minute: u8) -> Self {
        Self::new(EventType::Assist, side, player, minute)
    }

    pub fn yellow_card(side: MatchSide, player: PlayerId, minute: u8) -> Self {
        Self::new(EventType::YellowCard, side, player, minute)
    }

    pub fn red_card(side: MatchSide, player: PlayerId, minute: u8) -> Self {
        Self::new(EventType::RedCard, side, player, minute)
    }
}
