pub mod event;
pub mod fair_play;
pub mod fixture;
pub mod ids;
pub mod player;
pub mod team;

pub use event::{EventType, MatchEvent, MatchSide};
pub use fair_play::{FairPlayRecord, FairPlayStatus, FairPlaySubject};
pub use fixture::{LiveState, Match, MatchStatus};
pub use ids::{MatchId, PlayerId, RecordId, SeasonId, TeamId};
pub use player::{MatchHistoryEntry, MatchOutcome, Player, StatLine};
pub use team::{Team, TeamStats};
