//! Entity identifiers.
//!
//! Every record the engine touches is keyed by a UUID newtype so that a team
//! id can never be handed to an API expecting a player id.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

entity_id!(
    /// Identifier of a team record.
    TeamId
);
entity_id!(
    /// Identifier of a player record.
    PlayerId
);
entity_id!(
    /// Identifier of a match record.
    MatchId
);
entity_id!(
    /// Identifier of a season. Ordered so it can key a `BTreeMap`.
    SeasonId
);
entity_id!(
    /// Identifier of a fair-play (disciplinary) record.
    RecordId
);
