//! Events produced by timed transitions.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// A delayed transition that fired during `MatchSession::advance`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A mismatched pair turned back face-down.
    MismatchCleared { pair: [usize; 2] },

    /// A pending pair became permanently matched.
    PairSettled { ids: [CardId; 2] },

    /// Every pair is matched.
    GameComplete { moves: u32 },

    /// The victory modal should be shown.
    VictoryModalShown { moves: u32 },
}
