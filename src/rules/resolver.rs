//! Turn resolution.
//!
//! Pure transitions over `GameState`. The session decides when to call
//! them; none of them schedule or notify anything.

use crate::cards::CardId;
use crate::core::GameState;

use super::completion::check_complete;

/// Why a click was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// No card at that index.
    OutOfRange,
    /// Two cards are already face-up waiting for the mismatch delay.
    PairUnresolved,
    /// The card is already flipped.
    AlreadyFlipped,
    /// The card is matched or waiting to settle.
    AlreadyMatched,
    /// The first flipped card has the same category.
    SameCategory,
}

/// What a click did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Ignored; the state is unchanged.
    Rejected(RejectReason),
    /// First card of an attempt turned face-up.
    Flipped { index: usize },
    /// Second card did not pair with the first. Both stay face-up until
    /// `clear_mismatch`.
    Mismatch { pair: [usize; 2] },
    /// Second card paired with the first. Both are pending until
    /// `settle_match`.
    Match { pair: [usize; 2], ids: [CardId; 2] },
}

impl ClickOutcome {
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, ClickOutcome::Rejected(_))
    }

    /// Check if the click completed a two-card attempt.
    #[must_use]
    pub fn is_move(&self) -> bool {
        matches!(self, ClickOutcome::Mismatch { .. } | ClickOutcome::Match { .. })
    }
}

/// New state plus what happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub state: GameState,
    pub outcome: ClickOutcome,
}

fn check_click(state: &GameState, index: usize) -> Result<(), RejectReason> {
    let card = state.card(index).ok_or(RejectReason::OutOfRange)?;

    if state.flipped.len() >= 2 {
        return Err(RejectReason::PairUnresolved);
    }
    if state.flipped.contains(&index) {
        return Err(RejectReason::AlreadyFlipped);
    }
    if state.is_resolved(index) {
        return Err(RejectReason::AlreadyMatched);
    }
    if let Some(first) = state.flipped.first().and_then(|&i| state.card(i)) {
        if first.category() == card.category() {
            return Err(RejectReason::SameCategory);
        }
    }

    Ok(())
}

/// Resolve a click on the card at `index`.
///
/// Rejected clicks return a clone of the input state. A second valid click
/// counts one move and either moves both cards to pending (match) or leaves
/// both flipped (mismatch).
pub fn resolve_click(state: &GameState, index: usize) -> Resolution {
    if let Err(reason) = check_click(state, index) {
        return Resolution {
            state: state.clone(),
            outcome: ClickOutcome::Rejected(reason),
        };
    }

    let mut next = state.clone();

    let Some(&first) = state.flipped.first() else {
        next.flipped.push(index);
        return Resolution {
            state: next,
            outcome: ClickOutcome::Flipped { index },
        };
    };
    let (Some(a), Some(b)) = (state.card(first), state.card(index)) else {
        return Resolution {
            state: next,
            outcome: ClickOutcome::Rejected(RejectReason::OutOfRange),
        };
    };

    next.flipped.push(index);
    next.move_count += 1;
    let pair = [first, index];

    if a.pair_key() == b.pair_key() {
        let ids = [a.id, b.id];
        next.flipped.clear();
        for id in ids {
            next.pending.insert(id);
        }
        Resolution {
            state: next,
            outcome: ClickOutcome::Match { pair, ids },
        }
    } else {
        Resolution {
            state: next,
            outcome: ClickOutcome::Mismatch { pair },
        }
    }
}

/// Turn a mismatched pair back face-down.
///
/// Only clears when `flipped` still holds exactly `pair`.
pub fn clear_mismatch(state: &GameState, pair: [usize; 2]) -> GameState {
    let mut next = state.clone();
    if next.flipped.as_slice() == pair {
        next.flipped.clear();
    }
    next
}

/// Move a pending pair into `matched` and update completion.
///
/// Ids that are no longer pending are skipped.
pub fn settle_match(state: &GameState, ids: [CardId; 2]) -> GameState {
    let mut next = state.clone();
    for id in ids {
        if next.pending.remove(&id).is_some() {
            next.matched.insert(id);
        }
    }
    if !next.is_complete {
        next.is_complete = check_complete(&next, next.pair_count());
    }
    next
}
