//! Game state: the deck plus flip/match bookkeeping.
//!
//! `GameState` is a value. Transitions in `rules` take a state and return a
//! new one; nothing mutates a state in place across a reset. Clones are O(1)
//! because the deck and id sets are `im` persistent structures.
//!
//! ## Invariants
//!
//! - At most two indices are flipped.
//! - A flipped index never refers to a matched or pending card.
//! - `matched` only grows within a game.
//! - `is_complete` is set once every card is matched and never clears.
//!
//! Deserialized states are checked against these before they are accepted.

use im::HashSet as ImHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::SnapshotError;
use crate::cards::{Card, CardId, Deck};

/// Flipped deck indices, in click order.
pub type Flipped = SmallVec<[usize; 2]>;

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StateRecord")]
pub struct GameState {
    pub(crate) deck: Deck,
    pub(crate) flipped: Flipped,
    pub(crate) matched: ImHashSet<CardId>,
    /// Matched but still highlighted, waiting for the settle delay.
    pub(crate) pending: ImHashSet<CardId>,
    pub(crate) move_count: u32,
    pub(crate) is_complete: bool,
}

impl GameState {
    /// Fresh state over a deck: nothing flipped, nothing matched.
    #[must_use]
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            flipped: SmallVec::new(),
            matched: ImHashSet::new(),
            pending: ImHashSet::new(),
            move_count: 0,
            is_complete: false,
        }
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Card at a deck index.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.deck.get(index)
    }

    /// Number of pairs dealt.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.deck.pair_count()
    }

    #[must_use]
    pub fn flipped(&self) -> &[usize] {
        &self.flipped
    }

    #[must_use]
    pub fn matched(&self) -> &ImHashSet<CardId> {
        &self.matched
    }

    #[must_use]
    pub fn pending(&self) -> &ImHashSet<CardId> {
        &self.pending
    }

    /// Completed two-card attempts.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Check if the card at `index` is permanently matched.
    #[must_use]
    pub fn is_matched(&self, index: usize) -> bool {
        self.card(index).is_some_and(|c| self.matched.contains(&c.id))
    }

    /// Check if the card at `index` is matched or waiting to settle.
    #[must_use]
    pub fn is_resolved(&self, index: usize) -> bool {
        self.card(index)
            .is_some_and(|c| self.matched.contains(&c.id) || self.pending.contains(&c.id))
    }

    /// Check if the view should show the card at `index` face-up.
    #[must_use]
    pub fn is_face_up(&self, index: usize) -> bool {
        self.flipped.contains(&index) || self.is_resolved(index)
    }

    /// Encode the state for a host.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a state produced by `to_bytes`.
    ///
    /// Bytes that decode to a state breaking the invariants are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let record: StateRecord = bincode::deserialize(bytes)?;
        Self::try_from(record)
    }

    fn check_invariants(&self) -> Result<(), SnapshotError> {
        if self.flipped.len() > 2 {
            return Err(SnapshotError::Invalid("more than two cards flipped"));
        }
        if self.flipped.len() == 2 && self.flipped[0] == self.flipped[1] {
            return Err(SnapshotError::Invalid("card flipped twice"));
        }
        for &index in &self.flipped {
            if index >= self.deck.len() {
                return Err(SnapshotError::Invalid("flipped index outside the deck"));
            }
            if self.is_resolved(index) {
                return Err(SnapshotError::Invalid("flipped card already matched"));
            }
        }

        for set in [&self.matched, &self.pending] {
            for id in set {
                if self.deck.index_of(*id).is_none() {
                    return Err(SnapshotError::Invalid("matched card not in the deck"));
                }
                let partner = CardId::new(id.category.other(), id.pair_key);
                if !set.contains(&partner) {
                    return Err(SnapshotError::Invalid("matched card without its partner"));
                }
            }
        }
        if self.matched.iter().any(|id| self.pending.contains(id)) {
            return Err(SnapshotError::Invalid("card both matched and pending"));
        }

        if self.is_complete != (self.matched.len() == self.deck.len()) {
            return Err(SnapshotError::Invalid("completion flag disagrees with matches"));
        }
        Ok(())
    }
}

/// Wire form of `GameState`, checked before it becomes one.
#[derive(Deserialize)]
struct StateRecord {
    deck: Deck,
    flipped: Flipped,
    matched: ImHashSet<CardId>,
    pending: ImHashSet<CardId>,
    move_count: u32,
    is_complete: bool,
}

impl TryFrom<StateRecord> for GameState {
    type Error = SnapshotError;

    fn try_from(record: StateRecord) -> Result<Self, Self::Error> {
        let state = Self {
            deck: record.deck,
            flipped: record.flipped,
            matched: record.matched,
            pending: record.pending,
            move_count: record.move_count,
            is_complete: record.is_complete,
        };
        state.check_invariants()?;
        Ok(state)
    }
}
