//! Deck building.
//!
//! A deck holds `2 × pair_count` cards: for each pair key drawn from the
//! pool, one letter and one animal, shuffled into a uniformly random order.
//! The deck never changes after it is built; only the flip/match bookkeeping
//! in `GameState` moves.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, Category, PairKey};
use crate::core::config::{validate_counts, LETTER_POOL_SIZE};
use crate::core::error::ConfigError;
use crate::core::rng::GameRng;

/// An immutable, shuffled sequence of paired cards.
///
/// Backed by `im::Vector` so cloning a `GameState` stays O(1). Serialized as
/// a plain card list; deserializing goes through [`Deck::from_cards`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Build a deck from an explicit card order.
    ///
    /// Every pair key must appear exactly once per category, and the deck
    /// must hold at least one pair.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self, ConfigError> {
        let cards: Vector<Card> = cards.into_iter().collect();

        let mut per_key: FxHashMap<PairKey, [bool; 2]> = FxHashMap::default();
        for card in &cards {
            let slot = match card.category() {
                Category::Letter => 0,
                Category::Animal => 1,
            };
            let seen = per_key.entry(card.pair_key()).or_default();
            if seen[slot] {
                return Err(ConfigError::DuplicateCard(card.id));
            }
            seen[slot] = true;
        }

        if let Some((&key, _)) = per_key.iter().find(|(_, seen)| !(seen[0] && seen[1])) {
            return Err(ConfigError::UnpairedKey(key));
        }
        if cards.is_empty() {
            return Err(ConfigError::EmptyDeck);
        }

        Ok(Self { cards })
    }

    /// Check that every pair key falls in `1..=pool_size`.
    pub fn validate_pool(&self, pool_size: usize) -> Result<(), ConfigError> {
        match self
            .cards
            .iter()
            .find(|c| !(1..=pool_size).contains(&usize::from(c.pair_key().raw())))
        {
            Some(card) => Err(ConfigError::KeyOutsidePool {
                key: card.pair_key(),
                pool_size,
            }),
            None => Ok(()),
        }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Card at a deck index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Deck index of a card id.
    #[must_use]
    pub fn index_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    /// Iterate over cards in deck order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Cards of one category with their deck indices, in deck order.
    ///
    /// Views lay letters and animals out in separate columns but still
    /// address cards by deck index.
    pub fn column(&self, category: Category) -> impl Iterator<Item = (usize, &Card)> {
        self.cards
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.category() == category)
    }
}

impl TryFrom<Vec<Card>> for Deck {
    type Error = ConfigError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Self::from_cards(cards)
    }
}

impl From<Deck> for Vec<Card> {
    fn from(deck: Deck) -> Self {
        deck.cards.into_iter().collect()
    }
}

/// Builder for a random deck.
#[derive(Clone, Debug)]
pub struct DeckBuilder {
    pair_count: usize,
    pool_size: usize,
    asset_root: String,
}

impl DeckBuilder {
    pub fn new(pair_count: usize) -> Self {
        Self {
            pair_count,
            pool_size: LETTER_POOL_SIZE,
            asset_root: "/images".to_string(),
        }
    }

    pub fn pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn asset_root(mut self, root: impl Into<String>) -> Self {
        self.asset_root = root.into();
        self
    }

    /// Draw the pair keys, emit one card per category for each, and shuffle.
    pub fn build(&self, rng: &mut GameRng) -> Result<Deck, ConfigError> {
        validate_counts(self.pair_count, self.pool_size)?;

        let keys = rng.sample_without_replacement(self.pool_size, self.pair_count);

        let mut cards = Vec::with_capacity(keys.len() * 2);
        for key in keys {
            // validate_counts caps the pool at two digits
            let key = PairKey::new(key as u8);
            for category in Category::ALL {
                cards.push(Card::new(category, key, &self.asset_root));
            }
        }

        rng.shuffle(&mut cards);

        Ok(Deck {
            cards: cards.into_iter().collect(),
        })
    }
}

/// Build a shuffled deck of `pair_count` pairs drawn from `1..=pool_size`.
pub fn build_deck(pair_count: usize, pool_size: usize, rng: &mut GameRng) -> Result<Deck, ConfigError> {
    DeckBuilder::new(pair_count).pool_size(pool_size).build(rng)
}
