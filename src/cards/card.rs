//! Card identity: categories, pair keys and card ids.

use serde::{Deserialize, Serialize};

/// The two card faces. A pair is always one of each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// A Hebrew letter.
    Letter,
    /// The animal whose name starts with that letter.
    Animal,
}

impl Category {
    /// Both categories, letters first.
    pub const ALL: [Category; 2] = [Category::Letter, Category::Animal];

    /// Singular name used in ids and file names.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Category::Letter => "letter",
            Category::Animal => "animal",
        }
    }

    /// Asset folder holding this category's images.
    #[must_use]
    pub const fn folder(self) -> &'static str {
        match self {
            Category::Letter => "letters",
            Category::Animal => "animals",
        }
    }

    /// The category a match must come from.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Category::Letter => Category::Animal,
            Category::Animal => Category::Letter,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Identifies which pair a card belongs to (`1..=pool_size`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey(pub u8);

impl PairKey {
    /// Create a new pair key.
    #[must_use]
    pub const fn new(key: u8) -> Self {
        Self(key)
    }

    /// Get the raw key value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique card id. Displays as `letter-3` / `animal-3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId {
    pub category: Category,
    pub pair_key: PairKey,
}

impl CardId {
    #[must_use]
    pub const fn new(category: Category, pair_key: PairKey) -> Self {
        Self { category, pair_key }
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.category.slug(), self.pair_key.0)
    }
}

/// A dealt card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique id.
    pub id: CardId,

    /// Image path, opaque to the engine.
    pub image: String,
}

impl Card {
    /// Create a card with its image under `asset_root`.
    ///
    /// Images are `{asset_root}/{folder}/{slug}_{NN}.png` with a zero-padded key.
    pub fn new(category: Category, pair_key: PairKey, asset_root: &str) -> Self {
        let root = asset_root.trim_end_matches('/');
        Self {
            id: CardId::new(category, pair_key),
            image: format!(
                "{root}/{}/{}_{:02}.png",
                category.folder(),
                category.slug(),
                pair_key.0
            ),
        }
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.id.category
    }

    #[must_use]
    pub fn pair_key(&self) -> PairKey {
        self.id.pair_key
    }

    /// Check if two cards form a pair.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.category() != other.category() && self.pair_key() == other.pair_key()
    }
}
