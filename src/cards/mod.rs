//! Card model and deck building.
//!
//! - `Card`: a letter or animal face with its pair key and image
//! - `Deck`: immutable shuffled sequence of paired cards
//! - `DeckBuilder`: random deck construction from a seeded `GameRng`

mod card;
mod deck;

pub use card::{Card, CardId, Category, PairKey};
pub use deck::{build_deck, Deck, DeckBuilder};
