//! # letter-match
//!
//! Match engine for a children's memory card game: each Hebrew letter is
//! paired with an animal, and a pair is found by turning up one of each.
//!
//! ## Design Principles
//!
//! 1. **State Is a Value**: `GameState` is replaced, never patched. Rules are
//!    pure functions from state to state.
//!
//! 2. **Time Is Explicit**: Delayed transitions live in a cancellable
//!    virtual-clock scheduler owned by the session. A new game cancels them.
//!
//! 3. **Side Effects Stay Outside**: Audio, confetti and the victory modal are
//!    listener hooks. Their failures are logged, never propagated.
//!
//! ## Modules
//!
//! - `core`: Configuration, state, RNG, errors
//! - `cards`: Card model and deck building
//! - `rules`: Click resolution, delayed transitions, completion
//! - `timers`: Cancellable single-shot scheduler
//! - `session`: Game session tying rules, timers and listener together
//!
//! ## Example
//!
//! ```
//! use letter_match::{ClickOutcome, MatchConfig, MatchSession};
//!
//! let mut game = MatchSession::new(MatchConfig::default(), 42, ()).unwrap();
//! assert_eq!(game.click(0), ClickOutcome::Flipped { index: 0 });
//! assert_eq!(game.state().flipped(), &[0]);
//! ```

pub mod core;
pub mod cards;
pub mod rules;
pub mod timers;
pub mod session;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, EffectError, SnapshotError,
    GameRng, GameRngState,
    GameState, MatchConfig,
    DEFAULT_PAIR_COUNT, LETTER_POOL_SIZE, MIN_PAIR_COUNT,
};

pub use crate::cards::{build_deck, Card, CardId, Category, Deck, DeckBuilder, PairKey};

pub use crate::rules::{
    check_complete, clear_mismatch, resolve_click, settle_match,
    ClickOutcome, RejectReason, Resolution,
};

pub use crate::timers::{Scheduler, TimerId};

pub use crate::session::{GameEvent, GameListener, MatchSession};
