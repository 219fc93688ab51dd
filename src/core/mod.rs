//! Core engine types: state, RNG, configuration, errors.

pub mod config;
pub mod error;
pub mod rng;
pub mod state;

pub use config::{MatchConfig, DEFAULT_PAIR_COUNT, LETTER_POOL_SIZE, MAX_POOL_SIZE, MIN_PAIR_COUNT};
pub use error::{ConfigError, EffectError, SnapshotError};
pub use rng::{GameRng, GameRngState};
pub use state::{Flipped, GameState};
