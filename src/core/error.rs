//! Error types.
//!
//! Invalid configuration is the only error the engine itself reports.
//! Illegal clicks are silent no-ops, and failures of external side effects
//! (audio, host callbacks) are logged and swallowed by the session.

use thiserror::Error;

use crate::cards::{CardId, PairKey};

/// Rejected configuration or deck layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("pair count {pair_count} outside {min}..={max}")]
    PairCountOutOfRange {
        pair_count: usize,
        min: usize,
        max: usize,
    },

    #[error("pool size {pool_size} outside 1..={max}")]
    PoolSizeOutOfRange { pool_size: usize, max: usize },

    #[error("pair key {0} does not have exactly one letter and one animal")]
    UnpairedKey(PairKey),

    #[error("card {0} appears more than once")]
    DuplicateCard(CardId),

    #[error("deck has no cards")]
    EmptyDeck,

    #[error("pair key {key} outside pool 1..={pool_size}")]
    KeyOutsidePool { key: PairKey, pool_size: usize },
}

/// Failure of an external collaborator triggered by the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffectError {
    #[error("playback unavailable: {0}")]
    Unavailable(String),

    #[error("host callback failed: {0}")]
    Host(String),
}

/// State snapshot encode/decode failure.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot codec: {0}")]
    Codec(#[from] bincode::Error),

    #[error("snapshot breaks state invariant: {0}")]
    Invalid(&'static str),
}
