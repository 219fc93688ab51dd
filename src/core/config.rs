//! Match configuration.
//!
//! Hosts configure a game with `MatchConfig`: how many pairs are dealt,
//! how large the pair pool is, and the delays of the timed transitions.
//! Every field has a default, so a partial config deserializes cleanly.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Fewest pairs a game may deal.
pub const MIN_PAIR_COUNT: usize = 3;

/// One pair per letter of the Hebrew alphabet.
pub const LETTER_POOL_SIZE: usize = 22;

/// Pairs dealt when the host does not choose.
pub const DEFAULT_PAIR_COUNT: usize = 6;

/// Asset names carry a two-digit key.
pub const MAX_POOL_SIZE: usize = 99;

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of letter/animal pairs dealt.
    pub pair_count: usize,

    /// Size of the pool pair keys are drawn from (`1..=pool_size`).
    pub pool_size: usize,

    /// How long a mismatched pair stays face-up.
    pub mismatch_delay_ms: u64,

    /// How long a matched pair stays highlighted before it settles.
    pub settle_delay_ms: u64,

    /// Pause between completing the board and showing the victory modal.
    pub victory_modal_delay_ms: u64,

    /// Root that card image paths are built under.
    pub asset_root: String,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            pair_count: DEFAULT_PAIR_COUNT,
            pool_size: LETTER_POOL_SIZE,
            mismatch_delay_ms: 1000,
            settle_delay_ms: 2000,
            victory_modal_delay_ms: 1000,
            asset_root: "/images".to_string(),
        }
    }
}

impl MatchConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of pairs.
    #[must_use]
    pub fn with_pair_count(mut self, pair_count: usize) -> Self {
        self.pair_count = pair_count;
        self
    }

    /// Set the pair pool size.
    #[must_use]
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Set the mismatch delay.
    #[must_use]
    pub fn with_mismatch_delay_ms(mut self, ms: u64) -> Self {
        self.mismatch_delay_ms = ms;
        self
    }

    /// Set the settle delay.
    #[must_use]
    pub fn with_settle_delay_ms(mut self, ms: u64) -> Self {
        self.settle_delay_ms = ms;
        self
    }

    /// Set the victory modal delay.
    #[must_use]
    pub fn with_victory_modal_delay_ms(mut self, ms: u64) -> Self {
        self.victory_modal_delay_ms = ms;
        self
    }

    /// Set the asset root.
    #[must_use]
    pub fn with_asset_root(mut self, root: impl Into<String>) -> Self {
        self.asset_root = root.into();
        self
    }

    /// Check the pair count and pool size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_counts(self.pair_count, self.pool_size)
    }
}

/// Check `MIN_PAIR_COUNT <= pair_count <= pool_size <= MAX_POOL_SIZE`.
pub fn validate_counts(pair_count: usize, pool_size: usize) -> Result<(), ConfigError> {
    if pool_size == 0 || pool_size > MAX_POOL_SIZE {
        return Err(ConfigError::PoolSizeOutOfRange {
            pool_size,
            max: MAX_POOL_SIZE,
        });
    }
    if !(MIN_PAIR_COUNT..=pool_size).contains(&pair_count) {
        return Err(ConfigError::PairCountOutOfRange {
            pair_count,
            min: MIN_PAIR_COUNT,
            max: pool_size,
        });
    }
    Ok(())
}
