//! Deterministic random number generation for dealing.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed deals the same board
//! - **Replayable**: Entropy-seeded games still record their seed
//! - **Serializable**: O(1) state capture and restore
//!
//! ```
//! use letter_match::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(
//!     a.sample_without_replacement(22, 6),
//!     b.sample_without_replacement(22, 6),
//! );
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded RNG used by the deck builder.
///
/// Uses ChaCha8 for speed while keeping statistically sound output.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG from a fresh random seed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place (Fisher–Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Pick `count` distinct values from `1..=pool_size`.
    ///
    /// Repeatedly draws a uniform index into the remaining candidates and
    /// removes it, so every subset is equally likely and no value repeats.
    /// Returns fewer than `count` values when the pool is smaller.
    pub fn sample_without_replacement(&mut self, pool_size: usize, count: usize) -> Vec<usize> {
        let mut candidates: Vec<usize> = (1..=pool_size).collect();
        let mut picked = Vec::with_capacity(count.min(pool_size));

        while picked.len() < count && !candidates.is_empty() {
            let i = self.gen_range_usize(0..candidates.len());
            picked.push(candidates.swap_remove(i));
        }

        picked
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
