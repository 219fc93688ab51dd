//! Completion detection.

use crate::core::GameState;

/// Check if every card of a `pair_count`-pair game is matched.
///
/// Pending cards do not count; a board completes when its last pair settles.
#[must_use]
pub fn check_complete(state: &GameState, pair_count: usize) -> bool {
    pair_count > 0 && state.matched.len() == 2 * pair_count
}
