//! Hooks for the view layer and side effects.

use crate::cards::Card;
use crate::core::{EffectError, GameState};

/// Receives state changes and side-effect cues from a `MatchSession`.
///
/// Every method has a no-op default. The fallible hooks front external
/// collaborators (audio, confetti, modal); their errors are logged by the
/// session and never reach the game state.
pub trait GameListener {
    /// The session replaced its state.
    fn on_state_changed(&mut self, _state: &GameState) {}

    /// Two cards just paired. Fires on the click, before the settle delay.
    fn on_match(&mut self, _first: &Card, _second: &Card) -> Result<(), EffectError> {
        Ok(())
    }

    /// The last pair settled. Fires once per game.
    fn on_game_complete(&mut self, _moves: u32) -> Result<(), EffectError> {
        Ok(())
    }

    /// The victory modal delay elapsed.
    fn on_victory_modal(&mut self, _moves: u32) -> Result<(), EffectError> {
        Ok(())
    }
}

impl GameListener for () {}
