//! Python bindings for the letter-match engine.
//!
//! # Quick Start
//!
//! ```python
//! import letter_match as lm
//!
//! class Effects:
//!     def on_match(self, first, second):
//!         play_ta_dum()
//!
//!     def on_game_complete(self, moves):
//!         play_fanfare()
//!
//! game = lm.MatchSession(pair_count=6, seed=42, listener=Effects())
//! game.click(0)
//! game.click(5)
//! game.advance(2000)
//! ```

use pyo3::prelude::*;

mod py_session;

pub use py_session::*;

/// letter_match: memory card game engine pairing letters with animals.
#[pymodule]
fn letter_match(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMatchSession>()?;
    Ok(())
}
