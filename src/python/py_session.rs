//! Session bindings for Python.

use log::warn;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyTuple};

use crate::cards::Card;
use crate::core::{ConfigError, EffectError, GameState, MatchConfig};
use crate::rules::ClickOutcome;
use crate::session::{GameEvent, GameListener, MatchSession};

fn config_err(err: ConfigError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Forwards listener hooks to an optional Python object.
///
/// Hooks are looked up by name; a missing method is a no-op and a raised
/// exception becomes an `EffectError`.
struct PyListener {
    target: Option<PyObject>,
}

impl PyListener {
    fn call(&self, hook: &str, args: impl IntoPy<Py<PyTuple>>) -> Result<(), EffectError> {
        let Some(target) = &self.target else {
            return Ok(());
        };
        Python::with_gil(|py| {
            let target = target.bind(py);
            if !target.hasattr(hook).unwrap_or(false) {
                return Ok(());
            }
            target
                .call_method1(hook, args)
                .map(|_| ())
                .map_err(|err| EffectError::Host(err.to_string()))
        })
    }
}

impl GameListener for PyListener {
    fn on_state_changed(&mut self, state: &GameState) {
        if let Err(err) = self.call("on_state_changed", (state.move_count(),)) {
            warn!("on_state_changed failed: {err}");
        }
    }

    fn on_match(&mut self, first: &Card, second: &Card) -> Result<(), EffectError> {
        self.call("on_match", (first.id.to_string(), second.id.to_string()))
    }

    fn on_game_complete(&mut self, moves: u32) -> Result<(), EffectError> {
        self.call("on_game_complete", (moves,))
    }

    fn on_victory_modal(&mut self, moves: u32) -> Result<(), EffectError> {
        self.call("on_victory_modal", (moves,))
    }
}

fn outcome_name(outcome: &ClickOutcome) -> &'static str {
    match outcome {
        ClickOutcome::Rejected(_) => "rejected",
        ClickOutcome::Flipped { .. } => "flipped",
        ClickOutcome::Mismatch { .. } => "mismatch",
        ClickOutcome::Match { .. } => "match",
    }
}

fn event_name(event: &GameEvent) -> &'static str {
    match event {
        GameEvent::MismatchCleared { .. } => "mismatch_cleared",
        GameEvent::PairSettled { .. } => "pair_settled",
        GameEvent::GameComplete { .. } => "game_complete",
        GameEvent::VictoryModalShown { .. } => "victory_modal",
    }
}

/// Python wrapper for MatchSession.
#[pyclass(name = "MatchSession")]
pub struct PyMatchSession {
    inner: MatchSession<PyListener>,
}

#[pymethods]
impl PyMatchSession {
    /// Create a session and deal the first game.
    ///
    /// # Arguments
    /// - pair_count: Pairs dealt (3-22)
    /// - seed: RNG seed; random when omitted
    /// - listener: Object with optional on_match / on_game_complete /
    ///   on_victory_modal / on_state_changed methods
    #[new]
    #[pyo3(signature = (pair_count = 6, seed = None, listener = None))]
    fn new(pair_count: usize, seed: Option<u64>, listener: Option<PyObject>) -> PyResult<Self> {
        let config = MatchConfig::default().with_pair_count(pair_count);
        let listener = PyListener { target: listener };
        let inner = match seed {
            Some(seed) => MatchSession::new(config, seed, listener),
            None => MatchSession::from_entropy(config, listener),
        }
        .map_err(config_err)?;
        Ok(Self { inner })
    }

    /// Click a card. Returns "rejected", "flipped", "mismatch" or "match".
    fn click(&mut self, index: usize) -> &'static str {
        outcome_name(&self.inner.click(index))
    }

    /// Advance the clock; returns the names of fired events.
    fn advance(&mut self, elapsed_ms: u64) -> Vec<&'static str> {
        self.inner.advance(elapsed_ms).iter().map(event_name).collect()
    }

    fn reset(&mut self) -> PyResult<()> {
        self.inner.reset().map_err(config_err)
    }

    fn set_pair_count(&mut self, pair_count: usize) -> PyResult<()> {
        self.inner.set_pair_count(pair_count).map_err(config_err)
    }

    fn dismiss_victory_modal(&mut self) {
        self.inner.dismiss_victory_modal();
    }

    /// Cards in deck order as (id, category, image, pair_key).
    fn cards(&self) -> Vec<(String, &'static str, String, u8)> {
        self.inner
            .state()
            .deck()
            .iter()
            .map(|c| (c.id.to_string(), c.category().slug(), c.image.clone(), c.pair_key().raw()))
            .collect()
    }

    fn is_face_up(&self, index: usize) -> bool {
        self.inner.state().is_face_up(index)
    }

    fn is_matched(&self, index: usize) -> bool {
        self.inner.state().is_matched(index)
    }

    /// Bincode-encoded game state.
    fn snapshot<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let bytes = self
            .inner
            .state()
            .to_bytes()
            .map_err(|err| PyValueError::new_err(err.to_string()))?;
        Ok(PyBytes::new_bound(py, &bytes))
    }

    #[getter]
    fn flipped(&self) -> Vec<usize> {
        self.inner.state().flipped().to_vec()
    }

    #[getter]
    fn move_count(&self) -> u32 {
        self.inner.state().move_count()
    }

    #[getter]
    fn is_complete(&self) -> bool {
        self.inner.state().is_complete()
    }

    #[getter]
    fn pair_count(&self) -> usize {
        self.inner.state().pair_count()
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.inner.seed()
    }

    #[getter]
    fn victory_modal_visible(&self) -> bool {
        self.inner.victory_modal_visible()
    }

    fn __repr__(&self) -> String {
        let state = self.inner.state();
        format!(
            "MatchSession(pairs={}, moves={}, matched={})",
            state.pair_count(),
            state.move_count(),
            state.matched().len() / 2
        )
    }
}
