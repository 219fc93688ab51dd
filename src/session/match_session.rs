//! Game session: owns the state, the RNG, the timers and the listener.
//!
//! Clicks resolve immediately through `rules`. The two delayed transitions
//! (mismatch clear, match settle) and the victory modal are scheduled on the
//! session's virtual clock, which the host advances.
//!
//! ## Stale timers
//!
//! A new game cancels every pending timer and bumps the session generation.
//! Each scheduled task carries the generation it was created in, and a task
//! from an older generation is dropped if it ever fires.

use log::{debug, info, warn};

use crate::cards::{CardId, Deck, DeckBuilder};
use crate::core::{ConfigError, EffectError, GameRng, GameState, MatchConfig};
use crate::rules::{check_complete, clear_mismatch, resolve_click, settle_match, ClickOutcome};
use crate::timers::Scheduler;

use super::event::GameEvent;
use super::listener::GameListener;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Transition {
    ClearMismatch { pair: [usize; 2] },
    SettleMatch { ids: [CardId; 2] },
    ShowVictoryModal,
}

#[derive(Clone, Debug)]
struct Scheduled {
    generation: u64,
    transition: Transition,
}

fn swallow(hook: &str, result: Result<(), EffectError>) {
    if let Err(err) = result {
        warn!("{hook} side effect failed: {err}");
    }
}

fn deal(config: &MatchConfig, rng: &mut GameRng) -> Result<Deck, ConfigError> {
    DeckBuilder::new(config.pair_count)
        .pool_size(config.pool_size)
        .asset_root(config.asset_root.clone())
        .build(rng)
}

/// One player's game, across restarts and difficulty changes.
pub struct MatchSession<L: GameListener = ()> {
    config: MatchConfig,
    rng: GameRng,
    state: GameState,
    timers: Scheduler<Scheduled>,
    generation: u64,
    victory_modal: bool,
    listener: L,
}

impl<L: GameListener> MatchSession<L> {
    /// Start a session with a seeded RNG and deal the first game.
    pub fn new(config: MatchConfig, seed: u64, listener: L) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = GameRng::new(seed);
        let deck = deal(&config, &mut rng)?;
        Ok(Self::start(config, rng, deck, listener))
    }

    /// Start a session with a random seed.
    pub fn from_entropy(config: MatchConfig, listener: L) -> Result<Self, ConfigError> {
        Self::new(config, GameRng::from_entropy().seed(), listener)
    }

    /// Start a session on an explicit first deck.
    ///
    /// The config's pair count is taken from the deck, and every pair key
    /// must come from the config's pool. Later games are dealt from `seed`.
    pub fn with_deck(config: MatchConfig, deck: Deck, seed: u64, listener: L) -> Result<Self, ConfigError> {
        let config = config.with_pair_count(deck.pair_count());
        config.validate()?;
        deck.validate_pool(config.pool_size)?;
        Ok(Self::start(config, GameRng::new(seed), deck, listener))
    }

    fn start(config: MatchConfig, rng: GameRng, deck: Deck, mut listener: L) -> Self {
        info!(
            "new game: {} pairs, seed {}",
            deck.pair_count(),
            rng.seed()
        );
        let state = GameState::new(deck);
        listener.on_state_changed(&state);
        Self {
            config,
            rng,
            state,
            timers: Scheduler::new(),
            generation: 0,
            victory_modal: false,
            listener,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Seed the session's deals are drawn from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    #[must_use]
    pub fn victory_modal_visible(&self) -> bool {
        self.victory_modal
    }

    /// Virtual time in milliseconds since the session started.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Number of scheduled transitions not yet fired.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    // === Player input ===

    /// Handle a click on the card at deck `index`.
    pub fn click(&mut self, index: usize) -> ClickOutcome {
        let resolution = resolve_click(&self.state, index);

        if let ClickOutcome::Rejected(reason) = resolution.outcome {
            debug!("click {index} ignored: {reason:?}");
            return resolution.outcome;
        }

        self.state = resolution.state;
        self.listener.on_state_changed(&self.state);

        match &resolution.outcome {
            ClickOutcome::Mismatch { pair } => {
                let id = self.schedule(self.config.mismatch_delay_ms, Transition::ClearMismatch { pair: *pair });
                debug!("mismatch {pair:?}, clear on {id}");
            }
            ClickOutcome::Match { pair, ids } => {
                let id = self.schedule(self.config.settle_delay_ms, Transition::SettleMatch { ids: *ids });
                debug!("match {} / {}, settle on {id}", ids[0], ids[1]);
                if let (Some(a), Some(b)) = (self.state.card(pair[0]), self.state.card(pair[1])) {
                    swallow("match", self.listener.on_match(a, b));
                }
            }
            _ => {}
        }

        resolution.outcome
    }

    /// Advance the clock and fire every transition that comes due.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<GameEvent> {
        let until = self.timers.now_ms().saturating_add(elapsed_ms);
        let mut events = Vec::new();

        while let Some((id, task)) = self.timers.pop_due(until) {
            if task.generation != self.generation {
                debug!("dropping {id} from game {}", task.generation);
                continue;
            }
            self.fire(task.transition, &mut events);
        }

        self.timers.advance_to(until);
        events
    }

    /// Deal a new game with the current configuration.
    ///
    /// Pending timers are cancelled; nothing from the old game can touch the
    /// new one.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        let deck = deal(&self.config, &mut self.rng)?;

        let cancelled = self.timers.cancel_all();
        self.generation += 1;
        self.victory_modal = false;
        self.state = GameState::new(deck);

        info!(
            "new game {}: {} pairs, {cancelled} timers cancelled",
            self.generation,
            self.state.pair_count()
        );
        self.listener.on_state_changed(&self.state);
        Ok(())
    }

    /// Change difficulty and deal a new game.
    ///
    /// An out-of-range count is rejected and the current game continues.
    pub fn set_pair_count(&mut self, pair_count: usize) -> Result<(), ConfigError> {
        let config = self.config.clone().with_pair_count(pair_count);
        config.validate()?;
        self.config = config;
        self.reset()
    }

    /// Hide the victory modal.
    pub fn dismiss_victory_modal(&mut self) {
        self.victory_modal = false;
    }

    // === Timed transitions ===

    fn schedule(&mut self, delay_ms: u64, transition: Transition) -> crate::timers::TimerId {
        self.timers.schedule(
            delay_ms,
            Scheduled {
                generation: self.generation,
                transition,
            },
        )
    }

    fn fire(&mut self, transition: Transition, events: &mut Vec<GameEvent>) {
        match transition {
            Transition::ClearMismatch { pair } => {
                let next = clear_mismatch(&self.state, pair);
                if next != self.state {
                    self.state = next;
                    self.listener.on_state_changed(&self.state);
                    events.push(GameEvent::MismatchCleared { pair });
                }
            }
            Transition::SettleMatch { ids } => {
                let was_complete = self.state.is_complete();
                self.state = settle_match(&self.state, ids);
                self.listener.on_state_changed(&self.state);
                events.push(GameEvent::PairSettled { ids });

                let complete = check_complete(&self.state, self.state.pair_count());
                if complete && !was_complete {
                    let moves = self.state.move_count();
                    info!("game {} complete in {moves} moves", self.generation);
                    events.push(GameEvent::GameComplete { moves });
                    swallow("completion", self.listener.on_game_complete(moves));
                    self.schedule(self.config.victory_modal_delay_ms, Transition::ShowVictoryModal);
                }
            }
            Transition::ShowVictoryModal => {
                let moves = self.state.move_count();
                self.victory_modal = true;
                events.push(GameEvent::VictoryModalShown { moves });
                swallow("victory modal", self.listener.on_victory_modal(moves));
            }
        }
    }
}
