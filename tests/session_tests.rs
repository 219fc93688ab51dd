//! Session tests: timed transitions, resets, completion and side effects.

use letter_match::{
    Card, CardId, Category, ClickOutcome, ConfigError, Deck, EffectError, GameEvent, GameListener, GameState,
    MatchConfig, MatchSession, PairKey, RejectReason,
};

/// Counts listener calls; optionally fails every side effect.
#[derive(Default)]
struct Recorder {
    matches: Vec<(CardId, CardId)>,
    completions: Vec<u32>,
    modals: u32,
    state_changes: u32,
    fail: bool,
}

impl Recorder {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn result(&self) -> Result<(), EffectError> {
        if self.fail {
            Err(EffectError::Unavailable("autoplay blocked".to_string()))
        } else {
            Ok(())
        }
    }
}

impl GameListener for Recorder {
    fn on_state_changed(&mut self, _state: &GameState) {
        self.state_changes += 1;
    }

    fn on_match(&mut self, first: &Card, second: &Card) -> Result<(), EffectError> {
        self.matches.push((first.id, second.id));
        self.result()
    }

    fn on_game_complete(&mut self, moves: u32) -> Result<(), EffectError> {
        self.completions.push(moves);
        self.result()
    }

    fn on_victory_modal(&mut self, _moves: u32) -> Result<(), EffectError> {
        self.modals += 1;
        self.result()
    }
}

fn card(category: Category, key: u8) -> Card {
    Card::new(category, PairKey::new(key), "/images")
}

fn id(category: Category, key: u8) -> CardId {
    CardId::new(category, PairKey::new(key))
}

/// [L1, A2, L2, A1, A3, L3]
fn scenario_session(listener: Recorder) -> MatchSession<Recorder> {
    let deck = Deck::from_cards(vec![
        card(Category::Letter, 1),
        card(Category::Animal, 2),
        card(Category::Letter, 2),
        card(Category::Animal, 1),
        card(Category::Animal, 3),
        card(Category::Letter, 3),
    ])
    .unwrap();
    MatchSession::with_deck(MatchConfig::default(), deck, 7, listener).unwrap()
}

/// Deck indices of each pair, letter first.
fn pairs(state: &GameState) -> Vec<(usize, usize)> {
    let deck = state.deck();
    deck.column(Category::Letter)
        .map(|(i, c)| {
            let partner = deck.index_of(CardId::new(Category::Animal, c.pair_key())).unwrap();
            (i, partner)
        })
        .collect()
}

/// Walkthrough with real delays: 1000 ms mismatch, 2000 ms settle.
#[test]
fn test_scenario_with_delays() {
    let mut game = scenario_session(Recorder::default());

    assert_eq!(game.click(0), ClickOutcome::Flipped { index: 0 });
    assert_eq!(game.click(1), ClickOutcome::Mismatch { pair: [0, 1] });
    assert_eq!(game.state().move_count(), 1);
    assert_eq!(game.pending_timers(), 1);

    assert!(game.advance(999).is_empty());
    assert_eq!(game.state().flipped(), &[0, 1]);

    assert_eq!(game.advance(1), vec![GameEvent::MismatchCleared { pair: [0, 1] }]);
    assert!(game.state().flipped().is_empty());

    game.click(3);
    let ids = [id(Category::Animal, 1), id(Category::Letter, 1)];
    assert_eq!(game.click(0), ClickOutcome::Match { pair: [3, 0], ids });
    assert_eq!(game.state().move_count(), 2);
    assert!(game.state().flipped().is_empty());
    assert_eq!(game.state().pending().len(), 2);
    assert_eq!(game.listener().matches, vec![(ids[0], ids[1])]);

    assert!(game.advance(1999).is_empty());
    assert!(game.state().matched().is_empty());

    assert_eq!(game.advance(1), vec![GameEvent::PairSettled { ids }]);
    assert!(game.state().pending().is_empty());
    assert!(game.state().matched().contains(&ids[0]));
    assert!(game.state().matched().contains(&ids[1]));
    assert_eq!(game.now_ms(), 3000);
}

/// Clicks are ignored while a mismatched pair is still showing.
#[test]
fn test_clicks_blocked_during_mismatch() {
    let mut game = scenario_session(Recorder::default());
    game.click(0);
    game.click(1);

    let changes = game.listener().state_changes;
    assert_eq!(game.click(4), ClickOutcome::Rejected(RejectReason::PairUnresolved));
    assert_eq!(game.listener().state_changes, changes);
    assert_eq!(game.state().move_count(), 1);

    game.advance(1000);
    assert_eq!(game.click(4), ClickOutcome::Flipped { index: 4 });
}

/// A pending match does not block play; its settle leaves other flips alone.
#[test]
fn test_play_continues_during_settle() {
    let mut game = scenario_session(Recorder::default());
    game.click(0);
    game.click(3);

    assert_eq!(game.click(2), ClickOutcome::Flipped { index: 2 });
    assert_eq!(game.click(4), ClickOutcome::Mismatch { pair: [2, 4] });

    assert_eq!(game.advance(1000), vec![GameEvent::MismatchCleared { pair: [2, 4] }]);
    game.click(5);

    let events = game.advance(1000);
    assert_eq!(
        events,
        vec![GameEvent::PairSettled { ids: [id(Category::Letter, 1), id(Category::Animal, 1)] }]
    );
    assert_eq!(game.state().flipped(), &[5]);
}

/// Completion fires once, then the victory modal follows after its delay.
#[test]
fn test_completion_fires_once() {
    let mut game = MatchSession::new(MatchConfig::default(), 42, Recorder::default()).unwrap();

    for (letter, animal) in pairs(game.state()) {
        assert!(matches!(game.click(letter), ClickOutcome::Flipped { .. }));
        assert!(matches!(game.click(animal), ClickOutcome::Match { .. }));
    }
    assert!(!game.state().is_complete());
    assert_eq!(game.pending_timers(), 6);

    let events = game.advance(2000);
    let settled = events
        .iter()
        .filter(|e| matches!(e, GameEvent::PairSettled { .. }))
        .count();
    assert_eq!(settled, 6);
    assert_eq!(events.last(), Some(&GameEvent::GameComplete { moves: 6 }));
    assert!(game.state().is_complete());
    assert_eq!(game.listener().completions, vec![6]);
    assert!(!game.victory_modal_visible());

    assert_eq!(game.advance(1000), vec![GameEvent::VictoryModalShown { moves: 6 }]);
    assert!(game.victory_modal_visible());
    assert_eq!(game.listener().modals, 1);

    assert!(game.advance(60_000).is_empty());
    assert_eq!(game.listener().completions.len(), 1);

    game.dismiss_victory_modal();
    assert!(!game.victory_modal_visible());
    assert!(game.state().is_complete());
}

/// One long advance runs settle, completion and the modal in order.
#[test]
fn test_single_advance_reaches_modal() {
    let mut game = MatchSession::new(MatchConfig::default().with_pair_count(3), 9, ()).unwrap();
    for (letter, animal) in pairs(game.state()) {
        game.click(letter);
        game.click(animal);
    }

    let events = game.advance(10_000);
    assert_eq!(events.len(), 5);
    assert_eq!(events[3], GameEvent::GameComplete { moves: 3 });
    assert_eq!(events[4], GameEvent::VictoryModalShown { moves: 3 });
    assert!(game.victory_modal_visible());
}

/// A reset during the mismatch delay keeps the old timer out of the new game.
#[test]
fn test_reset_cancels_mismatch_timer() {
    let mut game = scenario_session(Recorder::default());
    game.click(0);
    game.click(1);
    game.advance(500);

    game.reset().unwrap();
    assert_eq!(game.pending_timers(), 0);
    assert!(game.state().flipped().is_empty());
    assert_eq!(game.state().move_count(), 0);

    let (letter, _) = pairs(game.state())[0];
    game.click(letter);
    assert!(game.advance(5000).is_empty());
    assert_eq!(game.state().flipped(), &[letter]);
}

/// A reset during the settle delay keeps the old pair out of the new game.
#[test]
fn test_reset_cancels_settle_timer() {
    let mut game = scenario_session(Recorder::default());
    game.click(0);
    game.click(3);

    game.reset().unwrap();
    assert!(game.advance(5000).is_empty());
    assert!(game.state().matched().is_empty());
    assert!(game.state().pending().is_empty());
}

/// Changing difficulty deals a new board and drops pending transitions.
#[test]
fn test_set_pair_count_restarts() {
    let mut game = scenario_session(Recorder::default());
    game.click(0);
    game.click(1);

    game.set_pair_count(10).unwrap();
    assert_eq!(game.state().deck().len(), 20);
    assert_eq!(game.pending_timers(), 0);
    assert!(game.advance(2000).is_empty());

    assert!(game.set_pair_count(2).is_err());
    assert_eq!(game.state().pair_count(), 10);
}

/// A new game hides the victory modal and can be won again.
#[test]
fn test_reset_after_victory() {
    let mut game = MatchSession::new(MatchConfig::default().with_pair_count(3), 1, Recorder::default()).unwrap();
    for (letter, animal) in pairs(game.state()) {
        game.click(letter);
        game.click(animal);
    }
    game.advance(3000);
    assert!(game.victory_modal_visible());

    game.reset().unwrap();
    assert!(!game.victory_modal_visible());
    assert!(!game.state().is_complete());

    for (letter, animal) in pairs(game.state()) {
        game.click(letter);
        game.click(animal);
    }
    game.advance(3000);
    assert_eq!(game.listener().completions, vec![3, 3]);
}

/// Failing side effects never change the game.
#[test]
fn test_side_effect_failures_are_swallowed() {
    let mut game = MatchSession::new(MatchConfig::default().with_pair_count(4), 3, Recorder::failing()).unwrap();
    for (letter, animal) in pairs(game.state()) {
        game.click(letter);
        game.click(animal);
    }
    assert_eq!(game.listener().matches.len(), 4);

    game.advance(3000);
    assert!(game.state().is_complete());
    assert!(game.victory_modal_visible());
    assert_eq!(game.listener().completions, vec![4]);
    assert_eq!(game.listener().modals, 1);
}

/// Delays come from the config.
#[test]
fn test_custom_delays() {
    let config = MatchConfig::default()
        .with_mismatch_delay_ms(300)
        .with_settle_delay_ms(100);
    let deck = Deck::from_cards(vec![
        card(Category::Letter, 1),
        card(Category::Animal, 2),
        card(Category::Letter, 2),
        card(Category::Animal, 1),
        card(Category::Animal, 3),
        card(Category::Letter, 3),
    ])
    .unwrap();
    let mut game = MatchSession::with_deck(config, deck, 7, ()).unwrap();

    game.click(0);
    game.click(1);
    assert_eq!(game.advance(300).len(), 1);

    game.click(4);
    game.click(5);
    assert_eq!(game.advance(100).len(), 1);
    assert_eq!(game.state().matched().len(), 2);
}

/// Explicit decks still need a valid pair count.
#[test]
fn test_with_deck_validates_pair_count() {
    let deck = Deck::from_cards(vec![card(Category::Letter, 1), card(Category::Animal, 1)]).unwrap();
    assert!(MatchSession::with_deck(MatchConfig::default(), deck, 1, ()).is_err());
}

/// The listener sees every accepted transition and nothing else.
#[test]
fn test_state_change_notifications() {
    let mut game = scenario_session(Recorder::default());
    assert_eq!(game.listener().state_changes, 1);

    game.click(0);
    game.click(0);
    game.click(2);
    assert_eq!(game.listener().state_changes, 2);

    game.click(1);
    game.advance(1000);
    assert_eq!(game.listener().state_changes, 4);
}

/// A deck loaded from JSON is validated before a session can use it.
#[test]
fn test_json_deck_must_pair_up() {
    let unpaired = serde_json::to_string(&vec![
        card(Category::Letter, 1),
        card(Category::Animal, 1),
        card(Category::Letter, 2),
        card(Category::Animal, 2),
        card(Category::Letter, 3),
        card(Category::Letter, 4),
    ])
    .unwrap();
    assert!(serde_json::from_str::<Deck>(&unpaired).is_err());

    let paired = serde_json::to_string(&vec![
        card(Category::Letter, 1),
        card(Category::Animal, 1),
        card(Category::Letter, 2),
        card(Category::Animal, 2),
        card(Category::Letter, 3),
        card(Category::Animal, 3),
    ])
    .unwrap();
    let deck: Deck = serde_json::from_str(&paired).unwrap();
    let mut game = MatchSession::with_deck(MatchConfig::default(), deck, 1, ()).unwrap();
    for (letter, animal) in [(0, 1), (2, 3), (4, 5)] {
        game.click(letter);
        game.click(animal);
    }
    game.advance(2000);
    assert!(game.state().is_complete());
}

/// Explicit decks may only use keys from the configured pool.
#[test]
fn test_with_deck_checks_pool() {
    let deck = |keys: [u8; 3]| {
        Deck::from_cards(keys.iter().flat_map(|&k| [card(Category::Letter, k), card(Category::Animal, k)]))
            .unwrap()
    };

    let result = MatchSession::with_deck(MatchConfig::default(), deck([1, 2, 40]), 1, ());
    assert!(matches!(
        result,
        Err(ConfigError::KeyOutsidePool { key: PairKey(40), pool_size: 22 })
    ));
    assert!(MatchSession::with_deck(MatchConfig::default(), deck([0, 1, 2]), 1, ()).is_err());

    let config = MatchConfig::default().with_pool_size(40);
    assert!(MatchSession::with_deck(config, deck([1, 2, 40]), 1, ()).is_ok());
}
