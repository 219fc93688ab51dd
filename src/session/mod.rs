//! Game sessions.
//!
//! `MatchSession` ties the pure rules to time and to the outside world:
//! it schedules the delayed transitions, cancels them on a new game, and
//! reports state changes and side-effect cues to a `GameListener`.

mod event;
mod listener;
mod match_session;

pub use event::GameEvent;
pub use listener::GameListener;
pub use match_session::MatchSession;
