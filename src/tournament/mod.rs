//! Турнирный слой: машина состояний, генерация брекетов, события.

pub mod bracket;
pub mod events;
pub mod state_machine;

pub use bracket::{BracketAssignment, BracketScheduler};
pub use events::TournamentEvent;
pub use state_machine::{NextRoundOutcome, TournamentStateMachine};
