//! Core dialog state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! flows are explicit tagged states, suspension points carry their saved
//! arguments, and every transition returns effects for the runtime to run.

pub mod interpret;
pub mod timeframe;

mod effect;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{Card, Effect, Reply};
pub use event::Event;
pub use state::{ConvState, DialogState, HistoryFlow, QueryFlow, Slots, TurnContext};
pub use transition::{transition, Transition, TransitionError};
