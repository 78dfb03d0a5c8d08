//! Request lifecycle state machine
//!
//! Elm-style: an owned state, a pure transition per event, and a list of
//! effects for the runtime to carry out.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{Phase, SessionContext};
pub use transition::{transition, TransitionError, TransitionResult, APOLOGY_TEXT, BANNER_TEXT};
