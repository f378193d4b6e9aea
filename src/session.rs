//! Conversation session state machine
//!
//! Elm-style: a pure `transition` over `SessionState` that returns the new
//! state plus the effects the runtime must carry out.

mod effect;
pub mod event;
mod message;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use message::{Message, MessageId, Role};
pub use state::{SessionState, TurnPhase, APOLOGY_TEXT};
pub use transition::{transition, TransitionError};
