//! Effects produced by state transitions

use super::message::MessageId;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Push the new state to observers
    PublishSnapshot,

    /// Send the query through the request gateway (spawns as background task)
    Dispatch { turn: MessageId, query: String },
}

impl Effect {
    pub fn dispatch(turn: MessageId, query: impl Into<String>) -> Self {
        Effect::Dispatch {
            turn,
            query: query.into(),
        }
    }
}
