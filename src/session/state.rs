//! Session state types

use super::message::{Message, MessageId};
use crate::gateway::FailureReason;
use serde::{Deserialize, Serialize};

/// Fixed user-facing text that replaces the placeholder when a turn fails
pub const APOLOGY_TEXT: &str =
    "Lo siento, ha ocurrido un error al procesar tu consulta. Por favor, inténtalo de nuevo.";

/// Where the session is within the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    /// Ready for user input
    Idle,
    /// One request in flight, placeholder shown
    AwaitingResponse,
}

/// Everything the presentation layer may observe
///
/// Invariants: at most one message is `pending`, and `awaiting_response`
/// holds exactly when one is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub messages: Vec<Message>,
    pub awaiting_response: bool,
    pub last_error: Option<FailureReason>,
    /// Ids of resolved placeholders; they left the log but stay taken
    #[serde(skip)]
    pub retired_ids: Vec<MessageId>,
}

impl SessionState {
    /// Start a session from bootstrap seed messages
    pub fn seeded(messages: Vec<Message>) -> Self {
        Self {
            messages,
            awaiting_response: false,
            last_error: None,
            retired_ids: Vec::new(),
        }
    }

    /// Whether `id` was ever used in this session
    pub fn id_taken(&self, id: &MessageId) -> bool {
        self.messages.iter().any(|m| &m.id == id) || self.retired_ids.contains(id)
    }

    pub fn phase(&self) -> TurnPhase {
        if self.awaiting_response {
            TurnPhase::AwaitingResponse
        } else {
            TurnPhase::Idle
        }
    }

    /// The typing placeholder, if a request is in flight
    pub fn pending(&self) -> Option<&Message> {
        self.messages.iter().find(|m| m.pending)
    }

    /// Messages that have settled, in display order
    pub fn settled_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| !m.pending)
    }

    /// Check the structural invariants
    pub fn is_consistent(&self) -> bool {
        let pending = self.messages.iter().filter(|m| m.pending).count();
        pending <= 1 && self.awaiting_response == (pending == 1)
    }
}
