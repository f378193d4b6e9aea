//! Events that can occur in a session

use super::message::MessageId;
use crate::answer::Answer;
use crate::gateway::FailureReason;
use chrono::{DateTime, Utc};

/// Events that trigger state transitions
///
/// Identifiers and timestamps are minted by the sender so that `transition`
/// stays pure.
#[derive(Debug, Clone)]
pub enum Event {
    /// The input collaborator submitted text
    Submit {
        text: String,
        user_message_id: MessageId,
        placeholder_id: MessageId,
        at: DateTime<Utc>,
    },

    /// The gateway settled with an answer
    AnswerReceived {
        /// Placeholder id of the turn being resolved
        turn: MessageId,
        answer: Answer,
        message_id: MessageId,
        at: DateTime<Utc>,
    },

    /// The gateway settled with a failure
    AnswerFailed {
        turn: MessageId,
        reason: FailureReason,
        message_id: MessageId,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Map a gateway result onto the matching resolution event
    pub fn resolution(turn: MessageId, result: Result<Answer, FailureReason>) -> Self {
        let message_id = MessageId::generate();
        let at = Utc::now();
        match result {
            Ok(answer) => Event::AnswerReceived {
                turn,
                answer,
                message_id,
                at,
            },
            Err(reason) => Event::AnswerFailed {
                turn,
                reason,
                message_id,
                at,
            },
        }
    }
}
