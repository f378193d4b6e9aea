//! Pure state transition function
//!
//! Given the same state and event it always produces the same result, with no
//! I/O. The runtime owns the state and executes the returned effects.

use super::message::{Message, MessageId};
use super::state::APOLOGY_TEXT;
use super::{Effect, Event, SessionState};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Events the state machine refuses. None of these are user-facing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("a response is still pending, submission ignored")]
    Busy,
    #[error("empty submission ignored")]
    EmptySubmission,
    #[error("resolution for turn {0} does not match the pending placeholder")]
    StaleResolution(MessageId),
    #[error("message id {0} is already in use")]
    DuplicateId(MessageId),
}

impl TransitionError {
    /// Rejected user input, as opposed to an internal ordering problem
    pub fn is_invalid_submission(&self) -> bool {
        matches!(self, TransitionError::Busy | TransitionError::EmptySubmission)
    }
}

/// Pure transition function
pub fn transition(state: &SessionState, event: Event) -> Result<TransitionResult, TransitionError> {
    match event {
        // Idle + Submit -> AwaitingResponse
        Event::Submit {
            text,
            user_message_id,
            placeholder_id,
            at,
        } => {
            if state.awaiting_response {
                return Err(TransitionError::Busy);
            }
            let text = text.trim();
            if text.is_empty() {
                return Err(TransitionError::EmptySubmission);
            }
            ensure_fresh(state, &user_message_id)?;
            ensure_fresh(state, &placeholder_id)?;
            if user_message_id == placeholder_id {
                return Err(TransitionError::DuplicateId(placeholder_id));
            }

            let mut next = state.clone();
            next.messages.push(Message::user(user_message_id, text, at));
            next.awaiting_response = true;
            next.last_error = None;
            next.messages.push(Message::placeholder(placeholder_id.clone(), at));

            Ok(TransitionResult::new(next)
                .with_effect(Effect::PublishSnapshot)
                .with_effect(Effect::dispatch(placeholder_id, text)))
        }

        // AwaitingResponse + AnswerReceived -> Idle
        Event::AnswerReceived {
            turn,
            answer,
            message_id,
            at,
        } => {
            let reply = Message::assistant(message_id, answer.text, at)
                .with_context_locator(answer.context_locator);
            let mut next = resolve_turn(state, &turn, reply)?;
            next.last_error = None;
            Ok(TransitionResult::new(next).with_effect(Effect::PublishSnapshot))
        }

        // AwaitingResponse + AnswerFailed -> Idle, with apology
        Event::AnswerFailed {
            turn,
            reason,
            message_id,
            at,
        } => {
            let reply = Message::assistant(message_id, APOLOGY_TEXT, at);
            let mut next = resolve_turn(state, &turn, reply)?;
            next.last_error = Some(reason);
            Ok(TransitionResult::new(next).with_effect(Effect::PublishSnapshot))
        }
    }
}

// Helper functions

fn ensure_fresh(state: &SessionState, id: &MessageId) -> Result<(), TransitionError> {
    if state.id_taken(id) {
        Err(TransitionError::DuplicateId(id.clone()))
    } else {
        Ok(())
    }
}

/// Drop the placeholder for `turn` and append `reply` in its stead
fn resolve_turn(
    state: &SessionState,
    turn: &MessageId,
    reply: Message,
) -> Result<SessionState, TransitionError> {
    let is_current = state
        .pending()
        .is_some_and(|placeholder| &placeholder.id == turn);
    if !state.awaiting_response || !is_current {
        return Err(TransitionError::StaleResolution(turn.clone()));
    }
    ensure_fresh(state, &reply.id)?;

    let mut next = state.clone();
    next.messages.retain(|m| !m.pending);
    next.retired_ids.push(turn.clone());
    next.messages.push(reply);
    next.awaiting_response = false;
    Ok(next)
}
