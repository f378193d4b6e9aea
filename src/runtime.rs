//! Runtime for executing a session
//!
//! One task owns the `SessionState` and applies events strictly in arrival
//! order. Callers talk to it through a cloneable `SessionHandle`; observers
//! get every new state through a `watch` channel the moment it is applied.

mod executor;

#[cfg(test)]
pub mod testing;

pub use executor::SessionRuntime;

use crate::answer::Answerer;
use crate::gateway::RequestGateway;
use crate::report::ConversationExport;
use crate::session::{Event, Message, MessageId, SessionState, TransitionError};
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};

/// Immutable per-session configuration
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
    /// Bound on each gateway dispatch
    pub deadline: Duration,
}

impl SessionContext {
    pub fn new(deadline: Duration) -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            deadline,
        }
    }
}

/// The runtime task has stopped
#[derive(Debug, Error)]
#[error("session runtime has stopped")]
pub struct SessionClosed;

/// How the runtime treated a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// User message and placeholder appended; the request is in flight
    Accepted { turn: MessageId },
    /// Dropped without touching the transcript (busy, or blank text)
    Ignored(TransitionError),
}

/// An event plus an optional channel to report whether it was applied
#[derive(Debug)]
pub(crate) struct Envelope {
    pub event: Event,
    pub reply: Option<oneshot::Sender<Result<(), TransitionError>>>,
}

/// Handle to interact with a running session
#[derive(Clone)]
pub struct SessionHandle {
    event_tx: mpsc::Sender<Envelope>,
    snapshot_rx: watch::Receiver<SessionState>,
}

impl SessionHandle {
    /// Submit user text.
    ///
    /// Returns once the runtime has applied or ignored the submission; the
    /// answer itself arrives later through the snapshot channel.
    pub async fn submit(&self, text: impl Into<String>) -> Result<Submission, SessionClosed> {
        let turn = MessageId::generate();
        let event = Event::Submit {
            text: text.into(),
            user_message_id: MessageId::generate(),
            placeholder_id: turn.clone(),
            at: Utc::now(),
        };

        let (reply_tx, reply_rx) = oneshot::channel();
        self.event_tx
            .send(Envelope {
                event,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| SessionClosed)?;

        match reply_rx.await.map_err(|_| SessionClosed)? {
            Ok(()) => Ok(Submission::Accepted { turn }),
            Err(e) => Ok(Submission::Ignored(e)),
        }
    }

    /// Point-in-time copy of the session
    pub fn snapshot(&self) -> SessionState {
        self.snapshot_rx.borrow().clone()
    }

    /// Receive every state the runtime applies
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.snapshot_rx.clone()
    }

    /// Wait until no request is in flight
    pub async fn wait_until_idle(&self) -> Result<SessionState, SessionClosed> {
        let mut rx = self.snapshot_rx.clone();
        let state = rx
            .wait_for(|s| !s.awaiting_response)
            .await
            .map_err(|_| SessionClosed)?;
        Ok(state.clone())
    }

    /// Settled transcript for report generation
    pub fn export(&self, generated_at: DateTime<Utc>) -> ConversationExport {
        ConversationExport::from_state(&self.snapshot(), generated_at)
    }
}

/// Spawn a runtime seeded with `seed` and return its handle
pub fn start<A>(context: SessionContext, seed: Vec<Message>, gateway: RequestGateway<A>) -> SessionHandle
where
    A: Answerer + ?Sized + 'static,
{
    let (event_tx, event_rx) = mpsc::channel(32);
    let (snapshot_tx, snapshot_rx) = watch::channel(SessionState::seeded(seed));

    let runtime = SessionRuntime::new(context, gateway, event_rx, event_tx.downgrade(), snapshot_tx);
    tokio::spawn(runtime.run());

    SessionHandle {
        event_tx,
        snapshot_rx,
    }
}
