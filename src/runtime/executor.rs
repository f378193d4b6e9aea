//! Session runtime executor

use super::{Envelope, SessionContext};
use crate::answer::Answerer;
use crate::gateway::RequestGateway;
use crate::session::{transition, Effect, Event, MessageId, SessionState, TransitionError};
use tokio::sync::{mpsc, watch};

/// Generic session runtime that can work with any answering strategy
pub struct SessionRuntime<A: Answerer + ?Sized + 'static> {
    context: SessionContext,
    state: SessionState,
    gateway: RequestGateway<A>,
    event_rx: mpsc::Receiver<Envelope>,
    /// Weak so the loop ends once every handle and in-flight dispatch is gone
    event_tx: mpsc::WeakSender<Envelope>,
    snapshot_tx: watch::Sender<SessionState>,
}

impl<A: Answerer + ?Sized + 'static> SessionRuntime<A> {
    pub(crate) fn new(
        context: SessionContext,
        gateway: RequestGateway<A>,
        event_rx: mpsc::Receiver<Envelope>,
        event_tx: mpsc::WeakSender<Envelope>,
        snapshot_tx: watch::Sender<SessionState>,
    ) -> Self {
        let state = snapshot_tx.borrow().clone();
        Self {
            context,
            state,
            gateway,
            event_rx,
            event_tx,
            snapshot_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(
            session_id = %self.context.session_id,
            seeded = self.state.messages.len(),
            deadline_ms = %self.context.deadline.as_millis(),
            "Starting session runtime"
        );

        while let Some(Envelope { event, reply }) = self.event_rx.recv().await {
            let outcome = self.process_event(event);
            if let Some(reply) = reply {
                let _ = reply.send(outcome);
            }
        }

        tracing::info!(session_id = %self.context.session_id, "Session runtime stopped");
    }

    fn process_event(&mut self, event: Event) -> Result<(), TransitionError> {
        let result = match transition(&self.state, event) {
            Ok(r) => r,
            Err(e) => {
                if e.is_invalid_submission() {
                    tracing::debug!(reason = %e, "Submission ignored");
                } else {
                    tracing::warn!(error = %e, "Discarding event");
                }
                return Err(e);
            }
        };

        self.state = result.new_state;
        debug_assert!(self.state.is_consistent(), "transition broke invariants");
        tracing::debug!(
            phase = ?self.state.phase(),
            messages = self.state.messages.len(),
            last_error = ?self.state.last_error,
            "Applied event"
        );

        for effect in result.effects {
            self.execute_effect(effect);
        }
        Ok(())
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::PublishSnapshot => {
                // Synchronous: observers see the state before the next event is applied
                self.snapshot_tx.send_replace(self.state.clone());
            }

            Effect::Dispatch { turn, query } => self.spawn_dispatch(turn, query),
        }
    }

    /// Run the gateway in the background and feed its single outcome back in
    fn spawn_dispatch(&self, turn: MessageId, query: String) {
        let Some(event_tx) = self.event_tx.upgrade() else {
            tracing::warn!(turn = %turn, "Session closing, dropping dispatch");
            return;
        };
        let gateway = self.gateway.clone();
        let deadline = self.context.deadline;
        let session_id = self.context.session_id.clone();

        tokio::spawn(async move {
            tracing::info!(session_id = %session_id, turn = %turn, "Dispatching query");
            let result = gateway.dispatch(&query, deadline).await;
            let event = Event::resolution(turn, result);
            if event_tx.send(Envelope { event, reply: None }).await.is_err() {
                tracing::debug!(session_id = %session_id, "Session gone before resolution");
            }
        });
    }
}
