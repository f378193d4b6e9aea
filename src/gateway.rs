//! Deadline-bounded dispatch of a single query
//!
//! Every dispatch settles exactly once: with the answer, with the upstream
//! failure, or with `Timeout` when the deadline fires first. On timeout the
//! in-flight answer future is dropped, so a late result can never surface.

use crate::answer::{Answer, AnswerError, AnswerOptions, Answerer};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Default bound on user-perceived hang time
pub const DEFAULT_DEADLINE: Duration = Duration::from_millis(30_000);

/// Why a dispatch did not produce an answer
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FailureReason {
    #[error("no answer within {deadline_ms} ms")]
    Timeout { deadline_ms: u64 },
    #[error("answer service failed: {details}")]
    Upstream { details: String },
}

impl FailureReason {
    pub fn timeout(deadline: Duration) -> Self {
        FailureReason::Timeout {
            deadline_ms: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl From<AnswerError> for FailureReason {
    fn from(e: AnswerError) -> Self {
        FailureReason::Upstream { details: e.message }
    }
}

/// Outcome of racing a future against a deadline
#[derive(Debug, PartialEq, Eq)]
pub enum Race<T> {
    Settled(T),
    Elapsed,
}

/// Race `operation` against a timer. The loser is dropped.
///
/// `biased` polling means an operation that is already complete wins even if
/// the timer is also ready on the same poll.
pub async fn race_against_deadline<F: Future>(operation: F, deadline: Duration) -> Race<F::Output> {
    tokio::select! {
        biased;

        output = operation => Race::Settled(output),
        () = tokio::time::sleep(deadline) => Race::Elapsed,
    }
}

/// Wraps an answerer with a deadline and normalizes its result
pub struct RequestGateway<A: Answerer + ?Sized> {
    answerer: Arc<A>,
    options: AnswerOptions,
}

impl<A: Answerer + ?Sized> Clone for RequestGateway<A> {
    fn clone(&self) -> Self {
        Self {
            answerer: Arc::clone(&self.answerer),
            options: self.options.clone(),
        }
    }
}

impl<A: Answerer + ?Sized> RequestGateway<A> {
    pub fn new(answerer: Arc<A>, options: AnswerOptions) -> Self {
        Self { answerer, options }
    }

    /// Dispatch one query, settling exactly once
    pub async fn dispatch(&self, query: &str, deadline: Duration) -> Result<Answer, FailureReason> {
        match race_against_deadline(self.answerer.answer(query, &self.options), deadline).await {
            Race::Settled(Ok(answer)) => Ok(answer),
            Race::Settled(Err(e)) => {
                tracing::warn!(error = %e, kind = ?e.kind, "Answerer rejected query");
                Err(e.into())
            }
            Race::Elapsed => {
                tracing::warn!(
                    deadline_ms = %deadline.as_millis(),
                    "Answer deadline elapsed, abandoning request"
                );
                Err(FailureReason::timeout(deadline))
            }
        }
    }
}
