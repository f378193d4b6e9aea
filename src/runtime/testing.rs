//! Mock implementations for testing
//!
//! These mocks enable integration testing without real I/O.

use crate::answer::{Answer, AnswerError, AnswerOptions, Answerer};
use crate::report::{ConversationExport, ReportError, ReportGenerator};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// Mock Answerer
// ============================================================================

/// One scripted reply: settle with `result` after `delay`
pub struct MockReply {
    pub delay: Duration,
    pub result: Result<Answer, AnswerError>,
}

impl MockReply {
    pub fn after(delay: Duration, result: Result<Answer, AnswerError>) -> Self {
        Self { delay, result }
    }

    pub fn now(result: Result<Answer, AnswerError>) -> Self {
        Self::after(Duration::ZERO, result)
    }
}

/// Answerer that plays back queued replies in order
pub struct MockAnswerer {
    replies: Mutex<VecDeque<MockReply>>,
    /// Record of all queries received
    requests: Mutex<Vec<String>>,
    /// Calls that ran to completion, i.e. were not abandoned mid-delay
    pub completed: AtomicUsize,
}

impl MockAnswerer {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            completed: AtomicUsize::new(0),
        }
    }

    pub fn queue(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn recorded_queries(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Answerer for MockAnswerer {
    async fn answer(&self, query: &str, _options: &AnswerOptions) -> Result<Answer, AnswerError> {
        self.requests.lock().unwrap().push(query.to_string());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockReply::now(Err(AnswerError::network("No mock reply queued"))));

        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        reply.result
    }

    fn strategy(&self) -> &str {
        "mock"
    }
}

// ============================================================================
// Mock Report Generator
// ============================================================================

/// Report generator returning queued documents
pub struct MockReportGenerator {
    responses: Mutex<VecDeque<Result<Vec<u8>, ReportError>>>,
    /// Every export submitted for rendering
    pub requests: Mutex<Vec<ConversationExport>>,
}

impl MockReportGenerator {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_document(&self, bytes: impl Into<Vec<u8>>) {
        self.responses.lock().unwrap().push_back(Ok(bytes.into()));
    }

    pub fn queue_error(&self, error: ReportError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_exports(&self) -> Vec<ConversationExport> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportGenerator for MockReportGenerator {
    async fn generate(&self, export: &ConversationExport) -> Result<Vec<u8>, ReportError> {
        self.requests.lock().unwrap().push(export.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ReportError::Status(503)))
    }
}
