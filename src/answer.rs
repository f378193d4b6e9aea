//! Answer provider abstraction
//!
//! One interface over the remote document-grounded answerer and the legacy
//! keyword responder, so the session engine never cares which one it talks to.

mod error;
mod http;
mod keyword;
mod types;

pub use error::{AnswerError, AnswerErrorKind};
pub use http::HttpAnswerer;
pub use keyword::{KeywordAnswerer, DEFAULT_KEYWORD_LATENCY};
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for answering strategies
#[async_trait]
pub trait Answerer: Send + Sync {
    /// Produce an answer for a single query
    async fn answer(&self, query: &str, options: &AnswerOptions) -> Result<Answer, AnswerError>;

    /// Short name used in logs
    fn strategy(&self) -> &str;
}

#[async_trait]
impl<T: Answerer + ?Sized> Answerer for Arc<T> {
    async fn answer(&self, query: &str, options: &AnswerOptions) -> Result<Answer, AnswerError> {
        (**self).answer(query, options).await
    }

    fn strategy(&self) -> &str {
        (**self).strategy()
    }
}

/// Logging wrapper for answerers
pub struct LoggingAnswerer {
    inner: Arc<dyn Answerer>,
    strategy: String,
}

impl LoggingAnswerer {
    pub fn new(inner: Arc<dyn Answerer>) -> Self {
        let strategy = inner.strategy().to_string();
        Self { inner, strategy }
    }
}

#[async_trait]
impl Answerer for LoggingAnswerer {
    async fn answer(&self, query: &str, options: &AnswerOptions) -> Result<Answer, AnswerError> {
        let start = std::time::Instant::now();
        let result = self.inner.answer(query, options).await;
        let duration = start.elapsed();

        match &result {
            Ok(answer) => {
                tracing::info!(
                    strategy = %self.strategy,
                    duration_ms = %duration.as_millis(),
                    answer_chars = answer.text.chars().count(),
                    sources = answer.sources.len(),
                    "Answer request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    strategy = %self.strategy,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    "Answer request failed"
                );
            }
        }

        result
    }

    fn strategy(&self) -> &str {
        &self.strategy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    #[async_trait]
    impl Answerer for Fixed {
        async fn answer(&self, query: &str, _options: &AnswerOptions) -> Result<Answer, AnswerError> {
            if query == "fail" {
                Err(AnswerError::network("down"))
            } else {
                Ok(Answer::text(format!("echo: {query}")))
            }
        }

        fn strategy(&self) -> &str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_logging_wrapper_passes_results_through() {
        let logged = LoggingAnswerer::new(Arc::new(Fixed));
        assert_eq!(logged.strategy(), "fixed");

        let answer = logged.answer("hola", &AnswerOptions::default()).await.unwrap();
        assert_eq!(answer.text, "echo: hola");

        let err = logged.answer("fail", &AnswerOptions::default()).await.unwrap_err();
        assert_eq!(err.kind, AnswerErrorKind::Network);
    }
}
