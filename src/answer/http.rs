//! Document-grounded answerer backed by the query service

use super::types::{Answer, AnswerOptions, Source};
use super::{AnswerError, Answerer};
use crate::bootstrap::CONTEXT_PARAM;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

/// HTTP answerer talking to `POST {base}/query`
pub struct HttpAnswerer {
    client: Client,
    query_url: Url,
    share_url: Option<Url>,
}

impl HttpAnswerer {
    pub fn new(client: Client, base_url: &Url, share_url: Option<Url>) -> Result<Self, AnswerError> {
        let query_url = base_url
            .join("query")
            .map_err(|e| AnswerError::unknown(format!("Invalid API URL {base_url}: {e}")))?;
        Ok(Self {
            client,
            query_url,
            share_url,
        })
    }

    /// Build a link that reopens `text` as the first message of a new session
    fn context_locator(&self, text: &str) -> Option<String> {
        let mut url = self.share_url.clone()?;
        url.query_pairs_mut().append_pair(CONTEXT_PARAM, text);
        Some(url.into())
    }

    fn classify_error(status: StatusCode, body: &str) -> AnswerError {
        // FastAPI-style `{"detail": "..."}` bodies carry the useful part
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .map_or_else(
                || body.trim().to_string(),
                |b| match b.detail {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                },
            );
        AnswerError::status(status.as_u16(), detail)
    }
}

#[async_trait]
impl Answerer for HttpAnswerer {
    async fn answer(&self, query: &str, options: &AnswerOptions) -> Result<Answer, AnswerError> {
        let request = QueryRequest {
            text: query,
            document_name: options.document_scope.as_deref(),
            temperature: options.temperature,
        };

        let response = self
            .client
            .post(self.query_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    AnswerError::network(format!("Connection failed: {e}"))
                } else {
                    AnswerError::from(e)
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnswerError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_error(status, &body));
        }

        let parsed: QueryResponse = serde_json::from_str(&body)
            .map_err(|e| AnswerError::decode(format!("Failed to parse response: {e} - body: {body}")))?;

        let mut answer = Answer::text(parsed.answer).with_sources(parsed.sources);
        if let Some(locator) = self.context_locator(&answer.text) {
            answer = answer.with_context_locator(locator);
        }
        Ok(answer)
    }

    fn strategy(&self) -> &str {
        "http"
    }
}

// Query service wire types

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    document_name: Option<&'a str>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    answer: String,
    #[serde(default)]
    sources: Vec<Source>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}
