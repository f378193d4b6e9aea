//! Common types for answer requests

use serde::{Deserialize, Serialize};

/// Per-request knobs passed through to the answerer
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOptions {
    /// Restrict retrieval to one named document
    pub document_scope: Option<String>,
    /// Sampling temperature in `[0, 1]`; lower is more deterministic
    pub temperature: f32,
}

impl Default for AnswerOptions {
    fn default() -> Self {
        Self {
            document_scope: None,
            temperature: 0.3,
        }
    }
}

impl AnswerOptions {
    pub fn new(document_scope: Option<String>, temperature: f32) -> Self {
        Self {
            document_scope,
            temperature: temperature.clamp(0.0, 1.0),
        }
    }
}

/// Citation record returned alongside an answer.
///
/// The shape is owned by the answering service; it is carried but never
/// interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Source(pub serde_json::Value);

/// A resolved answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    #[serde(default)]
    pub sources: Vec<Source>,
    /// Link that reopens this exchange through the bootstrap parameter
    #[serde(default)]
    pub context_locator: Option<String>,
}

impl Answer {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: vec![],
            context_locator: None,
        }
    }

    #[must_use]
    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = sources;
        self
    }

    #[must_use]
    pub fn with_context_locator(mut self, locator: impl Into<String>) -> Self {
        self.context_locator = Some(locator.into());
        self
    }
}
