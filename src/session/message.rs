//! Transcript message types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque message identifier, unique within a session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    /// Empty while `pending`
    pub content: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    /// True only for the typing placeholder of an in-flight request
    pub pending: bool,
    /// Link that reopens this answer in a new session, when the answerer provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_locator: Option<String>,
}

impl Message {
    pub fn user(id: MessageId, content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            content: content.into(),
            role: Role::User,
            created_at,
            pending: false,
            context_locator: None,
        }
    }

    pub fn assistant(id: MessageId, content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            content: content.into(),
            role: Role::Assistant,
            created_at,
            pending: false,
            context_locator: None,
        }
    }

    /// Typing placeholder for an in-flight request
    pub fn placeholder(id: MessageId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            content: String::new(),
            role: Role::Assistant,
            created_at,
            pending: true,
            context_locator: None,
        }
    }

    #[must_use]
    pub fn with_context_locator(mut self, locator: Option<String>) -> Self {
        self.context_locator = locator;
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
