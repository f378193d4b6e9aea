//! Answer error types

use thiserror::Error;

/// Answer error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AnswerError {
    pub kind: AnswerErrorKind,
    pub message: String,
}

impl AnswerError {
    pub fn new(kind: AnswerErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AnswerErrorKind::Network, message)
    }

    pub fn status(status: u16, detail: impl AsRef<str>) -> Self {
        Self::new(
            AnswerErrorKind::Status(status),
            format!("HTTP {status}: {}", detail.as_ref()),
        )
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(AnswerErrorKind::Decode, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(AnswerErrorKind::Unknown, message)
    }
}

impl From<reqwest::Error> for AnswerError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::decode(e.to_string())
        } else if let Some(status) = e.status() {
            Self::status(status.as_u16(), e.to_string())
        } else {
            Self::network(e.to_string())
        }
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerErrorKind {
    /// Connection refused, DNS, TLS, dropped connection
    Network,
    /// Service answered with a non-success status
    Status(u16),
    /// Response body did not match the expected shape
    Decode,
    Unknown,
}
