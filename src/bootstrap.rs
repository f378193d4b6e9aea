//! Session seeding from a startup locator
//!
//! A locator may carry an answer from a previous exchange in its `data`
//! parameter. The payload becomes the first message of the new session and
//! the parameter is then removed so a reload starts from the greeting.

mod decode;
mod locator;

pub use decode::{decode_component, DecodeError};
pub use locator::UrlContextSource;

use crate::session::{Message, MessageId};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Locator parameter carrying the seed payload
pub const CONTEXT_PARAM: &str = "data";

/// Assistant greeting used when no usable payload is present
pub const GREETING_TEXT: &str = "¡Hola! Soy tu asistente. Estoy aquí para ayudarte con información sobre química, sostenibilidad, productos e innovación. ¿En qué puedo ayudarte hoy?";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BootstrapError {
    #[error("malformed context payload: {0}")]
    MalformedContext(#[from] DecodeError),
    #[error("invalid locator {locator:?}: {reason}")]
    InvalidLocator { locator: String, reason: String },
}

/// Access to the ambient locator
pub trait ContextSource {
    /// Raw (still percent-encoded) value of `param`, first occurrence wins
    fn raw_param(&self, param: &str) -> Option<String>;

    /// Remove `param` in place, leaving everything else untouched.
    /// Must be a no-op when the parameter is absent.
    fn remove_param(&mut self, param: &str);
}

/// A session started without a locator has no context
impl<S: ContextSource> ContextSource for Option<S> {
    fn raw_param(&self, param: &str) -> Option<String> {
        self.as_ref()?.raw_param(param)
    }

    fn remove_param(&mut self, param: &str) {
        if let Some(source) = self {
            source.remove_param(param);
        }
    }
}

/// Seeds a session from a `ContextSource`, then scrubs it
pub struct BootstrapContext<S: ContextSource> {
    source: S,
}

impl<S: ContextSource> BootstrapContext<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Decoded payload, if present and non-blank
    pub fn payload(&self) -> Result<Option<String>, BootstrapError> {
        let Some(raw) = self.source.raw_param(CONTEXT_PARAM) else {
            return Ok(None);
        };
        let decoded = decode_component(&raw)?;
        if decoded.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(decoded))
        }
    }

    /// Initial transcript: the carried-over answer, or the greeting
    pub fn seed(&self, at: DateTime<Utc>) -> Vec<Message> {
        let text = match self.payload() {
            Ok(Some(text)) => {
                tracing::info!(chars = text.chars().count(), "Seeding session from locator context");
                text
            }
            Ok(None) => GREETING_TEXT.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring locator context, falling back to greeting");
                GREETING_TEXT.to_string()
            }
        };
        vec![Message::assistant(MessageId::generate(), text, at)]
    }

    /// Drop the context parameter so it is consumed exactly once
    pub fn scrub(&mut self) {
        self.source.remove_param(CONTEXT_PARAM);
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
