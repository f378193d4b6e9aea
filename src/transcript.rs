//! Terminal rendering of the transcript

use crate::format::{format, plain_text, ContentBlock, TextSpan};
use crate::session::{Message, MessageId, SessionState};
use colored::Colorize;
use std::collections::HashSet;

/// Shown while the placeholder is pending
pub const TYPING_INDICATOR: &str = "…";

/// Turns snapshots into printable lines, emitting each message once
pub struct TranscriptPrinter {
    assistant_label: String,
    styled: bool,
    printed: HashSet<MessageId>,
    typing_for: Option<MessageId>,
}

impl TranscriptPrinter {
    pub fn new(assistant_label: impl Into<String>, styled: bool) -> Self {
        Self {
            assistant_label: assistant_label.into(),
            styled,
            printed: HashSet::new(),
            typing_for: None,
        }
    }

    /// Lines for everything in `state` not printed yet
    pub fn render_new(&mut self, state: &SessionState) -> Vec<String> {
        let mut lines = Vec::new();
        for message in &state.messages {
            if message.pending {
                if self.typing_for.as_ref() != Some(&message.id) {
                    self.typing_for = Some(message.id.clone());
                    lines.push(format!("{}: {TYPING_INDICATOR}", self.assistant_label));
                }
                continue;
            }
            if self.printed.insert(message.id.clone()) {
                lines.extend(self.render_message(message));
            }
        }
        lines
    }

    pub fn render_message(&self, message: &Message) -> Vec<String> {
        let label = if message.is_user() {
            "Tú"
        } else {
            self.assistant_label.as_str()
        };
        let mut lines = vec![format!("{label}:")];
        lines.extend(format(&message.content).iter().map(|b| self.render_block(b)));
        if let Some(locator) = &message.context_locator {
            lines.push(format!("  ↪ {locator}"));
        }
        lines
    }

    pub fn render_block(&self, block: &ContentBlock) -> String {
        match block {
            ContentBlock::Paragraph { spans } => format!("  {}", self.render_spans(spans)),
            ContentBlock::AlertHeader { spans } => format!("  ⚠ {}", self.render_spans(spans)),
            ContentBlock::NumberedItem {
                index,
                title,
                description,
            } => {
                let title = self.render_spans(title);
                if description.is_empty() {
                    format!("    {index}. {title}")
                } else {
                    format!("    {index}. {title}: {}", self.render_spans(description))
                }
            }
        }
    }

    fn render_spans(&self, spans: &[TextSpan]) -> String {
        if !self.styled {
            return plain_text(spans);
        }
        spans
            .iter()
            .map(|span| match span {
                TextSpan::Plain(t) => t.clone(),
                TextSpan::Emphasized(t) => t.bold().to_string(),
            })
            .collect()
    }
}
