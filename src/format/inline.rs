//! Inline emphasis

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Paired `**…**` with a non-empty body and no `*` inside
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("emphasis pattern is valid"));

/// A run of text with uniform styling
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum TextSpan {
    Plain(String),
    Emphasized(String),
}

impl TextSpan {
    pub fn text(&self) -> &str {
        match self {
            TextSpan::Plain(t) | TextSpan::Emphasized(t) => t,
        }
    }
}

/// Split `text` into plain and emphasized spans, pairing markers left to right.
///
/// Unmatched markers stay in the plain text. Empty input yields no spans.
pub fn parse_inline(text: &str) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in EMPHASIS.captures_iter(text) {
        let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > cursor {
            spans.push(TextSpan::Plain(text[cursor..whole.start()].to_string()));
        }
        spans.push(TextSpan::Emphasized(body.as_str().to_string()));
        cursor = whole.end();
    }

    if cursor < text.len() {
        spans.push(TextSpan::Plain(text[cursor..].to_string()));
    }
    spans
}

/// Inverse of `parse_inline`
#[cfg(test)]
pub fn to_markup(spans: &[TextSpan]) -> String {
    spans
        .iter()
        .map(|span| match span {
            TextSpan::Plain(t) => t.clone(),
            TextSpan::Emphasized(t) => format!("**{t}**"),
        })
        .collect()
}
