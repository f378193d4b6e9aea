//! Structured content formatter
//!
//! Turns loosely marked-up answer text into display blocks. Callout sections
//! start at `**Alert…` or `**Recommendation…` (Spanish spellings included);
//! inside a callout, `1. **Title** description` lines become numbered items.
//! Anything that does not match degrades to paragraphs, so no text is lost.

mod inline;
#[cfg(test)]
mod proptests;

pub use inline::{parse_inline, TextSpan};

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static CALLOUT_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*\*(?:alert|recommendation|recomendaci[oó]n)").expect("callout pattern is valid")
});

/// Header run at the start of a callout, plus trailing punctuation
static CALLOUT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A\*\*[^*\n]+\*\*[:;.,!?]*").expect("header pattern is valid")
});

static ITEM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\s*\*\*").expect("boundary pattern is valid"));

static NUMBERED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A(\d+)\.\s*\*\*([^*\n]+)\*\*:?(.*)\z").expect("item pattern is valid")
});

/// Display block derived from message content. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Paragraph {
        spans: Vec<TextSpan>,
    },
    AlertHeader {
        spans: Vec<TextSpan>,
    },
    NumberedItem {
        index: u32,
        title: Vec<TextSpan>,
        description: Vec<TextSpan>,
    },
}

impl ContentBlock {
    fn paragraph(line: &str) -> Self {
        ContentBlock::Paragraph {
            spans: parse_inline(line),
        }
    }
}

/// Parse `raw` into display blocks. Pure and total.
pub fn format(raw: &str) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    let starts: Vec<usize> = CALLOUT_START.find_iter(raw).map(|m| m.start()).collect();

    let lead_end = starts.first().copied().unwrap_or(raw.len());
    push_paragraphs(&mut blocks, &raw[..lead_end]);

    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(raw.len());
        format_callout(&mut blocks, &raw[start..end]);
    }
    blocks
}

/// Concatenated text of a span list, markers stripped
pub fn plain_text(spans: &[TextSpan]) -> String {
    spans.iter().map(TextSpan::text).collect()
}

fn format_callout(blocks: &mut Vec<ContentBlock>, section: &str) {
    let Some(header) = CALLOUT_HEADER.find(section) else {
        push_paragraphs(blocks, section);
        return;
    };
    blocks.push(ContentBlock::AlertHeader {
        spans: parse_inline(header.as_str()),
    });

    let body = &section[header.end()..];
    let boundaries: Vec<usize> = ITEM_BOUNDARY
        .find_iter(body)
        .map(|m| m.start())
        .filter(|&at| at == 0 || body[..at].ends_with(char::is_whitespace))
        .collect();

    let intro_end = boundaries.first().copied().unwrap_or(body.len());
    push_paragraphs(blocks, &body[..intro_end]);

    for (i, &start) in boundaries.iter().enumerate() {
        let end = boundaries.get(i + 1).copied().unwrap_or(body.len());
        let piece = &body[start..end];
        match numbered_item(piece) {
            Some(item) => blocks.push(item),
            None => push_paragraphs(blocks, piece),
        }
    }
}

fn numbered_item(piece: &str) -> Option<ContentBlock> {
    let caps = NUMBERED_ITEM.captures(piece.trim_end())?;
    let index = caps.get(1)?.as_str().parse::<u32>().ok()?;
    let title = caps.get(2)?.as_str().trim();
    if title.is_empty() {
        return None;
    }
    let description = join_lines(caps.get(3)?.as_str());

    Some(ContentBlock::NumberedItem {
        index,
        title: vec![TextSpan::Emphasized(title.to_string())],
        description: parse_inline(&description),
    })
}

/// Non-blank lines, trimmed, joined by single spaces
fn join_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_paragraphs(blocks: &mut Vec<ContentBlock>, text: &str) {
    blocks.extend(
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(ContentBlock::paragraph),
    );
}
