//! Plain-text format implementation
//!
//! Paragraphs are runs of non-blank lines separated by one or more blank lines. Each run becomes
//! one paragraph block holding a single text leaf, with the run's lines joined by `\n`.
//!
//! Serialization takes the first text of every top-level block and joins them with `\n`. That
//! is deliberately not the inverse of parsing: a document parsed from two paragraphs serializes
//! without the blank line between them.

use crate::error::FormatError;
use crate::format::Format;
use crate::tree::{Block, Document, Node, Text, Value, PARAGRAPH_TYPE};
use log::debug;

/// Split text into paragraph blocks on blank-line boundaries.
pub fn deserialize(text: &str) -> Document {
    let mut paragraphs: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    if paragraphs.is_empty() {
        return Document::empty_state();
    }

    debug!("split plain text into {} paragraphs", paragraphs.len());
    Document::new(
        paragraphs
            .into_iter()
            .map(|lines| {
                Block::new(
                    PARAGRAPH_TYPE,
                    vec![Node::Text(Text::new(lines.join("\n")))],
                )
            })
            .collect(),
    )
}

/// Join the first text of each top-level block with newlines.
pub fn serialize(value: &Value) -> String {
    let Some(doc) = &value.document else {
        return String::new();
    };
    doc.children
        .iter()
        .map(|block| block.first_text().map(|t| t.text.as_str()).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format implementation for plain text
pub struct TextFormat;

impl Format for TextFormat {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Plain text, one paragraph per blank-line separated run"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Value, FormatError> {
        Ok(Value::new(deserialize(source)))
    }

    fn serialize(&self, value: &Value) -> Result<String, FormatError> {
        Ok(serialize(value))
    }
}
