//! Core data structures for the canonical tree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::tagged;

/// Semantic type used for the empty state and for plain-text paragraphs.
pub const PARAGRAPH_TYPE: &str = "paragraph";

/// Element attributes carried on blocks and inlines. Insertion order is the source order.
pub type Data = IndexMap<String, String>;

/// The editor value: a wrapper that may or may not hold a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Value {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
}

impl Value {
    pub fn new(document: Document) -> Self {
        Self {
            document: Some(document),
        }
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        Value::new(document)
    }
}

/// Represents the root of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object", rename = "document")]
pub struct Document {
    #[serde(with = "tagged::blocks")]
    pub children: Vec<Block>,
}

impl Document {
    pub fn new(children: Vec<Block>) -> Self {
        Self { children }
    }

    /// The document returned for absent or blank input: one paragraph holding one empty text.
    pub fn empty_state() -> Self {
        Self::new(vec![Block::new(
            PARAGRAPH_TYPE,
            vec![Node::Text(Text::new(""))],
        )])
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty_state()
    }
}

/// A node that can appear in a block's children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object", rename_all = "lowercase")]
pub enum Node {
    Block(Block),
    Inline(Inline),
    Text(Text),
}

impl Node {
    /// Concatenated text of every leaf below this node, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Node::Block(block) => block.children.iter().for_each(|child| child.push_text(out)),
            Node::Inline(inline) => inline
                .children
                .iter()
                .for_each(|text| out.push_str(&text.text)),
            Node::Text(text) => out.push_str(&text.text),
        }
    }

    /// First text leaf reached by following first children.
    pub fn first_text(&self) -> Option<&Text> {
        match self {
            Node::Block(block) => block.first_text(),
            Node::Inline(inline) => inline.children.first(),
            Node::Text(text) => Some(text),
        }
    }
}

impl From<Block> for Node {
    fn from(block: Block) -> Self {
        Node::Block(block)
    }
}

impl From<Inline> for Node {
    fn from(inline: Inline) -> Self {
        Node::Inline(inline)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

/// Represents a structural element such as a paragraph, list or table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Data,
    pub children: Vec<Node>,
}

impl Block {
    pub fn new(kind: impl Into<String>, children: Vec<Node>) -> Self {
        Self::with_data(kind, Data::new(), children)
    }

    pub fn with_data(kind: impl Into<String>, data: Data, children: Vec<Node>) -> Self {
        Self {
            kind: kind.into(),
            data,
            children,
        }
    }

    pub fn first_text(&self) -> Option<&Text> {
        self.children.first().and_then(Node::first_text)
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}

/// Represents an inline element such as a link. Inline content is text only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inline {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Data,
    #[serde(with = "tagged::texts")]
    pub children: Vec<Text>,
}

impl Inline {
    pub fn new(kind: impl Into<String>, data: Data, children: Vec<Text>) -> Self {
        Self {
            kind: kind.into(),
            data,
            children,
        }
    }
}

/// A text leaf. Marks are boolean flags serialized next to `text`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
    #[serde(flatten)]
    pub marks: BTreeMap<String, bool>,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: BTreeMap::new(),
        }
    }

    pub fn with_marks<I, S>(text: impl Into<String>, marks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            marks: marks.into_iter().map(|mark| (mark.into(), true)).collect(),
        }
    }

    pub fn has_mark(&self, mark: &str) -> bool {
        self.marks.get(mark).copied().unwrap_or(false)
    }

    /// Names of the marks set on this leaf, sorted.
    pub fn active_marks(&self) -> impl Iterator<Item = &str> {
        self.marks
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str())
    }
}
