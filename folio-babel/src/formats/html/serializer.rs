//! HTML serialization (canonical tree → HTML)
//!
//! A plain recursive walk: every block or inline becomes `<tag attrs>children</tag>`, text is
//! emitted verbatim and children are concatenated without separators. The tag comes from the
//! reverse element mapping, so when several keys share a type the first declared key is used.
//!
//! Ordered-list variants are keyed as `ol` plus a one-character discriminator (`ola`, `oli`).
//! Those are written back as `<ol type="a">` rather than as a made-up `<ola>` element.
//!
//! Marks are not written back. A text leaf marked bold serializes as its bare text, so HTML
//! carrying marks does not round-trip.

use super::tables::{HtmlTables, FALLBACK_TAG, ORDERED_LIST_TAG};
use crate::tree::{Block, Data, Document, Node, Value};
use log::warn;

/// Serialize an editor value. A value without a document serializes to an empty string.
pub fn serialize_to_html(value: &Value, tables: &HtmlTables) -> String {
    value
        .document
        .as_ref()
        .map(|doc| serialize_document(doc, tables))
        .unwrap_or_default()
}

/// Serialize a document: its blocks, concatenated.
pub fn serialize_document(doc: &Document, tables: &HtmlTables) -> String {
    doc.children
        .iter()
        .map(|block| serialize_block(block, tables))
        .collect()
}

/// Concatenate the text leaves of a document with no markup at all.
pub fn serialize_text(value: &Value) -> String {
    value
        .document
        .iter()
        .flat_map(|doc| doc.children.iter())
        .map(Block::text_content)
        .collect()
}

fn serialize_block(block: &Block, tables: &HtmlTables) -> String {
    let children: String = block
        .children
        .iter()
        .map(|child| serialize_node(child, tables))
        .collect();
    wrap_element(&block.kind, &block.data, &children, tables)
}

fn serialize_node(node: &Node, tables: &HtmlTables) -> String {
    match node {
        Node::Block(block) => serialize_block(block, tables),
        Node::Inline(inline) => {
            let children: String = inline.children.iter().map(|t| t.text.as_str()).collect();
            wrap_element(&inline.kind, &inline.data, &children, tables)
        }
        Node::Text(text) => text.text.clone(),
    }
}

fn wrap_element(kind: &str, data: &Data, children: &str, tables: &HtmlTables) -> String {
    let key = tables.elements().key_for(kind).unwrap_or_else(|| {
        warn!("no element declared for type '{kind}', writing <{FALLBACK_TAG}>");
        FALLBACK_TAG
    });

    let mut attrs: Vec<String> = data
        .iter()
        .map(|(name, value)| format!("{name}=\"{value}\""))
        .collect();

    let tag = match ordered_list_discriminator(key) {
        Some(discriminator) => {
            if !data.contains_key("type") {
                attrs.push(format!("type=\"{discriminator}\""));
            }
            ORDERED_LIST_TAG
        }
        None => key,
    };

    if attrs.is_empty() {
        format!("<{tag}>{children}</{tag}>")
    } else {
        format!("<{tag} {}>{children}</{tag}>", attrs.join(" "))
    }
}

/// `Some("a")` for `ola`; `None` for `ol` itself and for every other key.
fn ordered_list_discriminator(key: &str) -> Option<&str> {
    key.strip_prefix(ORDERED_LIST_TAG)
        .filter(|rest| rest.chars().count() == 1)
}
