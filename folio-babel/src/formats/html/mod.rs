//! HTML format implementation
//!
//! This module implements bidirectional conversion between HTML fragments and the canonical
//! tree.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `markup5ever_rcdom` pair for parsing:
//! - `html5ever`: Browser-grade HTML5 parser from the Servo project
//! - `markup5ever_rcdom`: Reference-counted DOM tree implementation
//!
//! The parser handles malformed markup the way browsers do, so the codec never has to reject
//! parseable input. Serialization is a direct string walk (see `serializer.rs`), since the
//! output format (`<tag attrs>children</tag>`, text verbatim) is fixed by the editor contract
//! rather than by HTML serialization rules.
//!
//! # Element Mapping
//!
//! Everything is table driven (see [`tables`]):
//!
//! | HTML                          | Canonical tree                                   |
//! |-------------------------------|--------------------------------------------------|
//! | top-level element             | Block, type from `elements` (fallback `p`)       |
//! | child in `block_elements`     | nested Block                                     |
//! | child in `inline_elements`    | Inline with text-only children                   |
//! | any other child with text     | Text leaves, marked from `mark_elements`         |
//! | `<ol type="a">`               | Block typed by key `ola`                         |
//! | element attributes            | `data`, in source order                          |
//! | `<br>`                        | `\n` inside text                                 |
//!
//! # Lossy Conversions
//!
//! - Marks nested deeper than one level below a text-bearing child are lost on import.
//! - Marks are not written on export.
//! - Whitespace-only children of blocks are dropped on import.
//! - Types shared by several keys export with the first declared key.
//! - Entities are decoded on import and text is written verbatim on export.
//! - Ordered-list variants get a synthesized `type` attribute on export only when `data` has
//!   no `type` of its own; an existing `type` is written as is and wins.

mod parser;
mod serializer;
pub mod tables;

pub use parser::parse_from_html;
pub use serializer::{serialize_document, serialize_text, serialize_to_html};
pub use tables::{ElementTable, HtmlTables, TableOverrides};

use crate::error::FormatError;
use crate::format::Format;
use crate::tree::{Document, Value};

/// Parse HTML markup with the given lookup tables.
pub fn deserialize(markup: &str, tables: &HtmlTables) -> Result<Document, FormatError> {
    parse_from_html(markup, tables)
}

/// Serialize an editor value to HTML with the given lookup tables.
pub fn serialize(value: &Value, tables: &HtmlTables) -> String {
    serialize_to_html(value, tables)
}

/// Format implementation for HTML
#[derive(Debug, Clone, Default)]
pub struct HtmlFormat {
    tables: HtmlTables,
}

impl HtmlFormat {
    /// Create an HTML format driven by the given lookup tables
    pub fn new(tables: HtmlTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &HtmlTables {
        &self.tables
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML fragments mapped through the element lookup tables"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Value, FormatError> {
        parse_from_html(source, &self.tables).map(Value::new)
    }

    fn serialize(&self, value: &Value) -> Result<String, FormatError> {
        Ok(serialize_to_html(value, &self.tables))
    }
}
