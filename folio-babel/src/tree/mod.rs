//! Canonical document tree shared by every codec.
//!
//! This is the value the downstream editor consumes and produces. Codecs build a fresh tree on
//! every parse and only read it on serialization, so nothing here is ever mutated behind a
//! shared reference.
//!
//! The wire shape (see [`nodes`]) is compatibility critical: every node carries an `object`
//! discriminant (`"document"`, `"block"`, `"inline"` or `"text"`) and field names match the
//! editor's schema one-for-one.

pub mod nodes;
mod tagged;

pub use nodes::{Block, Data, Document, Inline, Node, Text, Value, PARAGRAPH_TYPE};
