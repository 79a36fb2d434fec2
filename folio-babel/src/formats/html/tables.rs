//! Lookup tables driving the HTML codec
//!
//! Four independent tables decide how an element is converted:
//!
//! - `elements`: element key → semantic type. The key is the tag name, optionally followed by
//!   the element's `type` attribute (`<ol type="a">` looks up `ola`). The `p` entry is the
//!   fallback for every miss and must be present.
//! - `block_elements`: tags converted into nested blocks.
//! - `inline_elements`: tags converted into inline nodes.
//! - `mark_elements`: tag → mark name set on text leaves.
//!
//! Declaration order of `elements` is part of the contract: several keys may share one type,
//! and serialization picks the first key declared for a type. That reverse mapping is
//! computed once when the table is built.

use crate::error::FormatError;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// Tag whose entry is used whenever an element lookup misses.
pub const FALLBACK_TAG: &str = "p";

/// Base tag shared by ordered-list variants (`ol`, `ola`, `oli`, ...).
pub const ORDERED_LIST_TAG: &str = "ol";

pub const DEFAULT_IMAGE_TYPE: &str = "image";

pub const DEFAULT_ELEMENTS: &[(&str, &str)] = &[
    ("p", "paragraph"),
    ("h1", "heading-one"),
    ("h2", "heading-two"),
    ("h3", "heading-three"),
    ("h4", "heading-four"),
    ("h5", "heading-five"),
    ("h6", "heading-six"),
    ("blockquote", "block-quote"),
    ("pre", "code-block"),
    ("hr", "divider"),
    ("ul", "bulleted-list"),
    ("ol", "ordered-list"),
    ("ol1", "ordered-list"),
    ("ola", "alpha-ordered-list"),
    ("olA", "upper-alpha-ordered-list"),
    ("oli", "roman-ordered-list"),
    ("olI", "upper-roman-ordered-list"),
    ("li", "list-item"),
    ("table", "table"),
    ("thead", "table-head"),
    ("tbody", "table-body"),
    ("tfoot", "table-foot"),
    ("tr", "table-row"),
    ("th", "table-header-cell"),
    ("td", "table-cell"),
    ("figure", "figure"),
    ("figcaption", "figure-caption"),
    ("img", "image"),
    ("a", "link"),
];

pub const DEFAULT_BLOCK_ELEMENTS: &[&str] = &[
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "blockquote",
    "pre",
    "hr",
    "ul",
    "ol",
    "li",
    "table",
    "thead",
    "tbody",
    "tfoot",
    "tr",
    "th",
    "td",
    "figure",
    "figcaption",
    "img",
    "div",
];

pub const DEFAULT_INLINE_ELEMENTS: &[&str] = &["a"];

pub const DEFAULT_MARK_ELEMENTS: &[(&str, &str)] = &[
    ("strong", "bold"),
    ("b", "bold"),
    ("em", "italic"),
    ("i", "italic"),
    ("u", "underline"),
    ("s", "strikethrough"),
    ("del", "strikethrough"),
    ("code", "code"),
];

/// Ordered element key → semantic type table with a precomputed reverse mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTable {
    entries: IndexMap<String, String>,
    reverse: HashMap<String, String>,
}

impl ElementTable {
    /// Build a table from entries in declaration order.
    ///
    /// A repeated key keeps its first position and takes the later type. Fails when no `p`
    /// entry is present, since every lookup miss resolves through it.
    pub fn new<I, K, V>(entries: I) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries: IndexMap<String, String> = entries
            .into_iter()
            .map(|(key, kind)| (key.into(), kind.into()))
            .collect();

        if !entries.contains_key(FALLBACK_TAG) {
            return Err(FormatError::InvalidTables(format!(
                "elements table has no '{FALLBACK_TAG}' fallback entry"
            )));
        }

        Ok(Self::from_entries(entries))
    }

    fn from_entries(entries: IndexMap<String, String>) -> Self {
        let mut reverse = HashMap::new();
        for (key, kind) in &entries {
            reverse.entry(kind.clone()).or_insert_with(|| key.clone());
        }
        Self { entries, reverse }
    }

    /// Semantic type for `key`, or `None` on a miss.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Semantic type for `key`, resolving misses through the `p` entry.
    pub fn type_for(&self, key: &str) -> &str {
        self.lookup(key).unwrap_or_else(|| self.fallback_type())
    }

    pub fn fallback_type(&self) -> &str {
        // Presence of the fallback entry is checked in `new`.
        self.entries
            .get(FALLBACK_TAG)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// First declared key whose type is `kind`.
    pub fn key_for(&self, kind: &str) -> Option<&str> {
        self.reverse.get(kind).map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, kind)| (key.as_str(), kind.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ElementTable {
    fn default() -> Self {
        Self::from_entries(
            DEFAULT_ELEMENTS
                .iter()
                .map(|(key, kind)| (key.to_string(), kind.to_string()))
                .collect(),
        )
    }
}

/// The full configuration passed into every HTML codec call.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlTables {
    elements: ElementTable,
    block_elements: IndexSet<String>,
    inline_elements: IndexSet<String>,
    mark_elements: IndexMap<String, String>,
    image_type: String,
}

impl Default for HtmlTables {
    fn default() -> Self {
        Self {
            elements: ElementTable::default(),
            block_elements: DEFAULT_BLOCK_ELEMENTS.iter().map(|t| t.to_string()).collect(),
            inline_elements: DEFAULT_INLINE_ELEMENTS.iter().map(|t| t.to_string()).collect(),
            mark_elements: DEFAULT_MARK_ELEMENTS
                .iter()
                .map(|(tag, mark)| (tag.to_string(), mark.to_string()))
                .collect(),
            image_type: DEFAULT_IMAGE_TYPE.to_string(),
        }
    }
}

impl HtmlTables {
    pub fn with_elements(mut self, elements: ElementTable) -> Self {
        self.elements = elements;
        self
    }

    pub fn with_block_elements<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.block_elements = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_inline_elements<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inline_elements = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_mark_elements<I, K, V>(mut self, marks: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.mark_elements = marks
            .into_iter()
            .map(|(tag, mark)| (tag.into(), mark.into()))
            .collect();
        self
    }

    pub fn with_image_type(mut self, kind: impl Into<String>) -> Self {
        self.image_type = kind.into();
        self
    }

    /// Apply per-call overrides on top of these tables.
    pub fn with_overrides(self, overrides: TableOverrides) -> Result<Self, FormatError> {
        let mut tables = self;
        if let Some(elements) = overrides.elements {
            tables = tables.with_elements(ElementTable::new(elements)?);
        }
        if let Some(tags) = overrides.block_elements {
            tables = tables.with_block_elements(tags);
        }
        if let Some(tags) = overrides.inline_elements {
            tables = tables.with_inline_elements(tags);
        }
        if let Some(marks) = overrides.mark_elements {
            tables = tables.with_mark_elements(marks);
        }
        Ok(tables)
    }

    /// Semantic type for an element with `tag` and an optional `type` attribute.
    pub fn element_type(&self, tag: &str, type_attr: Option<&str>) -> &str {
        match type_attr {
            Some(attr) => self.elements.type_for(&format!("{tag}{attr}")),
            None => self.elements.type_for(tag),
        }
    }

    pub fn is_block(&self, tag: &str) -> bool {
        self.block_elements.contains(tag)
    }

    pub fn is_inline(&self, tag: &str) -> bool {
        self.inline_elements.contains(tag)
    }

    pub fn mark_for(&self, tag: &str) -> Option<&str> {
        self.mark_elements.get(tag).map(String::as_str)
    }

    pub fn is_image(&self, kind: &str) -> bool {
        kind == self.image_type
    }

    pub fn elements(&self) -> &ElementTable {
        &self.elements
    }

    pub fn block_elements(&self) -> impl Iterator<Item = &str> {
        self.block_elements.iter().map(String::as_str)
    }

    pub fn inline_elements(&self) -> impl Iterator<Item = &str> {
        self.inline_elements.iter().map(String::as_str)
    }

    pub fn mark_elements(&self) -> impl Iterator<Item = (&str, &str)> {
        self.mark_elements
            .iter()
            .map(|(tag, mark)| (tag.as_str(), mark.as_str()))
    }

    pub fn image_type(&self) -> &str {
        &self.image_type
    }
}

/// Optional replacements for each table; `None` keeps the table it is applied to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableOverrides {
    pub elements: Option<Vec<(String, String)>>,
    pub block_elements: Option<Vec<String>>,
    pub inline_elements: Option<Vec<String>>,
    pub mark_elements: Option<Vec<(String, String)>>,
}
