//! HTML deserialization (HTML → canonical tree)
//!
//! Pipeline: markup → line-break rewrite → html5ever RcDom → recursive descent over the fragment root.
//!
//! Markup is parsed as a fragment in a `<template>` context, so table parts such as `<tr>` and
//! head-only tags such as `<title>` stay where they were written instead of being dropped or
//! hoisted into `<head>`.
//!
//! Each top-level element becomes a block. Inside a block every child is classified by the
//! lookup tables: block tags recurse, inline tags become inline nodes, and anything else is
//! flattened into text leaves. Marks only travel one level: a text leaf gets the mark of the
//! tag directly enclosing it plus the mark of its own tag, so `<b><i><u>x</u></i></b>` yields
//! `x` marked bold and italic, and the underline is lost.

use super::tables::HtmlTables;
use crate::error::FormatError;
use crate::tree::{Block, Data, Document, Inline, Node, Text};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{local_name, ns, parse_fragment, ParseOpts, QualName};
use log::{debug, trace};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("line break pattern is valid"));

/// Parse HTML markup into a canonical document using `tables`.
pub fn parse_from_html(markup: &str, tables: &HtmlTables) -> Result<Document, FormatError> {
    if markup.trim().is_empty() {
        return Ok(Document::empty_state());
    }

    let markup = LINE_BREAK.replace_all(markup, "\n");
    let dom = parse_html(&markup)?;
    let root = find_child_element(&dom.document, "html").ok_or_else(|| {
        FormatError::ParseError("HTML parser produced no fragment root".to_string())
    })?;

    let children: Vec<Block> = root
        .children
        .borrow()
        .iter()
        .filter(|child| is_element(child))
        .map(|child| element_to_node(child, tables))
        .collect();

    debug!("parsed HTML into {} top-level blocks", children.len());
    Ok(Document::new(children))
}

fn parse_html(markup: &str) -> Result<RcDom, FormatError> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let context = QualName::new(None, ns!(html), local_name!("template"));
    parse_fragment(RcDom::default(), opts, context, Vec::new(), false)
        .from_utf8()
        .read_from(&mut markup.as_bytes())
        .map_err(|e| FormatError::ParseError(format!("HTML parsing error: {e}")))
}

fn find_child_element(parent: &Handle, tag: &str) -> Option<Handle> {
    parent
        .children
        .borrow()
        .iter()
        .find(|child| tag_name(child).as_deref() == Some(tag))
        .cloned()
}

/// Convert an element into a block, recursing into block-level children.
fn element_to_node(element: &Handle, tables: &HtmlTables) -> Block {
    let kind = element_to_type(element, tables);
    let mut children = Vec::new();

    for child in element.children.borrow().iter() {
        match tag_name(child) {
            Some(tag) if tables.is_block(&tag) => {
                trace!("<{tag}> nested block");
                children.push(Node::Block(element_to_node(child, tables)));
            }
            Some(tag) if tables.is_inline(&tag) => {
                trace!("<{tag}> inline");
                children.push(Node::Inline(element_to_inline(child, tables)));
            }
            _ => {
                if text_content(child).trim().is_empty() {
                    continue;
                }
                children.extend(element_to_texts(child, tables).into_iter().map(Node::Text));
            }
        }
    }

    if children.is_empty() && !tables.is_image(&kind) {
        children.push(Node::Text(Text::new("")));
    }

    Block::with_data(kind, attributes(element), children)
}

/// Convert an element into an inline node. Inline content is flattened to text leaves.
fn element_to_inline(element: &Handle, tables: &HtmlTables) -> Inline {
    let kind = element_to_type(element, tables);
    let children = element
        .children
        .borrow()
        .iter()
        .flat_map(|child| element_to_texts(child, tables))
        .collect();

    Inline::new(kind, attributes(element), children)
}

/// Semantic type of an element: tag name plus optional `type` attribute, looked up in
/// the elements table.
fn element_to_type(element: &Handle, tables: &HtmlTables) -> String {
    let tag = tag_name(element).unwrap_or_default();
    let type_attr = attribute(element, "type");
    tables.element_type(&tag, type_attr.as_deref()).to_string()
}

/// Text leaves for a non-structural child.
///
/// An element hands its own mark down to one text leaf per child. A bare text node becomes a
/// single unmarked leaf.
fn element_to_texts(node: &Handle, tables: &HtmlTables) -> Vec<Text> {
    match &node.data {
        NodeData::Element { name, .. } => {
            let mark = tables.mark_for(&name.local);
            node.children
                .borrow()
                .iter()
                .filter_map(|child| element_to_text(child, mark, tables))
                .collect()
        }
        NodeData::Text { .. } => element_to_text(node, None, tables).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// One text leaf holding the full text content of `node`, marked with `inherited` and the
/// mark of `node`'s own tag.
fn element_to_text(node: &Handle, inherited: Option<&str>, tables: &HtmlTables) -> Option<Text> {
    let own = match &node.data {
        NodeData::Element { name, .. } => tables.mark_for(&name.local),
        NodeData::Text { .. } => None,
        _ => return None,
    };
    let marks = inherited.into_iter().chain(own);
    Some(Text::with_marks(text_content(node), marks))
}

fn is_element(node: &Handle) -> bool {
    matches!(node.data, NodeData::Element { .. })
}

fn tag_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

fn attribute(node: &Handle, key: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == key)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// Every attribute of an element in source order.
fn attributes(node: &Handle) -> Data {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
            .collect(),
        _ => Data::new(),
    }
}

fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    push_text(node, &mut out);
    out
}

fn push_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { .. } => {
            for child in node.children.borrow().iter() {
                push_text(child, out);
            }
        }
        _ => {}
    }
}
