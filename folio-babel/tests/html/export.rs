//! Export tests for HTML format (tree → HTML)

use crate::common::fixture;
use folio_babel::format::Format;
use folio_babel::formats::html::{self, HtmlFormat, HtmlTables};
use folio_babel::{Block, Data, Document, Node, Text, Value};
use proptest::prelude::*;

fn doc_to_html(doc: Document) -> String {
    html::serialize(&Value::new(doc), &HtmlTables::default())
}

fn paragraph(text: &str) -> Block {
    Block::new("paragraph", vec![Text::new(text).into()])
}

#[test]
fn test_two_paragraphs() {
    let doc = Document::new(vec![paragraph("Some text and lalala"), paragraph("Next line")]);
    assert_eq!(doc_to_html(doc), "<p>Some text and lalala</p><p>Next line</p>");
}

#[test]
fn test_value_without_document() {
    assert_eq!(html::serialize(&Value::default(), &HtmlTables::default()), "");
}

#[test]
fn test_empty_state_exports_empty_paragraph() {
    assert_eq!(doc_to_html(Document::empty_state()), "<p></p>");
}

#[test]
fn test_ordered_list_variants() {
    let item = || Node::from(Block::new("list-item", vec![Text::new("x").into()]));
    let doc = Document::new(vec![
        Block::new("ordered-list", vec![item()]),
        Block::new("alpha-ordered-list", vec![item()]),
        Block::new("upper-roman-ordered-list", vec![item()]),
    ]);
    assert_eq!(
        doc_to_html(doc),
        concat!(
            "<ol><li>x</li></ol>",
            r#"<ol type="a"><li>x</li></ol>"#,
            r#"<ol type="I"><li>x</li></ol>"#,
        )
    );
}

#[test]
fn test_alpha_list_round_trip() {
    let tables = HtmlTables::default();
    let doc = html::deserialize(r#"<ol type="a"><li>x</li></ol>"#, &tables).unwrap();
    assert_eq!(doc.children[0].kind, "alpha-ordered-list");

    let out = html::serialize(&Value::new(doc), &tables);
    assert_eq!(out, r#"<ol type="a"><li>x</li></ol>"#);
}

#[test]
fn test_marks_are_not_written() {
    let doc = Document::new(vec![Block::new(
        "paragraph",
        vec![
            Text::new("plain ").into(),
            Text::with_marks("loud", ["bold", "italic"]).into(),
        ],
    )]);
    assert_eq!(doc_to_html(doc), "<p>plain loud</p>");
}

#[test]
fn test_kitchensink_reexport() {
    let tables = HtmlTables::default();
    let doc = html::deserialize(&fixture("kitchensink.html"), &tables).unwrap();
    let out = html::serialize(&Value::new(doc), &tables);

    assert!(out.starts_with(r#"<h1 id="title">Kitchen sink</h1>"#));
    assert!(out.contains(
        r#"<p class="lead">Intro with bold, italic and <a href="https://example.com" target="_blank">a link</a>.</p>"#
    ));
    assert!(out.contains("<p>Line one\nLine two</p>"));
    assert!(out.contains("<blockquote><p>Quoted</p></blockquote>"));
    assert!(out.contains("<ul><li>First</li><li>Second</li></ul>"));
    assert!(out.contains(r#"<ol type="a"><li>Alpha</li></ol>"#));
    assert!(out.contains(r#"<ol type="1"><li>One</li></ol>"#));
    assert!(out.contains("<table><thead><tr><th>Name</th></tr></thead>"));
    assert!(out.contains(r#"<img src="cover.png" alt="Cover"></img>"#));
    assert!(out.ends_with("<p></p>"));
}

#[test]
fn test_format_serialize_matches_free_function() {
    let value = Value::new(Document::new(vec![paragraph("same")]));
    let via_format = HtmlFormat::default().serialize(&value).unwrap();
    assert_eq!(via_format, html::serialize(&value, &HtmlTables::default()));
}

// ============================================================================
// ROUND TRIP
// ============================================================================

fn leaf_block() -> impl Strategy<Value = Block> {
    let kind = prop::sample::select(vec![
        "paragraph",
        "heading-one",
        "heading-two",
        "heading-three",
        "code-block",
    ]);
    (kind, "[a-z0-9]{1,12}", prop::option::of("[a-z]{1,6}")).prop_map(|(kind, text, id)| {
        let mut data = Data::new();
        if let Some(id) = id {
            data.insert("id".to_string(), id);
        }
        Block::with_data(kind, data, vec![Text::new(text).into()])
    })
}

fn top_block() -> impl Strategy<Value = Block> {
    prop_oneof![
        leaf_block(),
        "[a-z0-9]{1,12}".prop_map(|text| Block::new(
            "block-quote",
            vec![paragraph(&text).into()]
        )),
        prop::collection::vec("[a-z0-9]{1,12}", 1..4).prop_map(|items| Block::new(
            "bulleted-list",
            items
                .iter()
                .map(|item| Block::new("list-item", vec![Text::new(item.as_str()).into()]).into())
                .collect()
        )),
    ]
}

proptest! {
    #[test]
    fn prop_unmarked_trees_round_trip(blocks in prop::collection::vec(top_block(), 1..6)) {
        let tables = HtmlTables::default();
        let doc = Document::new(blocks);
        let markup = html::serialize(&Value::new(doc.clone()), &tables);
        let back = html::deserialize(&markup, &tables).unwrap();
        prop_assert_eq!(back, doc);
    }
}
