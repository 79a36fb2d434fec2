//! Import tests for HTML format (HTML → tree)
//!
//! These tests verify that HTML fragments are correctly converted into the canonical tree
//! by checking the resulting tree structure.

use crate::common::{block_types, child_blocks, fixture};
use folio_babel::format::Format;
use folio_babel::formats::html::{self, HtmlFormat, HtmlTables};
use folio_babel::{Document, Inline, Node, Text};
use insta::assert_snapshot;
use proptest::prelude::*;

/// Helper to parse HTML with the default tables
fn html_to_doc(markup: &str) -> Document {
    html::deserialize(markup, &HtmlTables::default()).expect("Should parse HTML")
}

// ============================================================================
// EMPTY STATE
// ============================================================================

#[test]
fn test_empty_markup_is_empty_state() {
    let doc = html_to_doc("");
    assert_eq!(doc, Document::empty_state());

    let block = &doc.children[0];
    assert_eq!(block.kind, "paragraph");
    assert_eq!(block.children, vec![Node::Text(Text::new(""))]);
}

#[test]
fn test_empty_state_ignores_tables() {
    let tables = HtmlTables::default().with_elements(
        folio_babel::ElementTable::new([("p", "para")]).unwrap(),
    );
    let doc = html::deserialize("", &tables).unwrap();
    assert_eq!(doc, Document::empty_state());
}

// ============================================================================
// STRUCTURE
// ============================================================================

#[test]
fn test_two_paragraphs() {
    let doc = html_to_doc("<p>Some text and lalala</p><p>Next line</p>");
    assert_eq!(block_types(&doc), vec!["paragraph", "paragraph"]);
    assert_eq!(doc.children[0].first_text().unwrap().text, "Some text and lalala");
    assert_eq!(doc.children[1].first_text().unwrap().text, "Next line");
}

#[test]
fn test_kitchensink_top_level() {
    let doc = html_to_doc(&fixture("kitchensink.html"));
    assert_eq!(
        block_types(&doc),
        vec![
            "heading-one",
            "paragraph",
            "paragraph",
            "block-quote",
            "bulleted-list",
            "alpha-ordered-list",
            "ordered-list",
            "table",
            "figure",
            "paragraph",
        ]
    );
}

#[test]
fn test_kitchensink_marks_and_link() {
    let doc = html_to_doc(&fixture("kitchensink.html"));
    let lead = &doc.children[1];
    assert_eq!(lead.data.get("class").map(String::as_str), Some("lead"));

    let mut data = folio_babel::Data::new();
    data.insert("href".to_string(), "https://example.com".to_string());
    data.insert("target".to_string(), "_blank".to_string());

    assert_eq!(
        lead.children,
        vec![
            Node::Text(Text::new("Intro with ")),
            Node::Text(Text::with_marks("bold", ["bold"])),
            Node::Text(Text::new(", ")),
            Node::Text(Text::with_marks("italic", ["italic"])),
            Node::Text(Text::new(" and ")),
            Node::Inline(Inline::new(
                "link",
                data,
                vec![Text::new("a "), Text::with_marks("link", ["bold"])]
            )),
            Node::Text(Text::new(".")),
        ]
    );
}

#[test]
fn test_kitchensink_hard_break() {
    let doc = html_to_doc(&fixture("kitchensink.html"));
    assert_eq!(doc.children[2].first_text().unwrap().text, "Line one\nLine two");
}

#[test]
fn test_kitchensink_lists() {
    let doc = html_to_doc(&fixture("kitchensink.html"));

    let bullets = child_blocks(&doc.children[4]);
    assert_eq!(bullets.len(), 2);
    assert!(bullets.iter().all(|item| item.kind == "list-item"));
    assert_eq!(bullets[1].first_text().unwrap().text, "Second");

    let alpha = &doc.children[5];
    assert_eq!(alpha.data.get("type").map(String::as_str), Some("a"));
    assert_eq!(child_blocks(alpha)[0].first_text().unwrap().text, "Alpha");

    let numeric = &doc.children[6];
    assert_eq!(numeric.data.get("type").map(String::as_str), Some("1"));
}

#[test]
fn test_kitchensink_table() {
    let doc = html_to_doc(&fixture("kitchensink.html"));
    let table = &doc.children[7];

    let sections = child_blocks(table);
    let kinds: Vec<_> = sections.iter().map(|b| b.kind.as_str()).collect();
    assert_eq!(kinds, vec!["table-head", "table-body"]);

    let header_row = child_blocks(sections[0]);
    assert_eq!(header_row[0].kind, "table-row");
    let header_cell = child_blocks(header_row[0]);
    assert_eq!(header_cell[0].kind, "table-header-cell");
    assert_eq!(header_cell[0].first_text().unwrap().text, "Name");

    let body_cell = child_blocks(child_blocks(sections[1])[0]);
    assert_eq!(body_cell[0].kind, "table-cell");
    assert_eq!(body_cell[0].first_text().unwrap().text, "Folio");
}

#[test]
fn test_kitchensink_figure() {
    let doc = html_to_doc(&fixture("kitchensink.html"));
    let parts = child_blocks(&doc.children[8]);
    assert_eq!(parts.len(), 2);

    let image = parts[0];
    assert_eq!(image.kind, "image");
    assert!(image.children.is_empty());
    let attrs: Vec<_> = image.data.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    assert_eq!(attrs, vec![("src", "cover.png"), ("alt", "Cover")]);

    let caption = parts[1];
    assert_eq!(caption.kind, "figure-caption");
    assert_eq!(
        caption.children,
        vec![
            Node::Text(Text::new("A ")),
            Node::Text(Text::with_marks("cover", ["italic"])),
        ]
    );
}

#[test]
fn test_kitchensink_empty_paragraph_placeholder() {
    let doc = html_to_doc(&fixture("kitchensink.html"));
    let last = doc.children.last().unwrap();
    assert_eq!(last.children, vec![Node::Text(Text::new(""))]);
}

#[test]
fn test_image_exemption_follows_image_type() {
    let tables = HtmlTables::default().with_image_type("picture");
    let doc = html::deserialize(r#"<p><img src="a.png"></p>"#, &tables).unwrap();
    match &doc.children[0].children[..] {
        // `img` still maps to "image", which is no longer the image type
        [Node::Block(img)] => assert_eq!(img.children, vec![Node::Text(Text::new(""))]),
        other => panic!("Unexpected children {other:?}"),
    }
}

#[test]
fn test_entities_are_decoded() {
    let doc = html_to_doc("<p>fish &amp; chips &lt;3</p>");
    assert_eq!(doc.children[0].first_text().unwrap().text, "fish & chips <3");
}

#[test]
fn test_format_parse_wraps_value() {
    let value = HtmlFormat::default().parse("<h2>Hi</h2>").unwrap();
    let doc = value.document.expect("document");
    assert_eq!(doc.children[0].kind, "heading-two");
}

#[test]
fn test_json_snapshot() {
    let doc = html_to_doc(r#"<p class="lead">Hi <strong>there</strong></p>"#);
    let json = serde_json::to_string_pretty(&folio_babel::Value::new(doc)).unwrap();
    assert_snapshot!(json, @r###"
    {
      "document": {
        "object": "document",
        "children": [
          {
            "object": "block",
            "type": "paragraph",
            "data": {
              "class": "lead"
            },
            "children": [
              {
                "object": "text",
                "text": "Hi "
              },
              {
                "object": "text",
                "text": "there",
                "bold": true
              }
            ]
          }
        ]
      }
    }
    "###);
}

#[test]
fn test_table_rows_as_fragment() {
    let doc = html_to_doc("<tr><td>x</td></tr>");
    assert_eq!(block_types(&doc), vec!["table-row"]);
    let cells = child_blocks(&doc.children[0]);
    assert_eq!(cells[0].kind, "table-cell");
    assert_eq!(cells[0].first_text().unwrap().text, "x");
}

#[test]
fn test_leading_title_is_not_hoisted() {
    let doc = html_to_doc("<title>T</title><p>x</p>");
    assert_eq!(block_types(&doc), vec!["paragraph", "paragraph"]);
    assert_eq!(doc.children[0].first_text().unwrap().text, "T");
}

// ============================================================================
// PROPERTIES
// ============================================================================

fn block_tag() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "p", "h1", "h2", "h3", "blockquote", "pre", "ul", "ol", "li", "figure", "div",
        "section", "title",
    ])
}

proptest! {
    #[test]
    fn prop_top_level_count_matches_elements(
        elements in prop::collection::vec((block_tag(), "[a-z]{1,8}"), 1..8),
    ) {
        let markup: String = elements
            .iter()
            .map(|(tag, text)| format!("<{tag}>{text}</{tag}>"))
            .collect();
        let markup = format!("{markup}<hr><img src=\"a.png\">");
        let doc = html_to_doc(&markup);
        prop_assert_eq!(doc.children.len(), elements.len() + 2);
    }

    #[test]
    fn prop_table_part_runs_are_kept(
        rows in any::<bool>(),
        texts in prop::collection::vec("[a-z]{1,8}", 1..6),
    ) {
        let markup: String = texts
            .iter()
            .map(|text| {
                if rows {
                    format!("<tr><td>{text}</td></tr>")
                } else {
                    format!("<td>{text}</td>")
                }
            })
            .collect();
        let doc = html_to_doc(&markup);
        let expected = if rows { "table-row" } else { "table-cell" };
        prop_assert_eq!(doc.children.len(), texts.len());
        prop_assert!(doc.children.iter().all(|block| block.kind == expected));
    }
}
