//! Paragraph splitting and joining for plain text

use folio_babel::format::Format;
use folio_babel::formats::html::{self, HtmlTables};
use folio_babel::formats::text::{self, TextFormat};
use folio_babel::{Document, Node, Text, Value};

const NUMBERED: &str = "1. Number one\nSome text on the next line\n\n\
2. Number two\nSome text on the next line\n\n\
3. Number three\nSome text on the next line\n\n\
4. Number four\nSome text on the next line";

#[test]
fn test_numbered_paragraphs() {
    let doc = text::deserialize(NUMBERED);
    assert_eq!(doc.children.len(), 4);
    assert!(doc.children.iter().all(|block| block.kind == "paragraph"));
    assert_eq!(
        doc.children[2].children,
        vec![Node::Text(Text::new("3. Number three\nSome text on the next line"))]
    );
}

#[test]
fn test_html_paragraphs_to_text() {
    let doc = html::deserialize(
        "<p>Some text and lalala</p><p>Next line</p>",
        &HtmlTables::default(),
    )
    .unwrap();
    let value = Value::new(doc);

    assert_eq!(html::serialize_text(&value), "Some text and lalalaNext line");
    assert_eq!(text::serialize(&value), "Some text and lalala\nNext line");
}

#[test]
fn test_blank_input_is_empty_state() {
    assert_eq!(text::deserialize(""), Document::empty_state());
    assert_eq!(text::deserialize("\n \n\t\n"), Document::empty_state());
}

#[test]
fn test_text_round_trip_drops_blank_lines() {
    let format = TextFormat;
    let value = format.parse("first\n\nsecond").unwrap();
    assert_eq!(format.serialize(&value).unwrap(), "first\nsecond");
}

#[test]
fn test_text_to_html() {
    let value = Value::new(text::deserialize("alpha\nbeta\n\ngamma"));
    assert_eq!(
        html::serialize(&value, &HtmlTables::default()),
        "<p>alpha\nbeta</p><p>gamma</p>"
    );
}
