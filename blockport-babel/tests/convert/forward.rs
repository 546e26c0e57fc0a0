//! Editor -> portable conversion through real HTML fragments.

use crate::common::{editor_fixture, forward, owned, spans, text_block};
use blockport_babel::inline::MarkRule;
use blockport_babel::model::{ListStyle, LIST_BULLET, LIST_NUMBER, STYLE_NORMAL};
use blockport_babel::{editor_to_portable, ConvertError, Diagnostic, EditorBlock, PortableNode};
use rstest::rstest;
use serde_json::json;

#[test]
fn test_paragraph_with_bold() {
    let nodes = forward()
        .convert(&[EditorBlock::paragraph("Hello <b>World</b>")])
        .unwrap();

    assert_eq!(nodes.len(), 1);
    let block = text_block(&nodes[0]);
    assert_eq!(block.style, STYLE_NORMAL);
    assert_eq!(block.list_item, None);
    assert_eq!(
        spans(block),
        vec![
            ("Hello ".to_string(), owned(&[])),
            ("World".to_string(), owned(&["strong"])),
        ]
    );
    assert!(block.mark_defs.is_empty());
}

#[test]
fn test_header_level_two() {
    let nodes = forward()
        .convert(&[EditorBlock::header("Title", 2)])
        .unwrap();
    let block = text_block(&nodes[0]);
    assert_eq!(block.style, "h2");
    assert_eq!(block.plain_text(), "Title");
}

#[rstest]
#[case(1, "h1")]
#[case(3, "h3")]
#[case(6, "h6")]
fn test_header_levels(#[case] level: u8, #[case] style: &str) {
    let nodes = forward()
        .convert(&[EditorBlock::header("x", level)])
        .unwrap();
    assert_eq!(text_block(&nodes[0]).style, style);
}

#[test]
fn test_unknown_block_is_skipped() {
    let blocks = vec![
        EditorBlock::paragraph("before"),
        EditorBlock::new("quote", json!({ "text": "ignored", "caption": "" })),
        EditorBlock::paragraph("after"),
    ];
    let converted = forward().convert_with_report(&blocks).unwrap();

    let texts: Vec<_> = converted
        .output
        .iter()
        .map(|node| text_block(node).plain_text())
        .collect();
    assert_eq!(texts, vec!["before", "after"]);
    assert_eq!(
        converted.diagnostics,
        vec![Diagnostic::UnknownBlockType {
            index: 1,
            block_type: "quote".to_string(),
        }]
    );
}

#[test]
fn test_list_emits_one_block_per_item() {
    let nodes = forward()
        .convert(&[EditorBlock::list(
            ListStyle::Ordered,
            vec!["one".into(), "<b>two</b>".into(), "three".into()],
        )])
        .unwrap();

    assert_eq!(nodes.len(), 3);
    for node in &nodes {
        let block = text_block(node);
        assert_eq!(block.style, STYLE_NORMAL);
        assert_eq!(block.list_item.as_deref(), Some(LIST_NUMBER));
        assert_eq!(block.level, Some(1));
    }
    assert_eq!(spans(text_block(&nodes[1]))[0].1, owned(&["strong"]));
}

#[rstest]
#[case::checklist(json!({ "style": "checklist", "items": ["a"] }))]
#[case::missing_style(json!({ "items": ["a"] }))]
fn test_non_ordered_list_styles_become_bullets(#[case] data: serde_json::Value) {
    let nodes = forward()
        .convert(&[
            EditorBlock::new("list", data),
            EditorBlock::paragraph("keep me"),
        ])
        .unwrap();

    assert_eq!(nodes.len(), 2);
    let item = text_block(&nodes[0]);
    assert_eq!(item.list_item.as_deref(), Some(LIST_BULLET));
    assert_eq!(item.plain_text(), "a");
    assert_eq!(text_block(&nodes[1]).plain_text(), "keep me");
}

#[test]
fn test_link_creates_block_scoped_definition() {
    let nodes = forward()
        .convert(&[
            EditorBlock::paragraph(r#"<a href="https://example.com">one</a>"#),
            EditorBlock::paragraph(r#"<a href="https://example.com">two</a>"#),
        ])
        .unwrap();

    let first = text_block(&nodes[0]);
    let second = text_block(&nodes[1]);
    assert_eq!(first.mark_defs.len(), 1);
    assert_eq!(second.mark_defs.len(), 1);
    assert_ne!(first.mark_defs[0].key, second.mark_defs[0].key);

    let def = &first.mark_defs[0];
    assert_eq!(def.mark_type, "link");
    assert_eq!(def.field_str("href"), Some("https://example.com"));
    assert_eq!(first.children[0].marks, vec![def.key.clone()]);
}

#[test]
fn test_nested_marks_innermost_first() {
    let nodes = forward()
        .convert(&[EditorBlock::paragraph("<i>a <u><b>b</b></u></i>")])
        .unwrap();
    assert_eq!(
        spans(text_block(&nodes[0])),
        vec![
            ("a ".to_string(), owned(&["em"])),
            ("b".to_string(), owned(&["strong", "underline", "em"])),
        ]
    );
}

#[test]
fn test_unconfigured_tags_are_transparent() {
    let nodes = forward()
        .convert(&[EditorBlock::paragraph(
            r#"<span class="x">plain</span><mark>hi</mark><br>"#,
        )])
        .unwrap();
    assert_eq!(
        spans(text_block(&nodes[0])),
        vec![
            ("plain".to_string(), owned(&[])),
            ("hi".to_string(), owned(&[])),
        ]
    );
}

#[test]
fn test_custom_mark_rule_wins_over_default() {
    let converter = forward()
        .with_mark("b", MarkRule::decorator("bold"))
        .with_mark("mark", MarkRule::decorator("highlight"));
    let nodes = converter
        .convert(&[EditorBlock::paragraph("<b>a</b><mark>b</mark>")])
        .unwrap();
    assert_eq!(
        spans(text_block(&nodes[0])),
        vec![
            ("a".to_string(), owned(&["bold"])),
            ("b".to_string(), owned(&["highlight"])),
        ]
    );
}

#[test]
fn test_entities_are_decoded_into_span_text() {
    let nodes = forward()
        .convert(&[EditorBlock::paragraph("Fish &amp; chips &lt;3")])
        .unwrap();
    assert_eq!(text_block(&nodes[0]).plain_text(), "Fish & chips <3");
}

#[test]
fn test_malformed_payload_fails_the_call() {
    let result = forward().convert(&[
        EditorBlock::paragraph("fine"),
        EditorBlock::new("header", json!({ "text": "no level" })),
    ]);
    match result {
        Err(ConvertError::InvalidData { block_type, .. }) => assert_eq!(block_type, "header"),
        other => panic!("Expected InvalidData, got {other:?}"),
    }
}

#[test]
fn test_editor_fixture() {
    let doc = editor_fixture();
    let converted = forward().convert_with_report(&doc.blocks).unwrap();

    let styles: Vec<_> = converted
        .output
        .iter()
        .map(|node| {
            let block = text_block(node);
            (block.style.clone(), block.list_item.clone())
        })
        .collect();
    assert_eq!(
        styles,
        vec![
            ("h1".to_string(), None),
            ("normal".to_string(), None),
            ("normal".to_string(), Some("number".to_string())),
            ("normal".to_string(), Some("number".to_string())),
            ("normal".to_string(), Some("number".to_string())),
            ("normal".to_string(), None),
        ]
    );
    assert_eq!(converted.diagnostics.len(), 1);

    let paragraph = text_block(&converted.output[1]);
    assert_eq!(paragraph.plain_text(), "Read the guide before upgrading.");
    assert_eq!(paragraph.mark_defs.len(), 1);
    assert_eq!(
        paragraph.mark_defs[0].field_str("href"),
        Some("https://example.com/guide")
    );
}

#[test]
fn test_random_keys_are_unique_within_a_document() {
    let doc = editor_fixture();
    let nodes = editor_to_portable(&doc.blocks).unwrap();

    let mut keys = Vec::new();
    for node in &nodes {
        if let PortableNode::Block(block) = node {
            keys.push(block.key.clone());
            keys.extend(block.children.iter().map(|s| s.key.clone()));
            keys.extend(block.mark_defs.iter().map(|d| d.key.clone()));
        }
    }
    let total = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), total);
}

#[test]
fn test_output_serializes_to_portable_json() {
    let nodes = forward()
        .convert(&[EditorBlock::paragraph("Hello <b>World</b>")])
        .unwrap();
    let value = serde_json::to_value(&nodes).unwrap();
    assert_eq!(
        value,
        json!([{
            "_key": "k2",
            "_type": "block",
            "style": "normal",
            "children": [
                { "_key": "k0", "_type": "span", "text": "Hello ", "marks": [] },
                { "_key": "k1", "_type": "span", "text": "World", "marks": ["strong"] }
            ],
            "markDefs": []
        }])
    );
}
