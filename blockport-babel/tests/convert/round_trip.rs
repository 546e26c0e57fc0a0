//! Editor -> portable -> editor.

use crate::common::{editor_fixture, forward, reverse};
use blockport_babel::model::ListStyle;
use blockport_babel::EditorBlock;
use rstest::rstest;

fn round_trip(blocks: &[EditorBlock]) -> Vec<EditorBlock> {
    let nodes = forward().convert(blocks).expect("forward conversion");
    reverse().convert(&nodes).expect("reverse conversion")
}

#[rstest]
#[case("Just plain text")]
#[case("Hello <b>World</b>")]
#[case("An <i>emphasized</i> word")]
#[case(r#"Visit <a href="https://example.com/a?b=c">the site</a> now"#)]
#[case("<i><b>both</b></i> and <u>under</u>")]
#[case("Fish &amp; chips &lt;3")]
#[case(" leading and trailing ")]
fn test_supported_paragraphs_survive(#[case] text: &str) {
    let original = vec![EditorBlock::paragraph(text)];
    assert_eq!(round_trip(&original), original);
}

#[test]
fn test_headers_and_lists_survive() {
    let original = vec![
        EditorBlock::header("Intro", 1),
        EditorBlock::list(ListStyle::Unordered, vec!["a".into(), "<b>b</b>".into()]),
        EditorBlock::paragraph("between"),
        EditorBlock::list(ListStyle::Ordered, vec!["one".into(), "two".into()]),
        EditorBlock::header("Outro", 4),
    ];
    assert_eq!(round_trip(&original), original);
}

#[test]
fn test_adjacent_lists_of_one_style_fuse() {
    let original = vec![
        EditorBlock::list(ListStyle::Ordered, vec!["a".into()]),
        EditorBlock::list(ListStyle::Ordered, vec!["b".into()]),
    ];
    assert_eq!(
        round_trip(&original),
        vec![EditorBlock::list(
            ListStyle::Ordered,
            vec!["a".into(), "b".into()]
        )]
    );
}

#[test]
fn test_overlapping_marks_reach_a_fixed_point() {
    let once = round_trip(&[EditorBlock::paragraph("<b>bold <i>both</i></b>")]);
    assert_eq!(
        once,
        vec![EditorBlock::paragraph("<b>bold </b><b><i>both</i></b>")]
    );
    assert_eq!(round_trip(&once), once);
}

#[test]
fn test_fixture_round_trip_drops_only_unknown_blocks() {
    let doc = editor_fixture();
    let expected: Vec<_> = doc
        .blocks
        .iter()
        .filter(|block| block.block_type != "quote")
        .cloned()
        .collect();
    assert_eq!(round_trip(&doc.blocks), expected);
}
