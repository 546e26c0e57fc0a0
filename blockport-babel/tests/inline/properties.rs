//! Property tests for mark nesting.

use blockport_babel::html::parse_fragment;
use blockport_babel::inline::{extract_spans, MarkConfig};
use blockport_babel::{EditorBlock, SequentialKeys};
use proptest::prelude::*;

const CONFIGURED: &[&str] = &["b", "strong", "i", "em", "u", "s", "del", "code"];
const TRANSPARENT: &[&str] = &["span", "small", "abbr"];

fn tag_chain() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(
        prop::sample::select(CONFIGURED.iter().chain(TRANSPARENT).copied().collect::<Vec<_>>()),
        0..6,
    )
}

fn nest(tags: &[&str], text: &str) -> String {
    let open: String = tags.iter().map(|t| format!("<{t}>")).collect();
    let close: String = tags.iter().rev().map(|t| format!("</{t}>")).collect();
    format!("{open}{text}{close}")
}

proptest! {
    #[test]
    fn marks_match_configured_ancestors(tags in tag_chain(), text in "[a-zA-Z0-9]{1,12}") {
        let html = nest(&tags, &text);
        let nodes = parse_fragment(&html).unwrap();
        let extracted = extract_spans(&nodes, &MarkConfig::default(), &SequentialKeys::new());

        let configured = tags.iter().filter(|t| CONFIGURED.contains(t)).count();
        prop_assert_eq!(extracted.spans.len(), 1);
        prop_assert_eq!(&extracted.spans[0].text, &text);
        prop_assert_eq!(extracted.spans[0].marks.len(), configured);
    }

    #[test]
    fn second_round_trip_is_stable(tags in tag_chain(), text in "[a-zA-Z0-9 ]{1,12}") {
        let html = nest(&tags, &text);
        let once = blockport_babel::portable_to_editor(
            &blockport_babel::editor_to_portable(&[EditorBlock::paragraph(html)]).unwrap(),
        )
        .unwrap();
        let twice = blockport_babel::portable_to_editor(
            &blockport_babel::editor_to_portable(&once).unwrap(),
        )
        .unwrap();
        prop_assert_eq!(once, twice);
    }
}
