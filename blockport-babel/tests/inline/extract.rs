//! Extraction from parsed HTML fragments.

use crate::common::owned;
use blockport_babel::html::{parse_fragment, Element};
use blockport_babel::inline::{extract_spans, AttributeMark, Extracted, MarkConfig, MarkRule};
use blockport_babel::model::MarkData;
use blockport_babel::SequentialKeys;

fn extract(html: &str, marks: &MarkConfig) -> Extracted {
    let nodes = parse_fragment(html).expect("fragment parses");
    extract_spans(&nodes, marks, &SequentialKeys::new())
}

fn summary(extracted: &Extracted) -> Vec<(String, Vec<String>)> {
    extracted
        .spans
        .iter()
        .map(|s| (s.text.clone(), s.marks.clone()))
        .collect()
}

#[test]
fn test_all_default_decorators() {
    let extracted = extract(
        "<b>1</b><strong>2</strong><i>3</i><em>4</em><u>5</u><s>6</s><del>7</del><strike>8</strike><code>9</code>",
        &MarkConfig::default(),
    );
    let marks: Vec<_> = summary(&extracted).into_iter().map(|(_, m)| m).collect();
    assert_eq!(
        marks,
        vec![
            owned(&["strong"]),
            owned(&["strong"]),
            owned(&["em"]),
            owned(&["em"]),
            owned(&["underline"]),
            owned(&["strike-through"]),
            owned(&["strike-through"]),
            owned(&["strike-through"]),
            owned(&["code"]),
        ]
    );
}

#[test]
fn test_uppercase_tags_match_rules() {
    let extracted = extract("<B>x</B>", &MarkConfig::default());
    assert_eq!(summary(&extracted), vec![("x".to_string(), owned(&["strong"]))]);
}

#[test]
fn test_anchor_without_href_gets_empty_field() {
    let extracted = extract("<a>bare</a>", &MarkConfig::default());
    assert_eq!(extracted.definitions[0].field_str("href"), Some(""));
}

#[test]
fn test_link_inside_bold() {
    let extracted = extract(
        r#"<b>see <a href="/docs">docs</a></b>"#,
        &MarkConfig::default(),
    );
    let key = extracted.definitions[0].key.clone();
    assert_eq!(
        summary(&extracted),
        vec![
            ("see ".to_string(), owned(&["strong"])),
            ("docs".to_string(), vec![key, "strong".to_string()]),
        ]
    );
}

#[test]
fn test_custom_annotation_factory() {
    let mut marks = MarkConfig::default();
    marks.insert(
        "abbr",
        MarkRule::annotation(AttributeMark::new("abbreviation").with_field("title", "title")),
    );
    marks.insert(
        "q",
        MarkRule::annotation_fn(|element: &Element| {
            MarkData::new("quote").with_field("cite", element.attribute("cite").unwrap_or("anonymous"))
        }),
    );

    let extracted = extract(
        r#"<abbr title="HyperText Markup Language">HTML</abbr> <q>hi</q>"#,
        &marks,
    );
    assert_eq!(extracted.definitions.len(), 2);
    assert_eq!(extracted.definitions[0].mark_type, "abbreviation");
    assert_eq!(
        extracted.definitions[0].field_str("title"),
        Some("HyperText Markup Language")
    );
    assert_eq!(extracted.definitions[1].field_str("cite"), Some("anonymous"));
}

#[test]
fn test_removed_rule_makes_tag_transparent() {
    let mut marks = MarkConfig::default();
    marks.remove("b");
    let extracted = extract("<b>x</b><i>y</i>", &marks);
    assert_eq!(
        summary(&extracted),
        vec![
            ("x".to_string(), owned(&[])),
            ("y".to_string(), owned(&["em"])),
        ]
    );
}

#[test]
fn test_whitespace_only_text_still_becomes_a_span() {
    let extracted = extract("<b>a</b> <i>b</i>", &MarkConfig::default());
    assert_eq!(extracted.spans.len(), 3);
    assert_eq!(extracted.spans[1].text, " ");
}

#[test]
fn test_keys_are_unique_across_spans_and_definitions() {
    let extracted = extract(
        r#"<a href="/1">one</a> <a href="/2"><b>two</b> three</a>"#,
        &MarkConfig::default(),
    );
    let mut keys: Vec<_> = extracted
        .spans
        .iter()
        .map(|s| s.key.clone())
        .chain(extracted.definitions.iter().map(|d| d.key.clone()))
        .collect();
    let total = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), total);
}
