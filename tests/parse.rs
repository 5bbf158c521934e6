//! Behaviour of parsed documents as seen through the public API

use litexml::{parse, parse_with, Element, ElementKind, Error, ParseOptions, Result};

fn walk(element: &Element<'_>, out: &mut Vec<String>) -> Result<()> {
    let content = element.content()?.map(|c| c.to_owned_string());
    out.push(format!("{:?}:{}:{:?}", element.kind(), element.name()?, content));
    for child in element.children() {
        walk(&child?, out)?;
    }
    Ok(())
}

fn traversal(xml: &str) -> Vec<String> {
    let doc = parse(xml).unwrap();
    let mut out = Vec::new();
    walk(&doc.root(), &mut out).unwrap();
    out
}

#[test]
fn root_name_matches_declared_tag() {
    for (xml, name) in [
        ("<a/>", "a"),
        ("<item>1</item>", "item"),
        ("<ns:tag k=\"v\"></ns:tag>", "ns:tag"),
        ("\n  <root>\n</root>\n", "root"),
    ] {
        let doc = parse(xml).unwrap();
        assert_eq!(doc.root().kind(), ElementKind::Tag);
        assert_eq!(doc.root().name().unwrap(), name);
    }
}

#[test]
fn self_closing_tag() {
    let doc = parse("<a/>").unwrap();
    let root = doc.root();
    assert_eq!(root.kind(), ElementKind::Tag);
    assert_eq!(root.name().unwrap(), "a");
    assert_eq!(root.content().unwrap(), None);
    assert_eq!(root.children().count(), 0);
}

#[test]
fn attribute_and_nested_tag() {
    let doc = parse("<a x=\"1\"><b/></a>").unwrap();
    let root = doc.root();
    assert_eq!(root.name().unwrap(), "a");
    assert_eq!(root.content().unwrap(), None);

    let children = root.children().collect::<Result<Vec<_>>>().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].kind(), ElementKind::Attribute);
    assert_eq!(children[0].name().unwrap(), "x");
    assert_eq!(children[0].content().unwrap().unwrap(), "1");
    assert_eq!(children[1].kind(), ElementKind::Tag);
    assert_eq!(children[1].name().unwrap(), "b");
}

#[test]
fn text_content_is_not_a_child() {
    let doc = parse("<a>hello</a>").unwrap();
    let root = doc.root();
    assert_eq!(root.content().unwrap().unwrap(), "hello");
    assert_eq!(root.children().count(), 0);
}

#[test]
fn attributes_alongside_text() {
    let doc = parse("<a x=\"1\">hi</a>").unwrap();
    let root = doc.root();
    assert_eq!(root.content().unwrap().unwrap(), "hi");
    let children = root.children().collect::<Result<Vec<_>>>().unwrap();
    assert_eq!(children.len(), 1);
    assert!(children[0].is_attribute());
}

#[test]
fn mismatched_closing_tag() {
    let err = parse("<a></b>").unwrap_err();
    assert!(err.is_structure());
}

#[test]
fn second_root_tag() {
    let err = parse("<a/><b/>").unwrap_err();
    assert!(err.is_structure());
    assert_eq!(err.position(), Some(4));
}

#[test]
fn comments_and_instructions_are_skipped() {
    let xml = "<?xml version=\"1.0\"?>\n<!-- head -->\n<r>\n  <!-- inside -->\n  <a/>\n  <?pi data?>\n  <b/>\n</r>\n<!-- tail -->\n";
    let doc = parse(xml).unwrap();
    let names: Vec<_> = doc
        .root()
        .children()
        .map(|c| c.unwrap().name().unwrap().to_owned_string())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn values_are_not_unescaped() {
    let doc = parse("<a href=\"x?a=1&amp;b=2\">&lt;tag&gt;</a>").unwrap();
    let root = doc.root();
    assert_eq!(root.attribute("href").unwrap().unwrap(), "x?a=1&amp;b=2");
    assert_eq!(root.content().unwrap().unwrap(), "&lt;tag&gt;");
}

#[test]
fn truncated_documents_fail_cleanly() {
    let xml = "<r a=\"1\"><b>text</b><c/></r>";
    for cut in 0..xml.len() {
        let err = parse(&xml[..cut]).unwrap_err();
        assert!(err.is_structure(), "cut at {cut}: {err:?}");
    }
    assert!(parse(xml).is_ok());
}

#[test]
fn unicode_names_and_text() {
    let doc = parse("<café prix=\"5€\">naïve</café>").unwrap();
    let root = doc.root();
    assert_eq!(root.name().unwrap(), "café");
    assert_eq!(root.attribute("prix").unwrap().unwrap(), "5€");
    assert_eq!(root.content().unwrap().unwrap(), "naïve");
}

#[test]
fn spans_point_into_source() {
    let xml = String::from("<a>hello</a>");
    let doc = parse(&xml).unwrap();
    let content = doc.root().content().unwrap().unwrap();
    assert!(std::ptr::eq(content.source(), xml.as_str()));
    assert_eq!(content.offset(), 3);
}

#[test]
fn same_text_parses_to_same_tree() {
    let xml = "<r k=\"v\" j=\"w\"><a><x>1</x><y/></a><b>two</b><c q=\"\"/></r>";
    let first = traversal(xml);
    let second = traversal(xml);
    assert_eq!(first, second);
    assert_eq!(first.len(), 9);
}

#[test]
fn deep_nesting() {
    let depth = 200;
    let xml = format!("{}{}", "<n>".repeat(depth), "</n>".repeat(depth));
    let doc = parse(&xml).unwrap();
    let mut current = doc.root();
    let mut seen = 1;
    while let Some(next) = current.children().next() {
        current = next.unwrap();
        seen += 1;
    }
    assert_eq!(seen, depth);
}

#[test]
fn runaway_nesting_is_an_error() {
    let depth = 100_000;
    let xml = format!("{}{}", "<n>".repeat(depth), "</n>".repeat(depth));
    let err = parse(&xml).unwrap_err();
    assert!(err.is_structure());
    assert_eq!(err.position(), Some(3 * 1024));
    assert!(err.to_string().starts_with("nesting too deep"));
}

#[test]
fn nesting_limit_is_configurable() {
    let xml = format!("{}{}", "<n>".repeat(10), "</n>".repeat(10));
    assert!(parse_with(&xml, &ParseOptions::new().with_max_depth(10)).is_ok());
    assert!(parse_with(&xml, &ParseOptions::new().with_max_depth(9)).is_err());
}

#[test]
fn huge_initial_capacity_is_harmless() {
    let options = ParseOptions::new().with_initial_capacity(usize::MAX);
    let doc = parse_with("<a><b/></a>", &options).unwrap();
    assert_eq!(doc.entry_count(), 4);
}

#[test]
fn small_initial_capacity_grows() {
    let xml = format!("<r>{}</r>", "<c k=\"v\">t</c>".repeat(50));
    let options = ParseOptions::default().with_initial_capacity(1);
    let doc = parse_with(&xml, &options).unwrap();
    assert_eq!(doc.root().children().count(), 50);
}

#[test]
fn error_carries_bounded_preview() {
    let options = ParseOptions::default().with_preview_len(5);
    let xml = format!("<a>{}", "<b/>".repeat(20)) + "<c x=oops/></a>";
    match parse_with(&xml, &options).unwrap_err() {
        Error::Structure { preview, message, .. } => {
            assert_eq!(message, "expected '\"'");
            assert_eq!(preview, "...[oops/]...");
        }
        other => panic!("unexpected {other:?}"),
    }
}
