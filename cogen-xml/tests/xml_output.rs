//! Rendering tests for the XML plugin.

use cogen_core::{Cogen, Fields, Rules, Target, Value};

fn cogen() -> Cogen {
    Cogen::new().with_plugin(cogen_xml::plugin)
}

fn doc(content: Vec<Target>) -> Target {
    Target::new("xml").with("content", content)
}

fn tag(name: &str, content: Vec<Target>) -> Target {
    let node = Target::new("xml:tag").with("name", name);
    if content.is_empty() { node } else { node.with("content", content) }
}

fn attrs(tag: Target, pairs: Vec<(&str, Value)>) -> Target {
    let map: Fields = pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();
    tag.with("attributes", map)
}

fn text(content: &str) -> Target {
    Target::new("xml:content").with("content", content)
}

fn render(target: Target, rules: &Rules) -> String {
    cogen().generate_by(target, rules).unwrap()
}

fn product_catalog() -> Target {
    doc(vec![tag(
        "abcd",
        vec![
            attrs(tag("hello", vec![]), vec![("target", "world".into())]),
            tag(
                "product",
                vec![
                    attrs(
                        tag("product-image", vec![]),
                        vec![("src", "/bla/bla".into()), ("lazy-load", true.into())],
                    ),
                    tag("product-name", vec![text("box")]),
                ],
            ),
        ],
    )])
}

#[test]
fn test_nested_tags() {
    insta::assert_snapshot!(render(product_catalog(), &Rules::new()), @r#"
    <abcd>
        <hello target="world" />
        <product>
            <product-image src="/bla/bla" lazy-load />
            <product-name>
                box
            </product-name>
        </product>
    </abcd>
    "#);
}

#[test]
fn test_boolean_attributes() {
    let image = attrs(
        tag("product-image", vec![]),
        vec![("src", "/a".into()), ("lazy-load", true.into()), ("hidden", false.into())],
    );
    assert_eq!(
        render(doc(vec![image]), &Rules::new()),
        r#"<product-image src="/a" lazy-load />"#
    );
}

#[test]
fn test_top_level_siblings() {
    let out = render(doc(vec![tag("a", vec![]), tag("b", vec![])]), &Rules::new());
    assert_eq!(out, "<a />\n<b />");
}

#[test]
fn test_empty_tag_without_self_closing() {
    let rules = Rules::new().with_table("xml", Rules::new().with("selfclosedEmptyTags", false));
    let out = render(doc(vec![tag("p", vec![tag("br", vec![])])]), &rules);
    assert_eq!(out, "<p>\n    <br></br>\n</p>");
}

#[test]
fn test_inline_content_rules() {
    let rules = Rules::new().with_table(
        "xml",
        Rules::new()
            .with("newLineAfterOpenTag", false)
            .with("newLineBeforeCloseTag", false)
            .with("spaceBeforeSelfclosedClose", false)
            .with("spaceBeforeAttributeEqualSign", true)
            .with("spaceAfterAttributeEqualSign", true),
    );
    let link = attrs(tag("a", vec![text("home")]), vec![("href", "/".into())]);
    let out = render(doc(vec![tag("nav", vec![link, tag("hr", vec![])])]), &rules);
    assert_eq!(out, "<nav><a href = \"/\">home</a>\n    <hr/></nav>");
}

#[test]
fn test_escaping() {
    let node = attrs(
        tag("q", vec![text("a < b & c")]),
        vec![("title", r#"say "hi""#.into()), ("n", 3.into())],
    );
    assert_eq!(
        render(doc(vec![node]), &Rules::new()),
        "<q title=\"say &quot;hi&quot;\" n=\"3\">\n    a &lt; b &amp; c\n</q>"
    );
}

#[test]
fn test_custom_tab() {
    let rules = Rules::new().with_table("xml", Rules::new().with("tab", "\t"));
    let out = render(doc(vec![tag("a", vec![tag("b", vec![text("x")])])]), &rules);
    assert_eq!(out, "<a>\n\t<b>\n\t\tx\n\t</b>\n</a>");
}

#[test]
fn test_minify() {
    let out = render(product_catalog(), &Rules::new().with("minify", true));
    assert_eq!(
        out,
        r#"<abcd><hello target="world"/><product><product-image src="/bla/bla" lazy-load/><product-name>box</product-name></product></abcd>"#
    );
}

#[test]
fn test_invalid_attributes_are_reported() {
    let bad = attrs(tag("a", vec![]), vec![("nested", Value::List(vec![]))]);
    let err = cogen().generate_by(doc(vec![bad]), &Rules::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "attribute `nested` must be text, a number or a boolean, found [0 items]"
    );
}

#[test]
fn test_attribute_named_kind() {
    let tree = Target::from_json_str(
        r#"{"kind": "xml", "content": [
            {"kind": "xml:tag", "name": "input", "attributes": {"kind": "primary", "disabled": true}}
        ]}"#,
    )
    .unwrap();
    assert_eq!(
        render(tree, &Rules::new()),
        r#"<input kind="primary" disabled />"#
    );
}
