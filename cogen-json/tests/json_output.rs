//! Rendering tests for the JSON plugin.

use cogen_core::{Cogen, Fields, Rules, Target};

fn cogen() -> Cogen {
    Cogen::new().with_plugin(cogen_json::plugin)
}

fn doc(value: Target) -> Target {
    Target::new("json").with("content", value)
}

fn string(text: &str) -> Target {
    Target::new("json:string").with("content", text)
}

fn number(value: impl Into<cogen_core::Value>) -> Target {
    Target::new("json:number").with("content", value)
}

fn array(items: Vec<Target>) -> Target {
    Target::new("json:array").with("content", items)
}

fn object(fields: Vec<(&str, Target)>) -> Target {
    let content: Fields = fields
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.into()))
        .collect();
    Target::new("json:object").with("content", content)
}

fn render(value: Target, rules: &Rules) -> String {
    cogen().generate_by(doc(value), rules).unwrap()
}

#[test]
fn test_object_fields_in_insertion_order() {
    let value = object(vec![("a", string("test")), ("b", string("well")), ("c", number(52))]);
    insta::assert_snapshot!(render(value, &Rules::new()), @r#"
    {
      "a": "test",
      "b": "well",
      "c": 52
    }
    "#);
}

#[test]
fn test_nested_array_with_wide_tab() {
    let value = array(vec![
        number(56),
        number("112"),
        array(vec![]),
        array(vec![string("hello")]),
        Target::new("json:object"),
    ]);
    let rules = Rules::new().with_table("json", Rules::new().with("tab", "    "));
    assert_eq!(
        render(value, &rules),
        "[\n    56,\n    112,\n    [],\n    [\n        \"hello\"\n    ],\n    {}\n]"
    );
}

#[test]
fn test_empty_containers() {
    assert_eq!(render(array(vec![]), &Rules::new()), "[]");
    assert_eq!(render(object(vec![]), &Rules::new()), "{}");
}

#[test]
fn test_empty_containers_on_separate_lines() {
    let rules = Rules::new().with_table(
        "json",
        Rules::new()
            .with("singleLineEmptyArray", false)
            .with("singleLineEmptyObject", false),
    );
    let value = object(vec![("list", array(vec![])), ("map", object(vec![]))]);
    insta::assert_snapshot!(render(value, &rules), @r#"
    {
      "list": [
      ],
      "map": {
      }
    }
    "#);
}

#[test]
fn test_scalars_and_escaping() {
    let value = object(vec![
        ("say \"hi\"", string("line\nbreak")),
        ("ok", Target::new("json:boolean").with("content", true)),
        ("none", Target::new("json:null")),
        ("ratio", number("0.5")),
    ]);
    insta::assert_snapshot!(render(value, &Rules::new()), @r#"
    {
      "say \"hi\"": "line\nbreak",
      "ok": true,
      "none": null,
      "ratio": 0.5
    }
    "#);
}

#[test]
fn test_compact_rules() {
    let rules = Rules::new().with_table(
        "json",
        Rules::new()
            .with("newLineAfterOpenBracket", false)
            .with("newLineBeforeCloseBracket", false)
            .with("newLineAfterField", false)
            .with("spaceBeforeColon", true),
    );
    let value = object(vec![("a", number(1)), ("b", array(vec![number(2), number(3)]))]);
    assert_eq!(render(value, &rules), r#"{"a" : 1,"b" : [2,3]}"#);
}

#[test]
fn test_minify() {
    let value = object(vec![
        ("a", string("test")),
        ("b", array(vec![number(1), object(vec![("c", number(2))])])),
    ]);
    let out = render(value, &Rules::new().with("minify", true));
    assert_eq!(out, r#"{"a":"test","b":[1,{"c":2}]}"#);
}

#[test]
fn test_rendered_document_parses_back() {
    let value = object(vec![
        ("name", string("cogen")),
        ("tags", array(vec![string("a"), string("b\"c")])),
        ("size", number(3)),
    ]);
    let out = render(value, &Rules::new());
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["tags"][1], "b\"c");
    assert_eq!(parsed["size"], 3);
}

#[test]
fn test_loads_tree_from_wire_shape() {
    let tree = Target::from_json_str(
        r#"{"kind": "json", "content": {"kind": "json:array", "content": [
            {"kind": "json:number", "content": 1},
            {"kind": "json:string", "content": "x"}
        ]}}"#,
    )
    .unwrap();
    let out = cogen().generate_by(tree, &Rules::new()).unwrap();
    assert_eq!(out, "[\n  1,\n  \"x\"\n]");
}

#[test]
fn test_invalid_nodes_are_reported() {
    let not_a_number = doc(number("twelve"));
    let err = cogen().generate_by(not_a_number, &Rules::new()).unwrap_err();
    assert_eq!(err.to_string(), "`twelve` is not a JSON number");

    let unknown = doc(Target::new("json:date"));
    let err = cogen().generate_by(unknown, &Rules::new()).unwrap_err();
    assert_eq!(err.unresolved_kind(), Some("json:date"));
}

#[test]
fn test_member_named_kind() {
    let tree = Target::from_json_str(
        r#"{"kind": "json", "content": {"kind": "json:object", "content": {
            "kind": {"kind": "json:string", "content": "box"}
        }}}"#,
    )
    .unwrap();
    let out = cogen().generate_by(tree, &Rules::new()).unwrap();
    assert_eq!(out, "{\n  \"kind\": \"box\"\n}");

    let text_member = Target::from_json_str(
        r#"{"kind": "json", "content": {"kind": "json:object", "content": {"kind": "box"}}}"#,
    )
    .unwrap();
    let err = cogen().generate_by(text_member, &Rules::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "member `kind` of `json:object` must be a target, found box"
    );
}
