//! Rendering tests for the CSS plugin.

use cogen_core::{Cogen, Rules, Target};

fn cogen() -> Cogen {
    Cogen::new().with_plugin(cogen_css::plugin)
}

fn sheet(content: Vec<Target>) -> Target {
    Target::new("css").with("content", content)
}

fn rule(selector: impl Into<cogen_core::Value>, fields: Vec<Target>) -> Target {
    Target::new("css:rule").with("selector", selector).with("content", fields)
}

fn field(name: &str, value: &str) -> Target {
    Target::new("css:field").with("name", name).with("content", value)
}

fn body() -> Target {
    rule("body", vec![field("margin", "0"), field("min-height", "100vh")])
}

fn render(target: Target) -> String {
    cogen().generate_by(target, &Rules::new()).unwrap()
}

#[test]
fn test_single_rule() {
    insta::assert_snapshot!(render(sheet(vec![body()])), @r"
    body {
      margin: 0;
      min-height: 100vh;
    }
    ");
}

#[test]
fn test_rules_separated_by_blank_line() {
    let red = rule(".red > .green", vec![field("color", "green"), field("background", "red")]);
    insta::assert_snapshot!(render(sheet(vec![body(), red])), @r"
    body {
      margin: 0;
      min-height: 100vh;
    }

    .red > .green {
      color: green;
      background: red;
    }
    ");
}

#[test]
fn test_selector_list() {
    let target = sheet(vec![rule(
        vec!["body", ".page", ".page--block"],
        vec![field("margin", "0"), field("min-height", "100vh")],
    )]);
    insta::assert_snapshot!(render(target), @r"
    body,
    .page,
    .page--block {
      margin: 0;
      min-height: 100vh;
    }
    ");
}

#[test]
fn test_selector_list_on_one_line() {
    let target = sheet(vec![rule(vec!["a", "b"], vec![field("color", "red")])]);
    let rules = Rules::new().with_table("css", Rules::new().with("separateSelectorsByNewLines", false));
    let out = cogen().generate_by(target, &rules).unwrap();
    assert_eq!(out, "a, b {\n  color: red;\n}");
}

#[test]
fn test_media_at_rule() {
    let media = Target::new("css:atRule")
        .with("name", "media")
        .with("rule", "all and (min-width: 563px)")
        .with(
            "content",
            vec![
                rule(".body", vec![field("margin", "0"), field("min-height", "100vh")]),
                rule(".body--light", vec![field("background", "white")]),
            ],
        );
    insta::assert_snapshot!(render(sheet(vec![media])), @r"
    @media all and (min-width: 563px) {
      .body {
        margin: 0;
        min-height: 100vh;
      }

      .body--light {
        background: white;
      }
    }
    ");
}

#[test]
fn test_comment_before_rule() {
    let comment = Target::new("css:comment").with("content", "Test");
    insta::assert_snapshot!(render(sheet(vec![comment, body()])), @r"
    /* Test */

    body {
      margin: 0;
      min-height: 100vh;
    }
    ");
}

#[test]
fn test_descriptions() {
    let described = Target::new("css:rule")
        .with("selector", "body")
        .with("description", "My Block")
        .with(
            "content",
            vec![
                field("margin", "0").with("description", "margin"),
                field("min-height", "100vh").with("description", "min-height"),
            ],
        );
    let include = Target::new("css:atRule")
        .with("description", "includes")
        .with("name", "include")
        .with("rule", "'src/includes.css'");

    insta::assert_snapshot!(render(sheet(vec![described, include])), @r"
    /* My Block */
    body {
      /* margin */
      margin: 0;

      /* min-height */
      min-height: 100vh;
    }

    /* includes */
    @include 'src/includes.css';
    ");
}

#[test]
fn test_description_as_target() {
    let described = rule("a", vec![field("color", "red")]).with(
        "description",
        Target::new("css:comment").with("content", "links"),
    );
    let rules = Rules::new().with_table("css", Rules::new().with("spaceBeforeCommentContentStart", false));
    let out = cogen().generate_by(sheet(vec![described]), &rules).unwrap();
    assert_eq!(out, "/*links */\na {\n  color: red;\n}");
}

#[test]
fn test_comment_inside_rule_has_no_semicolon() {
    let target = sheet(vec![rule(
        "a",
        vec![Target::new("css:comment").with("content", "reset"), field("color", "red")],
    )]);
    assert_eq!(render(target), "a {\n  /* reset */\n  color: red;\n}");
}

#[test]
fn test_empty_rule_and_bare_at_rule() {
    let charset = Target::new("css:atRule").with("name", "charset").with("rule", "\"utf-8\"");
    let empty = rule(".empty", vec![]);
    assert_eq!(render(sheet(vec![charset, empty])), "@charset \"utf-8\";\n\n.empty {}");
}

#[test]
fn test_custom_tab_and_bracket_rules() {
    let rules = Rules::new().with_table(
        "css",
        Rules::new()
            .with("tab", "\t")
            .with("newLineBeforeRuleOpenBracket", true)
            .with("spaceAfterFieldColon", false)
            .with("nextLineAfterRule", false),
    );
    let target = sheet(vec![rule("a", vec![field("color", "red")]), rule("b", vec![field("top", "0")])]);
    let out = cogen().generate_by(target, &rules).unwrap();
    assert_eq!(out, "a\n{\n\tcolor:red;\n}\nb\n{\n\ttop:0;\n}");
}

#[test]
fn test_minify() {
    let comment = Target::new("css:comment").with("content", "Test");
    let media = Target::new("css:atRule")
        .with("name", "media")
        .with("rule", "print")
        .with("content", vec![rule(vec!["a", "b"], vec![field("color", "red")])]);
    let out = cogen()
        .generate_by(sheet(vec![comment, body(), media]), &Rules::new().with("minify", true))
        .unwrap();
    assert_eq!(out, "/*Test*/body{margin:0;min-height:100vh;}@media print{a,b{color:red;}}");
}

#[test]
fn test_numeric_field_values() {
    let target = sheet(vec![rule(
        ".layer",
        vec![Target::new("css:field").with("name", "z-index").with("content", 10)],
    )]);
    assert_eq!(render(target), ".layer {\n  z-index: 10;\n}");
}

#[test]
fn test_invalid_rule_is_reported() {
    let bad = sheet(vec![Target::new("css:rule").with("content", Vec::<Target>::new())]);
    let err = cogen().generate_by(bad, &Rules::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "`css:rule` target is missing required field `selector`"
    );
}
