use std::sync::Arc;

use cogen_core::{Context, Error, Result, RuleScope, Target, Value};
use eyre::eyre;

use crate::escape::{escape_attribute, escape_text};

/// One attribute as it will be written.
enum Attribute {
    /// `name`, from a `true` value.
    Bare(String),
    /// `name="value"`
    Valued(String, String),
}

pub(crate) fn document(cx: &mut Context<'_>, target: &Target, rules: &RuleScope) -> Result<()> {
    let children = target.children("content")?;
    cx.builder().push_tab(rules.tab());
    let result = siblings(cx, children, rules);
    cx.builder().pop_tab();
    result
}

pub(crate) fn tag(cx: &mut Context<'_>, target: &Target, rules: &RuleScope) -> Result<()> {
    let name = target.required_text("name")?;
    let attributes = attributes(target)?;
    let children = target.children("content")?;

    let builder = cx.builder();
    builder
        .next_line_if(rules.flag("newLineBeforeOpenTag"))
        .add("<")
        .add_ws_if(rules.flag("spaceBeforeTagName"), " ")
        .add(name);
    for attribute in attributes {
        builder.add(" ");
        match attribute {
            Attribute::Bare(key) => {
                builder.add(key);
            }
            Attribute::Valued(key, value) => {
                builder
                    .add(key)
                    .add_ws_if(rules.flag("spaceBeforeAttributeEqualSign"), " ")
                    .add("=")
                    .add_ws_if(rules.flag("spaceAfterAttributeEqualSign"), " ")
                    .add(format!("\"{value}\""));
            }
        }
    }

    if children.is_empty() {
        if rules.flag("selfclosedEmptyTags") {
            builder
                .add_ws_if(rules.flag("spaceBeforeSelfclosedClose"), " ")
                .add("/>");
        } else {
            builder.add_ws_if(rules.flag("spaceBeforeTagClose"), " ").add(">");
            close_tag(cx, name, rules);
        }
        return Ok(());
    }

    builder
        .add_ws_if(rules.flag("spaceBeforeTagClose"), " ")
        .add(">")
        .level_up_with(rules.flag("newLineAfterOpenTag"));
    siblings(cx, children, rules)?;
    cx.builder()
        .level_down_with(rules.flag("newLineBeforeCloseTag"));
    close_tag(cx, name, rules);
    Ok(())
}

pub(crate) fn content(cx: &mut Context<'_>, target: &Target, _: &RuleScope) -> Result<()> {
    let text = match target.required("content")? {
        Value::Text(text) => escape_text(text).into_owned(),
        scalar @ (Value::Number(_) | Value::Bool(_)) => scalar.to_string(),
        other => {
            return Err(Error::plugin(eyre!(
                "`xml:content` must hold text, found {other}"
            )));
        }
    };
    cx.builder().add(text);
    Ok(())
}

/// Render nodes one after another, line-separated per `newLineAfterCloseTag`.
fn siblings(cx: &mut Context<'_>, nodes: Vec<&Arc<Target>>, rules: &RuleScope) -> Result<()> {
    let separate = rules.flag("newLineAfterCloseTag");
    cx.for_tail_and_head(nodes, |cx, node, is_head, _| {
        cx.run_for(Arc::clone(node))?;
        cx.builder().next_line_if(!is_head && separate);
        Ok(())
    })?;
    Ok(())
}

fn close_tag(cx: &mut Context<'_>, name: &str, rules: &RuleScope) {
    cx.builder()
        .add("</")
        .add_ws_if(rules.flag("spaceBeforeTagName"), " ")
        .add(name)
        .add_ws_if(rules.flag("spaceAfterTagName"), " ")
        .add(">");
}

fn attributes(target: &Target) -> Result<Vec<Attribute>> {
    let Some(map) = target.get("attributes") else {
        return Ok(Vec::new());
    };
    let map = map.as_fields().ok_or_else(|| {
        Error::plugin(eyre!(
            "attributes of `{}` must map names to values",
            target.text("name").unwrap_or_default()
        ))
    })?;

    let mut out = Vec::with_capacity(map.len());
    for (key, value) in map.iter() {
        match value {
            Value::Bool(true) => out.push(Attribute::Bare(key.clone())),
            Value::Bool(false) => {}
            Value::Text(text) => {
                out.push(Attribute::Valued(key.clone(), escape_attribute(text).into_owned()))
            }
            Value::Number(number) => out.push(Attribute::Valued(key.clone(), number.to_string())),
            other => {
                return Err(Error::plugin(eyre!(
                    "attribute `{key}` must be text, a number or a boolean, found {other}"
                )));
            }
        }
    }
    Ok(out)
}
