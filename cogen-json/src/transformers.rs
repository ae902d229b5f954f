use std::{str::FromStr, sync::Arc};

use cogen_core::{Context, Error, Result, RuleScope, Target, Value};
use eyre::eyre;

pub(crate) fn document(cx: &mut Context<'_>, target: &Target, rules: &RuleScope) -> Result<()> {
    let value = target
        .node("content")
        .ok_or_else(|| Error::plugin(eyre!("`json` document must hold a single value target")))?;
    cx.run_for_in(Arc::clone(value), rules)?;
    Ok(())
}

pub(crate) fn object(cx: &mut Context<'_>, target: &Target, rules: &RuleScope) -> Result<()> {
    let fields = match target.get("content") {
        None => Vec::new(),
        Some(content) => {
            let map = content.as_fields().ok_or_else(|| {
                Error::plugin(eyre!(
                    "`json:object` content must map names to targets, found {content}"
                ))
            })?;
            map.iter()
                .map(|(key, value)| -> Result<_> {
                    Ok((key.clone(), Arc::clone(member(target, key, value)?)))
                })
                .collect::<Result<Vec<_>>>()?
        }
    };

    if fields.is_empty() && rules.flag("singleLineEmptyObject") {
        cx.builder().add("{}");
        return Ok(());
    }

    let empty = fields.is_empty();
    open(cx, rules, "{");
    cx.for_tail_and_head(fields, |cx, (key, value), is_head, _| {
        cx.builder()
            .add(quote(&key)?)
            .add_ws_if(rules.flag("spaceBeforeColon"), " ")
            .add(":")
            .add_ws_if(rules.flag("spaceAfterColon"), " ");
        cx.run_for(value)?;
        separate(cx, rules, is_head);
        Ok(())
    })?;
    close(cx, rules, "}", empty);
    Ok(())
}

pub(crate) fn array(cx: &mut Context<'_>, target: &Target, rules: &RuleScope) -> Result<()> {
    let items = target.children("content")?;
    if items.is_empty() && rules.flag("singleLineEmptyArray") {
        cx.builder().add("[]");
        return Ok(());
    }

    let empty = items.is_empty();
    open(cx, rules, "[");
    cx.for_tail_and_head(items, |cx, item, is_head, _| {
        cx.run_for(Arc::clone(item))?;
        separate(cx, rules, is_head);
        Ok(())
    })?;
    close(cx, rules, "]", empty);
    Ok(())
}

pub(crate) fn number(cx: &mut Context<'_>, target: &Target, _: &RuleScope) -> Result<()> {
    let literal = match target.required("content")? {
        Value::Number(number) => number.to_string(),
        Value::Text(text) => serde_json::Number::from_str(text.trim())
            .map_err(|_| Error::plugin(eyre!("`{text}` is not a JSON number")))?
            .to_string(),
        other => return Err(Error::plugin(eyre!("`json:number` content must be numeric, found {other}"))),
    };
    cx.builder().add(literal);
    Ok(())
}

pub(crate) fn string(cx: &mut Context<'_>, target: &Target, _: &RuleScope) -> Result<()> {
    let quoted = quote(target.required_text("content")?)?;
    cx.builder().add(quoted);
    Ok(())
}

pub(crate) fn boolean(cx: &mut Context<'_>, target: &Target, _: &RuleScope) -> Result<()> {
    let value = target
        .required("content")?
        .as_bool()
        .ok_or_else(|| Error::plugin(eyre!("`json:boolean` content must be true or false")))?;
    cx.builder().add(value.to_string());
    Ok(())
}

pub(crate) fn null(cx: &mut Context<'_>, _: &Target, _: &RuleScope) -> Result<()> {
    cx.builder().add("null");
    Ok(())
}

fn member<'t>(object: &Target, key: &str, value: &'t Value) -> Result<&'t Arc<Target>> {
    value.as_node().ok_or_else(|| {
        Error::plugin(eyre!(
            "member `{key}` of `{}` must be a target, found {value}",
            object.kind()
        ))
    })
}

fn quote(text: &str) -> Result<String> {
    serde_json::to_string(text).map_err(|e| Error::plugin(eyre::Report::new(e)))
}

fn open(cx: &mut Context<'_>, rules: &RuleScope, bracket: &str) {
    cx.builder()
        .next_line_if(rules.flag("newLineBeforeOpenBracket"))
        .add(bracket)
        .level_up_with(rules.flag("newLineAfterOpenBracket"));
}

fn separate(cx: &mut Context<'_>, rules: &RuleScope, is_head: bool) {
    if !is_head {
        cx.builder()
            .add(",")
            .next_line_if(rules.flag("newLineAfterField"));
    }
}

/// An empty body never gets its own line before the closing bracket.
fn close(cx: &mut Context<'_>, rules: &RuleScope, bracket: &str, empty: bool) {
    cx.builder()
        .level_down_with(rules.flag("newLineBeforeCloseBracket") && !empty)
        .add(bracket);
}
