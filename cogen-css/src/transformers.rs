use std::sync::Arc;

use cogen_core::{Context, LineBuilder, Result, RuleScope, Target};

use crate::nodes::{AtRuleNode, COMMENT_KIND, Description, FIRST_IN_BLOCK, FieldNode, RuleNode, Selector};

pub(crate) fn stylesheet(cx: &mut Context<'_>, target: &Target, rules: &RuleScope) -> Result<()> {
    let children = target.children("content")?;
    cx.builder().push_tab(rules.tab());
    let result = cx.for_tail_and_head(children, |cx, child, is_head, _| {
        cx.run_for(Arc::clone(child))?;
        if !is_head {
            cx.builder()
                .next_line()
                .next_line_if(rules.flag("nextLineAfterRule"));
        }
        Ok(())
    })
    .map(drop);
    cx.builder().pop_tab();
    result
}

pub(crate) fn rule(cx: &mut Context<'_>, target: &Target, rules: &RuleScope) -> Result<()> {
    let node = RuleNode::from_target(target)?;
    if let Some(description) = node.description {
        describe(cx, description)?;
    }

    match node.selector {
        Selector::One(selector) => {
            cx.builder().add(selector);
        }
        Selector::Many(selectors) => {
            let by_lines = rules.flag("separateSelectorsByNewLines");
            cx.builder().do_for_tail_and_head(selectors, |b, selector, is_head, _| {
                b.add(selector);
                if !is_head {
                    b.add(",").next_line_if(by_lines).add_ws_if(!by_lines, " ");
                }
            });
        }
    }

    bracket_gap(cx.builder(), rules);
    if node.content.is_empty() {
        cx.builder().add("{}");
        return Ok(());
    }
    cx.builder().add("{").level_up();
    cx.for_tail_and_head(node.content, |cx, child, is_head, index| {
        cx.run_for(child.annotated(FIRST_IN_BLOCK, index == 0))?;
        cx.builder()
            .add_if(child.kind() != COMMENT_KIND, ";")
            .next_line_if(!is_head);
        Ok(())
    })?;
    cx.builder().level_down().add("}");
    Ok(())
}

pub(crate) fn field(cx: &mut Context<'_>, target: &Target, rules: &RuleScope) -> Result<()> {
    let node = FieldNode::from_target(target)?;
    if let Some(description) = node.description {
        if !node.first {
            cx.builder()
                .clear_line_if(rules.flag("clearEmptyLines"))
                .next_line();
        }
        describe(cx, description)?;
    }

    cx.builder()
        .add(node.name)
        .add_ws_if(rules.flag("spaceBeforeFieldColon"), " ")
        .add(":")
        .add_ws_if(rules.flag("spaceAfterFieldColon"), " ")
        .add(node.value);
    Ok(())
}

pub(crate) fn at_rule(cx: &mut Context<'_>, target: &Target, rules: &RuleScope) -> Result<()> {
    let node = AtRuleNode::from_target(target)?;
    if let Some(description) = node.description {
        describe(cx, description)?;
    }

    cx.builder().add("@").add(node.name);
    if let Some(rule) = node.rule {
        cx.builder().add(" ").add(rule);
    }

    if node.content.is_empty() {
        cx.builder().add(";");
        return Ok(());
    }

    bracket_gap(cx.builder(), rules);
    cx.builder().add("{").level_up();
    let blank_line = rules.flag("nextLineAfterRule");
    let keep_shift = !rules.flag("clearEmptyLines");
    cx.for_tail_and_head(node.content, |cx, child, is_head, _| {
        cx.run_for(Arc::clone(child))?;
        cx.builder()
            .next_line_if_with(!is_head && blank_line, keep_shift)
            .next_line_if(!is_head);
        Ok(())
    })?;
    cx.builder().level_down().add("}");
    Ok(())
}

pub(crate) fn comment(cx: &mut Context<'_>, target: &Target, rules: &RuleScope) -> Result<()> {
    let content = target.required_text("content")?;
    cx.builder()
        .add("/*")
        .add_ws_if(rules.flag("spaceBeforeCommentContentStart"), " ")
        .add(content)
        .add_ws_if(rules.flag("spaceAfterCommentContentStart"), " ")
        .add("*/");
    Ok(())
}

/// Whitespace between a selector or at-rule prelude and its `{`.
fn bracket_gap(builder: &mut LineBuilder, rules: &RuleScope) {
    if rules.flag("newLineBeforeRuleOpenBracket") {
        builder.next_line();
    } else {
        builder.add_ws_if(rules.flag("spaceBeforeRuleOpenBracket"), " ");
    }
}

/// Render a description on its own line above the described node.
fn describe(cx: &mut Context<'_>, description: Description<'_>) -> Result<()> {
    match description {
        Description::Node(node) => cx.run_for(Arc::clone(node))?,
        Description::Text(text) => cx.run_for(Target::new(COMMENT_KIND).with("content", text))?,
    };
    cx.builder().next_line();
    Ok(())
}
