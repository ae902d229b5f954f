//! Typed views over `css:*` targets.

use std::sync::Arc;

use cogen_core::{Error, Result, Target, Value};
use eyre::eyre;

/// Positional annotation set on each child of a rule block.
pub const FIRST_IN_BLOCK: &str = "isFirst";

pub const COMMENT_KIND: &str = "css:comment";

/// The selector of a `css:rule`: a single string or a list.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector<'t> {
    One(&'t str),
    Many(Vec<&'t str>),
}

/// A comment attached to a rule, field or at-rule: plain text, or a node
/// rendered in its place.
#[derive(Debug, Clone)]
pub enum Description<'t> {
    Text(&'t str),
    Node(&'t Arc<Target>),
}

impl<'t> Description<'t> {
    fn of(target: &'t Target) -> Result<Option<Self>> {
        match target.get("description") {
            None => Ok(None),
            Some(Value::Text(text)) => Ok(Some(Self::Text(text))),
            Some(Value::Node(node)) => Ok(Some(Self::Node(node))),
            Some(other) => Err(Error::plugin(eyre!(
                "description of `{}` must be text or a target, found {other}",
                target.kind()
            ))),
        }
    }
}

/// `{kind: "css:rule", selector, content, description?}`
#[derive(Debug)]
pub struct RuleNode<'t> {
    pub selector: Selector<'t>,
    pub content: Vec<&'t Arc<Target>>,
    pub description: Option<Description<'t>>,
}

impl<'t> RuleNode<'t> {
    pub fn from_target(target: &'t Target) -> Result<Self> {
        let selector = match target.required("selector")? {
            Value::Text(text) => Selector::One(text),
            Value::List(items) if !items.is_empty() => Selector::Many(
                items
                    .iter()
                    .map(|item| {
                        item.as_str().ok_or_else(|| {
                            Error::plugin(eyre!("selector list entries must be text, found {item}"))
                        })
                    })
                    .collect::<Result<_>>()?,
            ),
            Value::List(_) => return Err(Error::plugin(eyre!("selector list must not be empty"))),
            other => {
                return Err(Error::plugin(eyre!(
                    "selector must be text or a list of text, found {other}"
                )));
            }
        };
        Ok(Self {
            selector,
            content: target.children("content")?,
            description: Description::of(target)?,
        })
    }
}

/// `{kind: "css:field", name, content, description?}`
#[derive(Debug)]
pub struct FieldNode<'t> {
    pub name: &'t str,
    pub value: String,
    pub first: bool,
    pub description: Option<Description<'t>>,
}

impl<'t> FieldNode<'t> {
    pub fn from_target(target: &'t Target) -> Result<Self> {
        let value = match target.required("content")? {
            scalar @ (Value::Text(_) | Value::Number(_)) => scalar.to_string(),
            other => {
                return Err(Error::plugin(eyre!(
                    "value of field `{}` must be text or a number, found {other}",
                    target.text("name").unwrap_or_default()
                )));
            }
        };
        Ok(Self {
            name: target.required_text("name")?,
            value,
            first: target.flag(FIRST_IN_BLOCK),
            description: Description::of(target)?,
        })
    }
}

/// `{kind: "css:atRule", name, rule?, content?, description?}`
#[derive(Debug)]
pub struct AtRuleNode<'t> {
    pub name: &'t str,
    pub rule: Option<&'t str>,
    pub content: Vec<&'t Arc<Target>>,
    pub description: Option<Description<'t>>,
}

impl<'t> AtRuleNode<'t> {
    pub fn from_target(target: &'t Target) -> Result<Self> {
        Ok(Self {
            name: target.required_text("name")?,
            rule: target.text("rule").filter(|rule| !rule.is_empty()),
            content: target.children("content")?,
            description: Description::of(target)?,
        })
    }
}
