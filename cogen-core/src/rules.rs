//! Namespaced, deep-mergeable formatting rules.
//!
//! A [`Rules`] value maps option names to [`RuleValue`]s. Nested tables act
//! as namespaces (`css`, `json`, ...) so each format keeps its own options
//! next to the two keys the engine itself understands, `tab` and `minify`.

use std::{rc::Rc, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SourceContext};

/// Indentation unit used when no rule provides one.
pub const DEFAULT_TAB: &str = "  ";

/// A single option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<RuleValue>),
    Table(Rules),
}

impl RuleValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Rules> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }
}

impl From<bool> for RuleValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for RuleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for RuleValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for RuleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RuleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<RuleValue>> for RuleValue {
    fn from(value: Vec<RuleValue>) -> Self {
        Self::List(value)
    }
}

impl From<Rules> for RuleValue {
    fn from(value: Rules) -> Self {
        Self::Table(value)
    }
}

/// An insertion-ordered rule set.
///
/// # Example
///
/// ```
/// use cogen_core::Rules;
///
/// let rules = Rules::defaults().with_table("json", Rules::new().with("tab", "    "));
/// assert_eq!(rules.tab(), "  ");
/// assert_eq!(rules.table("json").and_then(|t| t.text("tab")), Some("    "));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rules(IndexMap<String, RuleValue>);

impl Rules {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The engine's built-in rules: `{tab: "  ", minify: false}`.
    pub fn defaults() -> Self {
        Self::new().with("tab", DEFAULT_TAB).with("minify", false)
    }

    /// Parse a rule set from TOML.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        Self::from_toml_named(src, "rules.toml")
    }

    /// Parse a rule set from TOML, naming the source in diagnostics.
    pub fn from_toml_named(src: &str, filename: &str) -> Result<Self> {
        toml::from_str(src).map_err(|e| SourceContext::new(src, filename).toml_error(e))
    }

    /// Parse a rule set from JSON.
    pub fn from_json_str(src: &str) -> Result<Self> {
        serde_json::from_str(src)
            .map_err(|e| SourceContext::new(src, "rules.json").json_error("rules", e))
    }

    /// Set a value, returning the updated rule set.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RuleValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a namespace table, returning the updated rule set.
    pub fn with_table(self, namespace: impl Into<String>, table: Rules) -> Self {
        self.with(namespace, table)
    }

    /// Set a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RuleValue>) -> Option<RuleValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&RuleValue> {
        self.0.get(key)
    }

    /// Get a nested namespace table.
    pub fn table(&self, namespace: &str) -> Option<&Rules> {
        self.get(namespace).and_then(RuleValue::as_table)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(RuleValue::as_str)
    }

    /// Boolean option; missing or non-boolean values read as `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(RuleValue::as_bool).unwrap_or(false)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(RuleValue::as_f64)
    }

    /// The indentation unit.
    pub fn tab(&self) -> &str {
        self.text("tab").unwrap_or(DEFAULT_TAB)
    }

    /// Whether all non-semantic whitespace is suppressed.
    pub fn minify(&self) -> bool {
        self.flag("minify")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Deep-merge `source` into `self`.
    ///
    /// Tables merge key-wise and recursively; every other value (including
    /// lists) replaces what was there. `source` is left untouched.
    pub fn merge(&mut self, source: &Rules) -> &mut Self {
        for (key, value) in &source.0 {
            match value {
                RuleValue::Table(src) => match self.0.get_mut(key) {
                    Some(RuleValue::Table(dst)) => {
                        dst.merge(src);
                    }
                    _ => {
                        let mut fresh = Rules::new();
                        fresh.merge(src);
                        self.0.insert(key.clone(), RuleValue::Table(fresh));
                    }
                },
                other => {
                    self.0.insert(key.clone(), other.clone());
                }
            }
        }
        self
    }

    /// Deep-merge into a copy, leaving `self` untouched.
    pub fn merged(&self, source: &Rules) -> Rules {
        let mut copy = self.clone();
        copy.merge(source);
        copy
    }
}

impl FromStr for Rules {
    type Err = Box<crate::Error>;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_toml_str(s)
    }
}

/// Deep-merge every source into `target`, left to right.
pub fn merge_deep<'a, 'b>(
    target: &'a mut Rules,
    sources: impl IntoIterator<Item = &'b Rules>,
) -> &'a mut Rules {
    for source in sources {
        target.merge(source);
    }
    target
}

/// Rules as seen by one transformer.
///
/// Lookups consult the namespace table of the target being rendered first,
/// then fall back to the top level, so `css.tab` shadows the global `tab`.
#[derive(Debug, Clone)]
pub struct RuleScope {
    rules: Rc<Rules>,
    namespace: Option<String>,
}

impl RuleScope {
    pub fn new(rules: Rc<Rules>, namespace: Option<&str>) -> Self {
        Self {
            rules,
            namespace: namespace.map(str::to_string),
        }
    }

    /// A scope over the top level only.
    pub fn root(rules: Rc<Rules>) -> Self {
        Self::new(rules, None)
    }

    /// The same rules viewed through another namespace.
    pub fn namespace(&self, namespace: &str) -> RuleScope {
        Self::new(Rc::clone(&self.rules), Some(namespace))
    }

    pub fn namespace_name(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The complete rule set behind this scope.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// The namespace table, if the rule set has one.
    pub fn local(&self) -> Option<&Rules> {
        self.namespace
            .as_deref()
            .and_then(|namespace| self.rules.table(namespace))
    }

    pub fn get(&self, key: &str) -> Option<&RuleValue> {
        self.local()
            .and_then(|local| local.get(key))
            .or_else(|| self.rules.get(key))
    }

    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(RuleValue::as_bool).unwrap_or(false)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(RuleValue::as_str)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(RuleValue::as_f64)
    }

    pub fn tab(&self) -> &str {
        self.text("tab").unwrap_or(DEFAULT_TAB)
    }

    /// Minification is a session-wide switch and never read from a namespace.
    pub fn minify(&self) -> bool {
        self.rules.minify()
    }
}
