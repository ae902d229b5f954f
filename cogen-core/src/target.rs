//! Target nodes: the input program of a render.
//!
//! A [`Target`] is an immutable node identified by its `kind`, a
//! `:`-separated discriminator such as `css:rule`. Everything else about a
//! node lives in its named [`Value`] fields. Children are shared through
//! [`Arc`], so deriving an annotated copy of a node never copies its subtree.

use std::{borrow::Cow, fmt, sync::Arc};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, SourceContext};

/// Separator between the levels of a kind discriminator.
pub const KIND_SEPARATOR: char = ':';

/// Named fields of a node, and the shape of map-valued fields.
pub type Fields = IndexMap<String, Value>;

/// A field value: a literal or a nested node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    Node(Arc<Target>),
    List(Vec<Value>),
    Map(Fields),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Arc<Target>> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Fields> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// A map-valued field read as plain entries.
    ///
    /// A map holding a text `kind` entry deserializes as a node, so a node
    /// reads back as its `kind` followed by its fields.
    pub fn as_fields(&self) -> Option<Cow<'_, Fields>> {
        match self {
            Self::Map(map) => Some(Cow::Borrowed(map)),
            Self::Node(node) => {
                let mut fields = Fields::with_capacity(node.fields.len() + 1);
                fields.insert("kind".to_string(), Value::Text(node.kind.clone()));
                fields.extend(node.fields.iter().map(|(k, v)| (k.clone(), v.clone())));
                Some(Cow::Owned(fields))
            }
            _ => None,
        }
    }

    /// Whether this value is a nested target.
    pub fn is_target(&self) -> bool {
        matches!(self, Self::Node(_))
    }
}

/// Scalars render the way they would appear in source text.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Node(node) => write!(f, "<{}>", node.kind()),
            Self::List(items) => write!(f, "[{} items]", items.len()),
            Self::Map(map) => write!(f, "{{{} entries}}", map.len()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Target> for Value {
    fn from(value: Target) -> Self {
        Self::Node(Arc::new(value))
    }
}

impl From<Arc<Target>> for Value {
    fn from(value: Arc<Target>) -> Self {
        Self::Node(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<Fields> for Value {
    fn from(value: Fields) -> Self {
        Self::Map(value)
    }
}

/// A discriminator-tagged output node.
///
/// The wire shape is a flat mapping with a `kind` entry:
///
/// ```
/// use cogen_core::Target;
///
/// let target = Target::from_json_str(r#"{"kind": "css:field", "name": "margin", "content": "0"}"#)?;
/// assert_eq!(target.kind(), "css:field");
/// assert_eq!(target.namespace(), "css");
/// assert_eq!(target.text("name"), Some("margin"));
/// # Ok::<(), Box<cogen_core::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTarget", into = "RawTarget")]
pub struct Target {
    kind: String,
    fields: Fields,
}

#[derive(Serialize, Deserialize)]
struct RawTarget {
    kind: String,
    #[serde(flatten)]
    fields: Fields,
}

impl TryFrom<RawTarget> for Target {
    type Error = String;

    fn try_from(raw: RawTarget) -> std::result::Result<Self, Self::Error> {
        if raw.kind.is_empty() {
            return Err("target kind must not be empty".to_string());
        }
        Ok(Self {
            kind: raw.kind,
            fields: raw.fields,
        })
    }
}

impl From<Target> for RawTarget {
    fn from(target: Target) -> Self {
        Self {
            kind: target.kind,
            fields: target.fields,
        }
    }
}

impl Target {
    /// Create a target with no fields.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is empty.
    pub fn new(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        assert!(!kind.is_empty(), "target kind must not be empty");
        Self {
            kind,
            fields: Fields::new(),
        }
    }

    /// Parse a target tree from its JSON wire shape.
    pub fn from_json_str(src: &str) -> Result<Self> {
        serde_json::from_str(src)
            .map_err(|e| SourceContext::new(src, "target.json").json_error("target tree", e))
    }

    /// Set a field, returning the updated target.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// The full discriminator, e.g. `css:rule`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The first level of the discriminator, e.g. `css` for `css:rule`.
    pub fn namespace(&self) -> &str {
        namespace_of(&self.kind)
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Boolean field; missing or non-boolean values read as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn node(&self, name: &str) -> Option<&Arc<Target>> {
        self.get(name).and_then(Value::as_node)
    }

    /// List field; missing or non-list values read as empty.
    pub fn list(&self, name: &str) -> &[Value] {
        self.get(name).and_then(Value::as_list).unwrap_or(&[])
    }

    /// Map field, including maps that happen to carry a `kind` entry.
    pub fn map(&self, name: &str) -> Option<Cow<'_, Fields>> {
        self.get(name).and_then(Value::as_fields)
    }

    /// A field the transformer cannot render without.
    pub fn required(&self, name: &str) -> Result<&Value> {
        self.get(name).ok_or_else(|| {
            Error::plugin(eyre::eyre!(
                "`{}` target is missing required field `{name}`",
                self.kind
            ))
        })
    }

    /// A required text field.
    pub fn required_text(&self, name: &str) -> Result<&str> {
        match self.required(name)? {
            Value::Text(text) => Ok(text),
            other => Err(Error::plugin(eyre::eyre!(
                "field `{name}` of `{}` target must be text, found {other}",
                self.kind
            ))),
        }
    }

    /// Every entry of a list field as a node; a missing field is empty.
    pub fn children(&self, name: &str) -> Result<Vec<&Arc<Target>>> {
        self.list(name)
            .iter()
            .map(|item| {
                item.as_node().ok_or_else(|| {
                    Error::plugin(eyre::eyre!(
                        "field `{name}` of `{}` target must hold targets, found {item}",
                        self.kind
                    ))
                })
            })
            .collect()
    }

    /// A shallow copy of this node carrying one extra field.
    ///
    /// Children stay shared with the original, which is never modified.
    pub fn annotated(&self, name: impl Into<String>, value: impl Into<Value>) -> Target {
        self.clone().with(name, value)
    }
}

/// The namespace part of a kind discriminator.
pub fn namespace_of(kind: &str) -> &str {
    kind.split(KIND_SEPARATOR).next().unwrap_or(kind)
}
