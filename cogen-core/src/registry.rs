//! Transformer registration.
//!
//! Plugins describe their transformers as a nested [`TransformerTree`];
//! registration flattens it into the [`Registry`], a flat map from fully
//! qualified kind (`css`, `css:rule`, ...) to callback.

use std::fmt;

use indexmap::IndexMap;
use tracing::debug;

use crate::{context::Context, error::Result, rules::RuleScope, target::Target};

/// Leaf name that registers the enclosing namespace itself.
pub const ROOT_LEAF: &str = "_";

/// Renders one target kind into the context's active builder.
pub type Transformer = Box<dyn Fn(&mut Context<'_>, &Target, &RuleScope) -> Result<()> + Send + Sync>;

/// One entry of a [`TransformerTree`].
pub enum TransformerNode {
    Leaf(Transformer),
    Branch(TransformerTree),
}

/// Nested, declarative transformer description.
///
/// # Example
///
/// ```
/// use cogen_core::{Registry, TransformerTree};
///
/// let tree = TransformerTree::new().branch(
///     "css",
///     TransformerTree::new()
///         .root(|cx, _, _| { cx.builder().add("sheet"); Ok(()) })
///         .leaf("rule", |cx, _, _| { cx.builder().add("rule"); Ok(()) }),
/// );
///
/// let mut registry = Registry::new();
/// registry.register(tree);
/// assert_eq!(registry.kinds().collect::<Vec<_>>(), ["css", "css:rule"]);
/// ```
#[derive(Default)]
pub struct TransformerTree {
    entries: Vec<(String, TransformerNode)>,
}

impl TransformerTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the enclosing namespace itself (the `_` leaf).
    pub fn root<F>(self, transformer: F) -> Self
    where
        F: Fn(&mut Context<'_>, &Target, &RuleScope) -> Result<()> + Send + Sync + 'static,
    {
        self.leaf(ROOT_LEAF, transformer)
    }

    /// Register `name` under the enclosing namespace.
    pub fn leaf<F>(mut self, name: impl Into<String>, transformer: F) -> Self
    where
        F: Fn(&mut Context<'_>, &Target, &RuleScope) -> Result<()> + Send + Sync + 'static,
    {
        self.entries
            .push((name.into(), TransformerNode::Leaf(Box::new(transformer))));
        self
    }

    /// Nest a further namespace level.
    pub fn branch(mut self, name: impl Into<String>, tree: TransformerTree) -> Self {
        self.entries
            .push((name.into(), TransformerNode::Branch(tree)));
        self
    }

    /// Flatten into `(kind, transformer)` pairs.
    pub fn flatten(self) -> Vec<(String, Transformer)> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);
        out
    }

    fn flatten_into(self, prefix: &str, out: &mut Vec<(String, Transformer)>) {
        for (name, node) in self.entries {
            match node {
                TransformerNode::Branch(tree) => {
                    tree.flatten_into(&format!("{prefix}{name}:"), out);
                }
                TransformerNode::Leaf(transformer) if name == ROOT_LEAF => {
                    let kind = prefix.strip_suffix(':').unwrap_or(prefix);
                    out.push((kind.to_string(), transformer));
                }
                TransformerNode::Leaf(transformer) => {
                    out.push((format!("{prefix}{name}"), transformer));
                }
            }
        }
    }
}

/// Flat map from kind discriminator to transformer.
#[derive(Default)]
pub struct Registry {
    transformers: IndexMap<String, Transformer>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every transformer described by `tree`.
    pub fn register(&mut self, tree: TransformerTree) -> &mut Self {
        for (kind, transformer) in tree.flatten() {
            self.insert(kind, transformer);
        }
        self
    }

    /// Register a single kind; a previous transformer for it is replaced.
    pub fn insert(&mut self, kind: impl Into<String>, transformer: Transformer) -> &mut Self {
        let kind = kind.into();
        if self.transformers.insert(kind.clone(), transformer).is_some() {
            debug!(kind, "replaced transformer");
        } else {
            debug!(kind, "registered transformer");
        }
        self
    }

    pub fn get(&self, kind: &str) -> Option<&Transformer> {
        self.transformers.get(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.transformers.contains_key(kind)
    }

    /// Registered kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.transformers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kinds", &self.transformers.keys().collect::<Vec<_>>())
            .finish()
    }
}
