//! The rendering engine.

use std::sync::Arc;

use tracing::debug;

use crate::{
    context::Context,
    error::Result,
    plugin::Plugin,
    registry::{Registry, TransformerTree},
    rules::{RuleScope, Rules},
    target::Target,
};

/// Persistent engine state: default rules and the transformer registry.
///
/// Each [`generate_by`](Self::generate_by) call renders in its own
/// [`Context`], so one engine serves any number of independent renders and
/// is never modified by them.
#[derive(Debug)]
pub struct Cogen {
    rules: Rules,
    registry: Registry,
}

impl Cogen {
    /// Create an engine with the built-in rules and no transformers.
    pub fn new() -> Self {
        Self {
            rules: Rules::defaults(),
            registry: Registry::new(),
        }
    }

    /// Install a plugin.
    pub fn use_plugin(&mut self, plugin: impl Plugin) -> &mut Self {
        debug!(plugin = plugin.name(), "installing plugin");
        plugin.install(self);
        self
    }

    /// Install a plugin, returning the engine.
    pub fn with_plugin(mut self, plugin: impl Plugin) -> Self {
        self.use_plugin(plugin);
        self
    }

    /// Deep-merge `rules` into the engine defaults.
    pub fn extend_rules(&mut self, rules: &Rules) -> &mut Self {
        self.rules.merge(rules);
        self
    }

    /// Register every transformer of a nested description.
    pub fn add_transformers(&mut self, tree: TransformerTree) -> &mut Self {
        self.registry.register(tree);
        self
    }

    /// Register a transformer for a single, fully qualified kind.
    pub fn add_transformer<F>(&mut self, kind: impl Into<String>, transformer: F) -> &mut Self
    where
        F: Fn(&mut Context<'_>, &Target, &RuleScope) -> Result<()> + Send + Sync + 'static,
    {
        self.registry.insert(kind, Box::new(transformer));
        self
    }

    /// The default rules every render starts from.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// A fresh render session over the engine defaults.
    pub fn context(&self) -> Context<'_> {
        Context::new(&self.registry, self.rules.clone())
    }

    /// Render a target tree with `rules` merged over the defaults.
    ///
    /// # Errors
    ///
    /// Fails if any node in the tree has no registered transformer, or if a
    /// transformer rejects its target.
    pub fn generate_by(&self, target: impl Into<Arc<Target>>, rules: &Rules) -> Result<String> {
        let target = target.into();
        debug!(kind = target.kind(), "rendering target tree");

        let mut cx = self.context();
        cx.push_rules(rules).push_target(target).push_builder();
        cx.run()?;
        let output = cx.pop_builder().build();
        cx.pop_rules();
        cx.pop_target();

        debug!(bytes = output.len(), "rendered target tree");
        Ok(output)
    }
}

impl Default for Cogen {
    fn default() -> Self {
        Self::new()
    }
}
