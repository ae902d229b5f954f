//! Render sessions.
//!
//! A [`Context`] holds the active rules, target and line builder of one
//! render, each with a stack of saved values. Transformers receive the
//! context mutably and recurse through [`Context::run_for`]; every push is
//! undone on the way back out, so a child render never leaks indentation
//! or scoped rules into its caller.

use std::{
    ops::{Deref, DerefMut},
    rc::Rc,
    sync::Arc,
};

use tracing::trace;

use crate::{
    builder::{LineBuilder, tail_and_head},
    error::{Error, Result},
    registry::Registry,
    rules::{RuleScope, Rules},
    target::Target,
};

/// State of a single render.
#[derive(Debug)]
pub struct Context<'e> {
    registry: &'e Registry,
    rules: Rc<Rules>,
    rules_stack: Vec<Rc<Rules>>,
    target: Option<Arc<Target>>,
    target_stack: Vec<Option<Arc<Target>>>,
    builder: LineBuilder,
    builder_stack: Vec<LineBuilder>,
}

impl<'e> Context<'e> {
    /// Start a session dispatching through `registry` with `rules` active.
    pub fn new(registry: &'e Registry, rules: Rules) -> Self {
        let builder = LineBuilder::from_rules(&rules);
        Self {
            registry,
            rules: Rc::new(rules),
            rules_stack: Vec::new(),
            target: None,
            target_stack: Vec::new(),
            builder,
            builder_stack: Vec::new(),
        }
    }

    // =========================================================================
    // Rules
    // =========================================================================

    /// The active rule set.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// The active rules viewed through `namespace`.
    pub fn scope(&self, namespace: &str) -> RuleScope {
        RuleScope::new(Rc::clone(&self.rules), Some(namespace))
    }

    /// Activate a merged copy of the current rules until [`pop_rules`](Self::pop_rules).
    pub fn push_rules(&mut self, rules: &Rules) -> &mut Self {
        let merged = self.rules.merged(rules);
        self.rules_stack
            .push(std::mem::replace(&mut self.rules, Rc::new(merged)));
        self
    }

    /// Merge into the active rules in place.
    ///
    /// Not scoped: later siblings in the same scope observe the change, and
    /// it disappears only when the enclosing pushed rules are popped.
    pub fn extend_rules(&mut self, rules: &Rules) -> &mut Self {
        Rc::make_mut(&mut self.rules).merge(rules);
        self
    }

    /// # Panics
    ///
    /// Panics without a matching [`push_rules`](Self::push_rules).
    pub fn pop_rules(&mut self) -> &mut Self {
        self.rules = self
            .rules_stack
            .pop()
            .expect("pop_rules called without a matching push_rules");
        self
    }

    // =========================================================================
    // Targets
    // =========================================================================

    /// The target being rendered, if any.
    pub fn target(&self) -> Option<&Arc<Target>> {
        self.target.as_ref()
    }

    pub fn push_target(&mut self, target: impl Into<Arc<Target>>) -> &mut Self {
        let previous = self.target.replace(target.into());
        self.target_stack.push(previous);
        self
    }

    /// Restore the previous target, returning the one that was active.
    ///
    /// # Panics
    ///
    /// Panics without a matching [`push_target`](Self::push_target).
    pub fn pop_target(&mut self) -> Option<Arc<Target>> {
        let previous = self
            .target_stack
            .pop()
            .expect("pop_target called without a matching push_target");
        std::mem::replace(&mut self.target, previous)
    }

    /// Number of targets currently being rendered, outermost included.
    pub fn depth(&self) -> usize {
        self.target_stack.len()
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// The active line builder.
    pub fn builder(&mut self) -> &mut LineBuilder {
        &mut self.builder
    }

    /// Activate a fresh builder configured by the current rules.
    pub fn push_builder(&mut self) -> &mut Self {
        let fresh = LineBuilder::from_rules(&self.rules);
        self.builder_stack
            .push(std::mem::replace(&mut self.builder, fresh));
        self
    }

    /// Restore the previous builder, returning the one that was active.
    ///
    /// # Panics
    ///
    /// Panics without a matching [`push_builder`](Self::push_builder).
    pub fn pop_builder(&mut self) -> LineBuilder {
        let previous = self
            .builder_stack
            .pop()
            .expect("pop_builder called without a matching push_builder");
        std::mem::replace(&mut self.builder, previous)
    }

    // =========================================================================
    // Scoped guards
    // =========================================================================

    /// [`push_rules`](Self::push_rules), popped when the guard drops.
    pub fn scoped_rules(&mut self, rules: &Rules) -> Scoped<'_, 'e> {
        self.push_rules(rules);
        Scoped::new(self, |cx| {
            cx.pop_rules();
        })
    }

    /// [`push_target`](Self::push_target), popped when the guard drops.
    pub fn scoped_target(&mut self, target: impl Into<Arc<Target>>) -> Scoped<'_, 'e> {
        self.push_target(target);
        Scoped::new(self, |cx| {
            cx.pop_target();
        })
    }

    /// [`push_builder`](Self::push_builder), popped when the guard drops.
    ///
    /// Read the scoped builder's output before the guard goes away:
    ///
    /// ```ignore
    /// let mut scoped = cx.scoped_builder();
    /// scoped.run_for(child)?;
    /// let rendered = scoped.builder().build();
    /// ```
    pub fn scoped_builder(&mut self) -> Scoped<'_, 'e> {
        self.push_builder();
        Scoped::new(self, |cx| {
            cx.pop_builder();
        })
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Render the active target with its registered transformer.
    ///
    /// # Panics
    ///
    /// Panics if no target is active.
    pub fn run(&mut self) -> Result<&mut Self> {
        self.dispatch()?;
        Ok(self)
    }

    /// Render `target`, restoring the active target afterwards.
    pub fn run_for(&mut self, target: impl Into<Arc<Target>>) -> Result<&mut Self> {
        self.scoped_target(target).dispatch()?;
        Ok(self)
    }

    /// Render `target` with the scope's indentation unit pushed on the builder.
    pub fn run_for_in(&mut self, target: impl Into<Arc<Target>>, scope: &RuleScope) -> Result<&mut Self> {
        self.builder.push_tab(scope.tab());
        let result = self.scoped_target(target).dispatch();
        self.builder.pop_tab();
        result?;
        Ok(self)
    }

    /// Run `f` for every item, flagging the last one as the head.
    ///
    /// The context-level twin of [`LineBuilder::do_for_tail_and_head`], for
    /// callbacks that render child targets.
    pub fn for_tail_and_head<T, I, F>(&mut self, items: I, mut f: F) -> Result<&mut Self>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&mut Self, T, bool, usize) -> Result<()>,
    {
        for (item, is_head, index) in tail_and_head(items) {
            f(self, item, is_head, index)?;
        }
        Ok(self)
    }

    fn dispatch(&mut self) -> Result<()> {
        let target = Arc::clone(
            self.target
                .as_ref()
                .expect("run called without an active target"),
        );
        let registry = self.registry;
        let transformer = registry
            .get(target.kind())
            .ok_or_else(|| Error::unresolved(target.kind()))?;
        trace!(kind = target.kind(), depth = self.depth(), "dispatching target");
        let scope = self.scope(target.namespace());
        transformer(self, &target, &scope)
    }
}

/// Guard returned by the `scoped_*` methods of [`Context`].
///
/// Dereferences to the context and undoes the push when dropped, including
/// on early return through `?`.
pub struct Scoped<'c, 'e> {
    cx: &'c mut Context<'e>,
    restore: fn(&mut Context<'e>),
}

impl<'c, 'e> Scoped<'c, 'e> {
    fn new(cx: &'c mut Context<'e>, restore: fn(&mut Context<'e>)) -> Self {
        Self { cx, restore }
    }
}

impl<'e> Deref for Scoped<'_, 'e> {
    type Target = Context<'e>;

    fn deref(&self) -> &Self::Target {
        &*self.cx
    }
}

impl DerefMut for Scoped<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.cx
    }
}

impl Drop for Scoped<'_, '_> {
    fn drop(&mut self) {
        (self.restore)(&mut *self.cx);
    }
}
