//! Plugin trait for extending the engine with new formats.

use crate::engine::Cogen;

/// A format (or any other extension) installed into a [`Cogen`].
///
/// Installing is the only integration point: a plugin merges its namespace's
/// default rules with [`Cogen::extend_rules`] and registers its kinds with
/// [`Cogen::add_transformers`]. Any `Fn(&mut Cogen)` is a plugin.
///
/// # Example
///
/// ```
/// use cogen_core::{Cogen, Rules, Target, TransformerTree};
///
/// fn shout(cogen: &mut Cogen) {
///     cogen
///         .extend_rules(&Rules::new().with_table("shout", Rules::new().with("suffix", "!")))
///         .add_transformers(TransformerTree::new().branch(
///             "shout",
///             TransformerTree::new().root(|cx, target, rules| {
///                 let text = target.text("content").unwrap_or_default().to_uppercase();
///                 let suffix = rules.text("suffix").unwrap_or_default().to_string();
///                 cx.builder().add(text).add(suffix);
///                 Ok(())
///             }),
///         ));
/// }
///
/// let cogen = Cogen::new().with_plugin(shout);
/// let out = cogen.generate_by(Target::new("shout").with("content", "hi"), &Rules::new())?;
/// assert_eq!(out, "HI!");
/// # Ok::<(), Box<cogen_core::Error>>(())
/// ```
pub trait Plugin {
    /// The name of this plugin (for logging).
    fn name(&self) -> &str;

    /// Register rule defaults and transformers.
    fn install(&self, cogen: &mut Cogen);
}

impl<F> Plugin for F
where
    F: Fn(&mut Cogen),
{
    fn name(&self) -> &str {
        std::any::type_name::<F>()
    }

    fn install(&self, cogen: &mut Cogen) {
        self(cogen)
    }
}
