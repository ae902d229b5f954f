//! Rule-driven text emission engine.
//!
//! Front-ends describe *what* to emit as a tree of [`Target`] nodes; the
//! engine decides *how* the text is assembled. Formats plug in through
//! [`Plugin`]s that register default [`Rules`] and one transformer per
//! target kind.
//!
//! # Module Organization
//!
//! - [`rules`] - Namespaced rule sets, deep merge and per-namespace scopes
//! - [`builder`] - [`LineBuilder`], the indentation-aware text assembler
//! - [`target`] - [`Target`] nodes and their field [`Value`]s
//! - [`registry`] - Declarative transformer trees and the kind registry
//! - [`context`] - Render sessions with scoped rules/target/builder stacks
//! - [`engine`] - [`Cogen`], the entry point
//!
//! # Example
//!
//! ```
//! use cogen_core::{Cogen, Rules, Target, TransformerTree};
//!
//! let mut cogen = Cogen::new();
//! cogen.add_transformers(TransformerTree::new().branch(
//!     "block",
//!     TransformerTree::new().root(|cx, target, _| {
//!         cx.builder().add(target.text("name").unwrap_or_default()).add_ws(" ").add("{");
//!         cx.builder().level_up().add("body").level_down().add("}");
//!         Ok(())
//!     }),
//! ));
//!
//! let block = Target::new("block").with("name", "main");
//! assert_eq!(cogen.generate_by(block.clone(), &Rules::new())?, "main {\n  body\n}");
//! assert_eq!(cogen.generate_by(block, &Rules::new().with("minify", true))?, "main{body}");
//! # Ok::<(), Box<cogen_core::Error>>(())
//! ```

pub mod builder;
pub mod context;
pub mod engine;
pub mod error;
pub mod plugin;
pub mod registry;
pub mod rules;
pub mod target;

pub use builder::{LineBuilder, TailAndHead, tail_and_head};
pub use context::{Context, Scoped};
pub use engine::Cogen;
pub use error::{Error, Result, SourceContext};
pub use plugin::Plugin;
pub use registry::{Registry, Transformer, TransformerNode, TransformerTree};
pub use rules::{RuleScope, RuleValue, Rules, merge_deep};
pub use target::{Fields, Target, Value, namespace_of};
