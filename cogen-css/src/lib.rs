//! CSS output for the cogen engine.
//!
//! Install with [`plugin`] and render a `css` stylesheet target:
//!
//! ```
//! use cogen_core::{Cogen, Rules, Target};
//!
//! let cogen = Cogen::new().with_plugin(cogen_css::plugin);
//! let sheet = Target::new("css").with(
//!     "content",
//!     vec![Target::new("css:rule").with("selector", "body").with(
//!         "content",
//!         vec![Target::new("css:field").with("name", "margin").with("content", "0")],
//!     )],
//! );
//! assert_eq!(cogen.generate_by(sheet, &Rules::new())?, "body {\n  margin: 0;\n}");
//! # Ok::<(), Box<cogen_core::Error>>(())
//! ```
//!
//! | kind          | fields                                            |
//! |---------------|---------------------------------------------------|
//! | `css`         | `content: [target]`                               |
//! | `css:rule`    | `selector: text \| [text]`, `content`, `description?` |
//! | `css:field`   | `name`, `content: text \| number`, `description?` |
//! | `css:atRule`  | `name`, `rule?`, `content?`, `description?`       |
//! | `css:comment` | `content: text`                                   |

mod nodes;
mod transformers;

use cogen_core::{Cogen, Rules, TransformerTree};

pub use nodes::{AtRuleNode, Description, FieldNode, RuleNode, Selector};

/// Namespace of every kind this plugin registers, and of its rule table.
pub const NAMESPACE: &str = "css";

/// Default `css` rule table.
pub fn default_rules() -> Rules {
    Rules::new()
        .with("tab", "  ")
        .with("newLineBeforeRuleOpenBracket", false)
        .with("spaceBeforeRuleOpenBracket", true)
        .with("spaceBeforeFieldColon", false)
        .with("spaceAfterFieldColon", true)
        .with("nextLineAfterRule", true)
        .with("separateSelectorsByNewLines", true)
        .with("clearEmptyLines", true)
        .with("spaceBeforeCommentContentStart", true)
        .with("spaceAfterCommentContentStart", true)
}

/// Register the CSS rule defaults and transformers.
pub fn plugin(cogen: &mut Cogen) {
    cogen
        .extend_rules(&Rules::new().with_table(NAMESPACE, default_rules()))
        .add_transformers(TransformerTree::new().branch(
            NAMESPACE,
            TransformerTree::new()
                .root(transformers::stylesheet)
                .leaf("rule", transformers::rule)
                .leaf("field", transformers::field)
                .leaf("atRule", transformers::at_rule)
                .leaf("comment", transformers::comment),
        ));
}
