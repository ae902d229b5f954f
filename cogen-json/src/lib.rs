//! JSON output for the cogen engine.
//!
//! A `json` document wraps exactly one value node:
//!
//! ```
//! use cogen_core::{Cogen, Rules, Target};
//!
//! let cogen = Cogen::new().with_plugin(cogen_json::plugin);
//! let doc = Target::new("json").with(
//!     "content",
//!     Target::new("json:array").with(
//!         "content",
//!         vec![
//!             Target::new("json:number").with("content", 1),
//!             Target::new("json:string").with("content", "two"),
//!         ],
//!     ),
//! );
//! assert_eq!(cogen.generate_by(doc, &Rules::new())?, "[\n  1,\n  \"two\"\n]");
//! # Ok::<(), Box<cogen_core::Error>>(())
//! ```

mod transformers;

use cogen_core::{Cogen, Rules, TransformerTree};

pub const NAMESPACE: &str = "json";

/// Default `json` rule table.
pub fn default_rules() -> Rules {
    Rules::new()
        .with("tab", "  ")
        .with("newLineBeforeOpenBracket", false)
        .with("newLineAfterOpenBracket", true)
        .with("newLineBeforeCloseBracket", true)
        .with("newLineAfterField", true)
        .with("spaceBeforeColon", false)
        .with("spaceAfterColon", true)
        .with("singleLineEmptyArray", true)
        .with("singleLineEmptyObject", true)
}

/// Register the JSON rule defaults and transformers.
pub fn plugin(cogen: &mut Cogen) {
    cogen
        .extend_rules(&Rules::new().with_table(NAMESPACE, default_rules()))
        .add_transformers(TransformerTree::new().branch(
            NAMESPACE,
            TransformerTree::new()
                .root(transformers::document)
                .leaf("object", transformers::object)
                .leaf("array", transformers::array)
                .leaf("number", transformers::number)
                .leaf("string", transformers::string)
                .leaf("boolean", transformers::boolean)
                .leaf("null", transformers::null),
        ));
}
