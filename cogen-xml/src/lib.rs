//! XML output for the cogen engine.
//!
//! ```
//! use cogen_core::{Cogen, Fields, Rules, Target};
//!
//! let cogen = Cogen::new().with_plugin(cogen_xml::plugin);
//! let mut attributes = Fields::new();
//! attributes.insert("src".to_string(), "/a".into());
//! attributes.insert("lazy-load".to_string(), true.into());
//! let image = Target::new("xml:tag")
//!     .with("name", "product-image")
//!     .with("attributes", attributes);
//! let doc = Target::new("xml").with("content", vec![image]);
//! assert_eq!(
//!     cogen.generate_by(doc, &Rules::new())?,
//!     r#"<product-image src="/a" lazy-load />"#
//! );
//! # Ok::<(), Box<cogen_core::Error>>(())
//! ```

mod escape;
mod transformers;

use cogen_core::{Cogen, Rules, TransformerTree};

pub use escape::{escape_attribute, escape_text};

pub const NAMESPACE: &str = "xml";

/// Default `xml` rule table.
pub fn default_rules() -> Rules {
    Rules::new()
        .with("tab", "    ")
        .with("newLineBeforeOpenTag", false)
        .with("newLineAfterOpenTag", true)
        .with("newLineBeforeCloseTag", true)
        .with("newLineAfterCloseTag", true)
        .with("spaceBeforeTagName", false)
        .with("spaceAfterTagName", false)
        .with("spaceBeforeAttributeEqualSign", false)
        .with("spaceAfterAttributeEqualSign", false)
        .with("spaceBeforeSelfclosedClose", true)
        .with("spaceBeforeTagClose", false)
        .with("selfclosedEmptyTags", true)
}

/// Register the XML rule defaults and transformers.
pub fn plugin(cogen: &mut Cogen) {
    cogen
        .extend_rules(&Rules::new().with_table(NAMESPACE, default_rules()))
        .add_transformers(TransformerTree::new().branch(
            NAMESPACE,
            TransformerTree::new()
                .root(transformers::document)
                .leaf("tag", transformers::tag)
                .leaf("content", transformers::content),
        ));
}
