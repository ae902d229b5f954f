//! Rule-driven text emission.
//!
//! This crate bundles the engine from [`cogen_core`] with the shipped
//! formats: [`css`], [`json`] and [`xml`]. Use [`standard`] for an engine
//! with all of them installed, or build a [`Cogen`] yourself and install
//! only the plugins you need.
//!
//! ```
//! use cogen::{Rules, Target};
//!
//! let cogen = cogen::standard();
//! let doc = Target::new("json").with(
//!     "content",
//!     Target::new("json:string").with("content", "hi"),
//! );
//! assert_eq!(cogen.generate_by(doc, &Rules::new())?, "\"hi\"");
//! # Ok::<(), Box<cogen::Error>>(())
//! ```

pub use cogen_core::*;
pub use cogen_css as css;
pub use cogen_json as json;
pub use cogen_xml as xml;

/// An engine with every shipped format installed.
pub fn standard() -> Cogen {
    Cogen::new()
        .with_plugin(css::plugin)
        .with_plugin(json::plugin)
        .with_plugin(xml::plugin)
}
