//! Event-driven XML beautifier.
//!
//! `xmltidy` rebuilds an XML document tree from the event stream of a
//! streaming parser and pretty-prints it. The parser's tokens are translated
//! into a flat [`ParseEvent`] stream; a [`TreeBuilder`] consumes the events
//! and assembles a [`Document`], separating namespace declarations from
//! ordinary attributes and buffering processing instructions until the root
//! exists. The finished document renders through [`Document::to_xml`].
//!
//! Input that contains no elements at all produces *no* document; the API
//! returns `None` rather than inventing an empty one. Parser warnings and
//! recoverable errors are reported through the `log` facade without
//! interrupting the build; only a parser-fatal failure aborts the run.
//!
//! # Example
//! ```rust
//! let formatted = xmltidy::beautify("<a x=\"1\"><b/><c/></a>", Some("  "))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(formatted, "<a x=\"1\">\n  <b />\n  <c />\n</a>\n");
//! ```

mod builder;
pub use builder::TreeBuilder;

mod diag;
pub use diag::Diagnostics;

mod document;
pub use document::{Declaration, Document};

mod error;
pub use error::{ErrorContext, XmlError, XmlErrorKind, XmlResult};

mod event;
pub use event::{Location, ParseEvent};

mod node;
pub use node::{Attribute, Element, Namespace, ProcessingInstruction, QName};

pub mod to_xml;

/// Parses XML source and returns the beautified text in one step.
///
/// `tab_char` is used to indent the output. If `None`, a tab is used.
///
/// Returns `Ok(None)` when the input contains no elements, so downstream
/// consumers can distinguish "nothing parsed" from "an empty element was
/// parsed".
///
/// # Errors
/// Returns an error when the parser cannot tokenize the input, or the
/// result cannot be rendered.
pub fn beautify(source: &str, tab_char: Option<&str>) -> XmlResult<Option<String>> {
    match Document::parse(source)? {
        Some(document) => Ok(Some(document.to_xml(tab_char)?)),
        None => Ok(None),
    }
}
