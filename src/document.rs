//! The assembled document model, and the parse driver that produces it.
use crate::{
    builder::TreeBuilder,
    error::{XmlError, XmlResult},
    event::ParseEvent,
    node::{Element, Namespace, ProcessingInstruction},
};
use std::io::Write;
use xmlparser::Token;

/// An XML document rebuilt from parse events.
///
/// The document wraps exactly one root element, the processing instructions
/// encountered anywhere in the source (in encounter order), the top-level
/// namespace binding when the root's declaration targets the document level,
/// and the XML declaration if the source carried one.
///
/// A document is only ever produced for input that contained at least one
/// element; "nothing parsed" is `None` at the API surface, never an empty
/// document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The `<?xml ...?>` declaration, if present in the source.
    pub declaration: Option<Declaration>,

    /// Processing instructions, in the order they appeared in the source,
    /// before or after the root element alike.
    pub instructions: Vec<ProcessingInstruction>,

    /// The document-level namespace binding, if the root element declared one.
    pub namespace: Option<Namespace>,

    /// The root of the element tree.
    pub root: Element,
}
impl Document {
    /// Parses a source string into a document, tolerating unmatched closing
    /// tags as a no-op.
    ///
    /// Returns `Ok(None)` when the input contains no elements at all.
    ///
    /// # Errors
    /// Returns an error when the underlying parser cannot continue
    /// tokenizing the input.
    ///
    /// # Example
    /// ```rust
    /// use xmltidy::Document;
    ///
    /// let document = Document::parse("<test><test2/></test>").unwrap().unwrap();
    /// assert_eq!(document.root.name(), "test");
    /// assert_eq!(document.root.children().len(), 1);
    /// ```
    pub fn parse(source: &str) -> XmlResult<Option<Self>> {
        Self::parse_with(source, TreeBuilder::new())
    }

    /// Parses a source string into a document, rejecting unmatched closing
    /// tags with [`XmlErrorKind::UnmatchedClose`](crate::XmlErrorKind).
    ///
    /// # Errors
    /// Returns an error on parser failures and on structural
    /// inconsistencies the tolerant mode would absorb.
    pub fn parse_strict(source: &str) -> XmlResult<Option<Self>> {
        Self::parse_with(source, TreeBuilder::strict())
    }

    fn parse_with(source: &str, mut builder: TreeBuilder) -> XmlResult<Option<Self>> {
        let mut declaration = None;

        for token in xmlparser::Tokenizer::from(source) {
            let token = match token {
                Ok(token) => token,
                Err(e) => {
                    // The external parser cannot continue. Notify the
                    // builder, then surface the terminal failure.
                    let _ = builder.handle_event(ParseEvent::FatalError {
                        location: Some(e.pos().into()),
                        message: e.to_string(),
                    });
                    return Err(XmlError::from(e));
                }
            };

            match token {
                Token::Declaration {
                    version,
                    encoding,
                    standalone,
                    ..
                } => {
                    declaration = Some(Declaration {
                        version: version.as_str().to_string(),
                        encoding: encoding.map(|e| e.as_str().to_string()),
                        standalone,
                    });
                }

                other => {
                    if let Some(event) = ParseEvent::from_token(other) {
                        builder.handle_event(event)?;
                    }
                }
            }
        }

        builder.handle_event(ParseEvent::EndDocument)?;

        Ok(builder.finish().map(|mut document| {
            document.declaration = declaration;
            document
        }))
    }

    /// Create a formatted XML string from this document.
    ///
    /// `tab_char` is used to indent the XML. If `None`, a tab is used.
    ///
    /// # Errors
    /// Can fail if a string in the document cannot be entity encoded.
    ///
    /// # Example
    /// ```rust
    /// use xmltidy::Document;
    ///
    /// let document = Document::parse("<test><test2/></test>").unwrap().unwrap();
    /// let formatted = document.to_xml(Some("    ")).unwrap();
    /// assert_eq!(formatted, "<test>\n    <test2 />\n</test>\n");
    /// ```
    pub fn to_xml(&self, tab_char: Option<&str>) -> std::io::Result<String> {
        let mut buffer = vec![];
        self.to_xml_with_writer(&mut buffer, tab_char)?;

        let buffer = String::from_utf8(buffer).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Failed to convert to UTF-8: {e}"),
            )
        })?;
        Ok(buffer)
    }

    /// Write this document as a formatted XML string using the given writer.
    ///
    /// See [`Document::to_xml`] for more details.
    ///
    /// # Errors
    /// Can fail if a string in the document cannot be entity encoded.
    pub fn to_xml_with_writer<W: Write>(
        &self,
        writer: &mut W,
        tab_char: Option<&str>,
    ) -> std::io::Result<()> {
        crate::to_xml::write_xml(writer, self, tab_char)
    }
}

/// The XML declaration: `<?xml version="1.0" encoding="UTF-8"?>`
///
/// Captured by the parse driver; the declaration is not a processing
/// instruction and never reaches the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// The XML version.
    pub version: String,

    /// The declared encoding, if any.
    pub encoding: Option<String>,

    /// The standalone flag, if declared.
    pub standalone: Option<bool>,
}
