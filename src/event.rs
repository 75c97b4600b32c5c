//! The parse events consumed by the tree builder, and their translation from
//! the external parser's tokens.
use crate::node::QName;
use htmlentity::entity::ICodedDataTrait;
use xmlparser::{ElementEnd, Token};

/// A position in the source, as reported by the external parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// 1-based row
    pub row: u32,

    /// 1-based column
    pub col: u32,
}
impl From<xmlparser::TextPos> for Location {
    fn from(pos: xmlparser::TextPos) -> Self {
        Self {
            row: pos.row,
            col: pos.col,
        }
    }
}
impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// A single event delivered to the tree builder.
///
/// The external parser drives the builder through a flat stream of these;
/// attributes arrive as their own events, after the `StartElement` they
/// belong to and before anything else happens inside that element.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent {
    /// An element has been opened.
    StartElement {
        /// The qualified tag name.
        name: QName,
    },

    /// The most recently opened element has been closed.
    EndElement {
        /// The qualified name on the closing tag; absent for self-closing tags.
        name: Option<QName>,
    },

    /// An attribute of the most recently opened element.
    Attribute {
        /// The qualified attribute name.
        name: QName,

        /// The attribute value, with entities already resolved.
        value: String,
    },

    /// A processing instruction, anywhere in the stream.
    ProcessingInstruction {
        /// The instruction target.
        target: String,

        /// The instruction data, if any.
        data: Option<String>,
    },

    /// A recoverable warning from the parser.
    Warning {
        /// Where the warning was raised, if known.
        location: Option<Location>,

        /// A human-readable message.
        message: String,
    },

    /// A recoverable error from the parser.
    Error {
        /// Where the error was raised, if known.
        location: Option<Location>,

        /// A human-readable message.
        message: String,
    },

    /// The parser cannot continue; no further build events will be honored.
    FatalError {
        /// Where the parser gave up, if known.
        location: Option<Location>,

        /// A human-readable message.
        message: String,
    },

    /// The event stream has ended.
    EndDocument,
}
impl ParseEvent {
    /// Translates a parser token into an event, if it carries one.
    ///
    /// Text, CDATA, comments and DTD tokens have no counterpart in the
    /// document model and are dropped here. The XML declaration is handled
    /// by the parse driver and is likewise never an event.
    #[must_use]
    pub fn from_token(token: Token) -> Option<Self> {
        match token {
            Token::ElementStart { prefix, local, .. } => Some(Self::StartElement {
                name: QName::from_parts(prefix.as_str(), local.as_str()),
            }),

            Token::Attribute {
                prefix,
                local,
                value,
                ..
            } => Some(Self::Attribute {
                name: QName::from_parts(prefix.as_str(), local.as_str()),
                value: decode_entities(value.as_str()),
            }),

            Token::ElementEnd {
                end: ElementEnd::Open,
                ..
            } => None,

            Token::ElementEnd {
                end: ElementEnd::Empty,
                ..
            } => Some(Self::EndElement { name: None }),

            Token::ElementEnd {
                end: ElementEnd::Close(prefix, local),
                ..
            } => Some(Self::EndElement {
                name: Some(QName::from_parts(prefix.as_str(), local.as_str())),
            }),

            Token::ProcessingInstruction {
                target, content, ..
            } => Some(Self::ProcessingInstruction {
                target: target.as_str().to_string(),
                data: content.map(|c| c.as_str().to_string()),
            }),

            Token::Declaration { .. }
            | Token::Text { .. }
            | Token::Cdata { .. }
            | Token::Comment { .. }
            | Token::DtdStart { .. }
            | Token::EmptyDtd { .. }
            | Token::EntityDeclaration { .. }
            | Token::DtdEnd { .. } => None,
        }
    }
}

/// Resolves character entities in an attribute value, so the builder sees
/// the value a SAX parser would have delivered. Falls back to the raw text
/// if decoding fails.
fn decode_entities(input: &str) -> String {
    htmlentity::entity::decode(input.as_bytes())
        .to_string()
        .unwrap_or_else(|_| input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(src: &str) -> Vec<ParseEvent> {
        xmlparser::Tokenizer::from(src)
            .filter_map(|token| ParseEvent::from_token(token.unwrap()))
            .collect()
    }

    #[test]
    fn test_element_tokens() {
        let events = events("<a x=\"1\"><b/></a>");
        assert_eq!(
            events,
            vec![
                ParseEvent::StartElement {
                    name: QName::from("a")
                },
                ParseEvent::Attribute {
                    name: QName::from("x"),
                    value: "1".to_string()
                },
                ParseEvent::StartElement {
                    name: QName::from("b")
                },
                ParseEvent::EndElement { name: None },
                ParseEvent::EndElement {
                    name: Some(QName::from("a"))
                },
            ]
        );
    }

    #[test]
    fn test_attribute_entities_are_resolved() {
        let events = events("<a x=\"a &amp; b &quot;c&quot;\"/>");
        assert_eq!(
            events[1],
            ParseEvent::Attribute {
                name: QName::from("x"),
                value: "a & b \"c\"".to_string()
            }
        );
    }

    #[test]
    fn test_text_comments_and_declaration_are_dropped() {
        let events = events("<?xml version=\"1.0\"?><!-- hi --><a>text</a>");
        assert_eq!(
            events,
            vec![
                ParseEvent::StartElement {
                    name: QName::from("a")
                },
                ParseEvent::EndElement {
                    name: Some(QName::from("a"))
                },
            ]
        );
    }

    #[test]
    fn test_processing_instruction_token() {
        let events = events("<?xml-stylesheet href=\"s.xsl\"?><a/>");
        assert_eq!(
            events[0],
            ParseEvent::ProcessingInstruction {
                target: "xml-stylesheet".to_string(),
                data: Some("href=\"s.xsl\"".to_string())
            }
        );
    }
}
