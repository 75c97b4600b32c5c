//! Streaming tree construction.
//!
//! [`TreeBuilder`] consumes the flat [`ParseEvent`] stream and incrementally
//! assembles the document: an arena of pending elements plus a stack of
//! handles to the ones currently open. Processing instructions are buffered
//! until the stream ends, since they may arrive before the root exists.
use crate::{
    diag::Diagnostics,
    document::Document,
    error::{ErrorContext, XmlError, XmlErrorKind, XmlResult},
    event::ParseEvent,
    node::{Element, Namespace, ProcessingInstruction},
};

/// A lightweight handle to an element in the builder's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ElementId(usize);

/// An element still being built: its data plus handles to its children.
#[derive(Debug)]
struct PendingElement {
    element: Element,
    children: Vec<ElementId>,
}

/// Whether a document exists yet. A document comes into being on the first
/// start-event and never before, so "nothing was parsed" stays distinguishable
/// from "an empty element was parsed".
#[derive(Debug)]
enum DocumentState {
    NotYetCreated,
    Present {
        root: ElementId,
        namespace: Option<Namespace>,
    },
}

/// Rebuilds a document tree from a stream of parse events.
///
/// One builder processes exactly one event stream; feed events through
/// [`TreeBuilder::handle_event`] and collect the result with
/// [`TreeBuilder::finish`].
///
/// The default builder tolerates unmatched closing tags as a no-op, the way
/// lenient consumers expect. [`TreeBuilder::strict`] surfaces them as
/// [`XmlErrorKind::UnmatchedClose`] instead.
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<PendingElement>,
    stack: Vec<ElementId>,
    instructions: Vec<ProcessingInstruction>,
    state: DocumentState,
    diagnostics: Diagnostics,
    strict: bool,
}
impl TreeBuilder {
    /// Creates a builder with the tolerant closing-tag policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![],
            stack: vec![],
            instructions: vec![],
            state: DocumentState::NotYetCreated,
            diagnostics: Diagnostics::default(),
            strict: false,
        }
    }

    /// Creates a builder that rejects unmatched closing tags.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::new()
        }
    }

    /// The number of currently open elements, equal to the nesting depth of
    /// the build position. Zero once every open element has been closed.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The diagnostics collected so far.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Applies a single event to the tree under construction.
    ///
    /// Never fails in tolerant mode; in strict mode an unmatched closing tag
    /// is an error. After a fatal notification all further events are
    /// ignored.
    pub fn handle_event(&mut self, event: ParseEvent) -> XmlResult<()> {
        if self.diagnostics.is_fatal() {
            return Ok(());
        }

        match event {
            ParseEvent::StartElement { name } => {
                let id = ElementId(self.nodes.len());
                self.nodes.push(PendingElement {
                    element: Element::new(name),
                    children: vec![],
                });

                match &self.state {
                    DocumentState::NotYetCreated => {
                        self.state = DocumentState::Present {
                            root: id,
                            namespace: None,
                        };
                    }

                    DocumentState::Present { root, .. } => {
                        let parent = match self.stack.last() {
                            Some(&parent) => parent,
                            None => {
                                // Well-formed input never gets here: it means an
                                // element started after the root was closed.
                                self.diagnostics.warning(
                                    None,
                                    &format!(
                                        "Element <{}> started after the root element closed; attaching it under the root",
                                        self.nodes[id.0].element.name()
                                    ),
                                );
                                *root
                            }
                        };
                        self.nodes[parent.0].children.push(id);
                    }
                }

                self.stack.push(id);
            }

            ParseEvent::Attribute { name, value } => {
                let Some(&top) = self.stack.last() else {
                    self.diagnostics.warning(
                        None,
                        &format!("Attribute {name} arrived with no open element; dropping it"),
                    );
                    return Ok(());
                };

                match Namespace::from_attribute(&name, &value) {
                    Some(binding) => {
                        // Declarations on the root bind at document level
                        if let DocumentState::Present { root, namespace } = &mut self.state {
                            if top == *root {
                                *namespace = Some(binding);
                                return Ok(());
                            }
                        }
                        self.nodes[top.0].element.set_namespace(binding);
                    }
                    None => self.nodes[top.0].element.set_attribute(name, value),
                }
            }

            ParseEvent::EndElement { name } => match self.stack.pop() {
                Some(id) => {
                    if let Some(expected) = name {
                        let actual = self.nodes[id.0].element.name();
                        if *actual != expected {
                            self.diagnostics.warning(
                                None,
                                &format!(
                                    "Closing tag </{expected}> does not match open element <{actual}>"
                                ),
                            );
                        }
                    }
                }
                None => {
                    if self.strict {
                        let name = name.map(|n| n.to_string()).unwrap_or_default();
                        return Err(XmlError::new(
                            XmlErrorKind::UnmatchedClose(name),
                            ErrorContext::default(),
                        ));
                    }
                    log::debug!("Ignoring closing tag with no open element");
                }
            },

            ParseEvent::ProcessingInstruction { target, data } => {
                self.instructions.push(ProcessingInstruction::new(target, data));
            }

            ParseEvent::Warning { location, message } => {
                self.diagnostics.warning(location, &message);
            }

            ParseEvent::Error { location, message } => {
                self.diagnostics.error(location, &message);
            }

            ParseEvent::FatalError { location, message } => {
                self.diagnostics.fatal(location, &message);
            }

            ParseEvent::EndDocument => {
                if !self.stack.is_empty() {
                    self.diagnostics.warning(
                        None,
                        &format!(
                            "{} elements still open at end of document",
                            self.stack.len()
                        ),
                    );
                }
            }
        }

        Ok(())
    }

    /// Finalizes the build and returns the document, if there is one.
    ///
    /// Returns `None` when no element was ever observed or the parser
    /// reported a fatal error; buffered processing instructions are
    /// discarded in that case. Otherwise the instructions are attached to
    /// the document in exactly the order they were encountered.
    #[must_use]
    pub fn finish(self) -> Option<Document> {
        if self.diagnostics.is_fatal() {
            return None;
        }

        let DocumentState::Present { root, namespace } = self.state else {
            return None;
        };

        // Children always carry larger ids than their parent, so a reverse
        // sweep completes every child before the parent that claims it.
        let mut nodes: Vec<Option<PendingElement>> = self.nodes.into_iter().map(Some).collect();
        let mut built: Vec<Option<Element>> = (0..nodes.len()).map(|_| None).collect();

        for idx in (0..nodes.len()).rev() {
            let Some(pending) = nodes[idx].take() else {
                continue;
            };

            let mut element = pending.element;
            for child in pending.children {
                if let Some(child) = built.get_mut(child.0).and_then(Option::take) {
                    element.push_child(child);
                }
            }
            built[idx] = Some(element);
        }

        let root = built.get_mut(root.0).and_then(Option::take)?;
        Some(Document {
            declaration: None,
            instructions: self.instructions,
            namespace,
            root,
        })
    }
}
impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::QName;

    fn start(name: &str) -> ParseEvent {
        ParseEvent::StartElement {
            name: QName::from(name),
        }
    }

    fn attr(name: &str, value: &str) -> ParseEvent {
        ParseEvent::Attribute {
            name: QName::from(name),
            value: value.to_string(),
        }
    }

    fn end() -> ParseEvent {
        ParseEvent::EndElement { name: None }
    }

    fn build(events: Vec<ParseEvent>) -> Option<Document> {
        let mut builder = TreeBuilder::new();
        for event in events {
            builder.handle_event(event).unwrap();
        }
        builder.handle_event(ParseEvent::EndDocument).unwrap();
        builder.finish()
    }

    #[test]
    fn test_depth_tracks_nesting() {
        let mut builder = TreeBuilder::new();
        builder.handle_event(start("a")).unwrap();
        builder.handle_event(start("b")).unwrap();
        assert_eq!(builder.depth(), 2);

        builder.handle_event(end()).unwrap();
        builder.handle_event(end()).unwrap();
        assert_eq!(builder.depth(), 0);
    }

    #[test]
    fn test_children_attach_to_the_open_element() {
        let document = build(vec![
            start("a"),
            start("b"),
            start("c"),
            end(),
            end(),
            start("d"),
            end(),
            end(),
        ])
        .unwrap();

        let root = &document.root;
        assert_eq!(root.name(), &QName::from("a"));
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0].name(), &QName::from("b"));
        assert_eq!(root.children()[0].children()[0].name(), &QName::from("c"));
        assert_eq!(root.children()[1].name(), &QName::from("d"));
    }

    #[test]
    fn test_root_namespace_binds_at_document_level() {
        let document = build(vec![
            start("root"),
            attr("xmlns:p", "urn:p"),
            attr("p:id", "7"),
            start("child"),
            attr("xmlns", "urn:d"),
            end(),
            end(),
        ])
        .unwrap();

        let namespace = document.namespace.as_ref().unwrap();
        assert_eq!(namespace.prefix(), Some("p"));
        assert_eq!(namespace.uri(), "urn:p");

        assert!(document.root.namespace().is_none());
        assert_eq!(
            document.root.get_attribute(Some("p"), "id").unwrap().value(),
            "7"
        );

        let child = &document.root.children()[0];
        assert_eq!(child.namespace().unwrap().uri(), "urn:d");
        assert_eq!(child.namespace().unwrap().prefix(), None);
    }

    #[test]
    fn test_duplicate_attribute_last_write_wins() {
        let document = build(vec![start("a"), attr("x", "1"), attr("x", "2"), end()]).unwrap();
        assert_eq!(document.root.attributes().len(), 1);
        assert_eq!(document.root.get_attribute(None, "x").unwrap().value(), "2");
    }

    #[test]
    fn test_instructions_keep_arrival_order() {
        let document = build(vec![
            ParseEvent::ProcessingInstruction {
                target: "first".to_string(),
                data: None,
            },
            start("a"),
            end(),
            ParseEvent::ProcessingInstruction {
                target: "second".to_string(),
                data: Some("x".to_string()),
            },
        ])
        .unwrap();

        let targets: Vec<&str> = document
            .instructions
            .iter()
            .map(|pi| pi.target())
            .collect();
        assert_eq!(targets, ["first", "second"]);
    }

    #[test]
    fn test_no_elements_means_no_document() {
        let result = build(vec![ParseEvent::ProcessingInstruction {
            target: "orphan".to_string(),
            data: None,
        }]);
        assert!(result.is_none());
    }

    #[test]
    fn test_unmatched_close_is_a_no_op() {
        let mut builder = TreeBuilder::new();
        builder.handle_event(start("a")).unwrap();
        builder.handle_event(end()).unwrap();
        builder.handle_event(end()).unwrap();
        assert_eq!(builder.depth(), 0);

        let document = builder.finish().unwrap();
        assert_eq!(document.root.name(), &QName::from("a"));
    }

    #[test]
    fn test_unmatched_close_errors_in_strict_mode() {
        let mut builder = TreeBuilder::strict();
        builder.handle_event(start("a")).unwrap();
        builder.handle_event(end()).unwrap();

        let err = builder
            .handle_event(ParseEvent::EndElement {
                name: Some(QName::from("b")),
            })
            .unwrap_err();
        assert!(matches!(err.kind, XmlErrorKind::UnmatchedClose(name) if name == "b"));
    }

    #[test]
    fn test_element_after_root_falls_back_under_the_root() {
        let mut builder = TreeBuilder::new();
        for event in [start("a"), end(), start("b"), end(), ParseEvent::EndDocument] {
            builder.handle_event(event).unwrap();
        }
        assert_eq!(builder.diagnostics().warnings(), 1);

        let document = builder.finish().unwrap();
        assert_eq!(document.root.name(), &QName::from("a"));
        assert_eq!(document.root.children().len(), 1);
        assert_eq!(document.root.children()[0].name(), &QName::from("b"));
    }

    #[test]
    fn test_close_tag_name_mismatch_is_reported_not_raised() {
        let mut builder = TreeBuilder::new();
        builder.handle_event(start("a")).unwrap();
        builder.handle_event(start("b")).unwrap();
        builder
            .handle_event(ParseEvent::EndElement {
                name: Some(QName::from("a")),
            })
            .unwrap();

        assert_eq!(builder.depth(), 1);
        assert_eq!(builder.diagnostics().warnings(), 1);
    }

    #[test]
    fn test_fatal_notification_yields_no_output() {
        let mut builder = TreeBuilder::new();
        builder.handle_event(start("a")).unwrap();
        builder
            .handle_event(ParseEvent::FatalError {
                location: None,
                message: "parser gave up".to_string(),
            })
            .unwrap();

        // Events after a fatal notification are ignored
        builder.handle_event(start("b")).unwrap();
        assert!(builder.finish().is_none());
    }

    #[test]
    fn test_recoverable_diagnostics_do_not_abort() {
        let mut builder = TreeBuilder::new();
        builder.handle_event(start("a")).unwrap();
        builder
            .handle_event(ParseEvent::Warning {
                location: None,
                message: "odd but fine".to_string(),
            })
            .unwrap();
        builder
            .handle_event(ParseEvent::Error {
                location: None,
                message: "recoverable".to_string(),
            })
            .unwrap();
        builder.handle_event(end()).unwrap();

        assert_eq!(builder.diagnostics().warnings(), 1);
        assert_eq!(builder.diagnostics().errors(), 1);
        assert!(builder.finish().is_some());
    }
}
