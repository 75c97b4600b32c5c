use super::QName;

/// The attribute name reserved for namespace declarations.
const XMLNS: &str = "xmlns";

/// A namespace binding: an optional prefix bound to a URI.
///
/// A binding with no prefix declares the default namespace. The URI is kept
/// exactly as it appeared in the declaring attribute's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    prefix: Option<String>,
    uri: String,
}
impl Namespace {
    /// Create a new namespace binding.
    pub fn new<T: Into<String>>(prefix: Option<T>, uri: T) -> Self {
        Self {
            prefix: prefix.map(Into::into),
            uri: uri.into(),
        }
    }

    /// Classifies an attribute, building a binding if its name declares a namespace.
    ///
    /// A name declares a namespace when it is exactly `xmlns` (default
    /// namespace) or carries the `xmlns` prefix (`xmlns:p` binds prefix `p`).
    /// Anything else, including names merely starting with `xmlns`, is an
    /// ordinary attribute and yields `None`.
    ///
    /// This is a pure classification; the caller decides whether the binding
    /// lands on the document or on an element.
    #[must_use]
    pub fn from_attribute(name: &QName, value: &str) -> Option<Self> {
        match name.prefix() {
            None if name.local() == XMLNS => Some(Self::new(None, value)),
            Some(XMLNS) => Some(Self::new(Some(name.local()), value)),
            _ => None,
        }
    }

    /// Returns the prefix bound by this declaration, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Returns the bound URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The attribute name this binding is declared under: `xmlns` or `xmlns:prefix`.
    #[must_use]
    pub fn attribute_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{XMLNS}:{prefix}"),
            None => XMLNS.to_string(),
        }
    }
}
