use super::{Namespace, QName};

/// An element in the document tree, with a name, attributes, an optional
/// namespace binding, and children:
/// `<name attr="value">...</name>`
///
/// Attribute names are unique; setting an attribute that already exists
/// replaces its value in place, so insertion order reflects first writes.
/// Children keep document order. An element exclusively owns its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: QName,
    attributes: Vec<Attribute>,
    namespace: Option<Namespace>,
    children: Vec<Element>,
}
impl Element {
    /// Create a new element with no attributes or children.
    pub fn new(name: impl Into<QName>) -> Self {
        Self {
            name: name.into(),
            attributes: vec![],
            namespace: None,
            children: vec![],
        }
    }

    /// Get the name of the element.
    #[must_use]
    pub fn name(&self) -> &QName {
        &self.name
    }

    /// Get the attributes of the element, in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Get the namespace binding declared on this element, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&Namespace> {
        self.namespace.as_ref()
    }

    /// Get the children of the element, in document order.
    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Get an attribute by name.
    #[must_use]
    pub fn get_attribute(&self, prefix: Option<&str>, local: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name.equals(prefix, local))
    }

    /// Set an attribute on the element.
    ///
    /// Duplicate names are not permitted: if the name already exists its
    /// value is replaced (last write wins), keeping the original position.
    pub fn set_attribute(&mut self, name: impl Into<QName>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute::new(name, value)),
        }
    }

    /// Set the namespace binding declared on this element, replacing any
    /// previous binding.
    pub fn set_namespace(&mut self, namespace: Namespace) {
        self.namespace = Some(namespace);
    }

    /// Append a child element.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }
}

/// An attribute set on an element, with a name and value:
/// `name="value"`
///
/// The value may be empty; the name never is.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: QName,
    value: String,
}
impl Attribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<QName>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the name of the attribute.
    #[must_use]
    pub fn name(&self) -> &QName {
        &self.name
    }

    /// Returns the value of the attribute.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attribute_last_write_wins() {
        let mut element = Element::new("item");
        element.set_attribute("id", "1");
        element.set_attribute("class", "a");
        element.set_attribute("id", "2");

        assert_eq!(element.attributes().len(), 2);
        assert_eq!(element.get_attribute(None, "id").unwrap().value(), "2");

        // The first write's position is kept
        assert_eq!(element.attributes()[0].name(), &QName::from("id"));
    }

    #[test]
    fn test_get_attribute_qualified() {
        let mut element = Element::new("root");
        element.set_attribute("p:id", "7");

        assert!(element.get_attribute(None, "id").is_none());
        assert_eq!(element.get_attribute(Some("p"), "id").unwrap().value(), "7");
    }

    #[test]
    fn test_set_namespace_replaces() {
        let mut element = Element::new("e");
        element.set_namespace(Namespace::new(Some("a"), "urn:a"));
        element.set_namespace(Namespace::new(Some("b"), "urn:b"));

        assert_eq!(element.namespace().unwrap().prefix(), Some("b"));
    }

    #[test]
    fn test_children_keep_order() {
        let mut element = Element::new("parent");
        element.push_child(Element::new("b"));
        element.push_child(Element::new("c"));

        let names: Vec<String> = element.children().iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names, ["b", "c"]);
    }
}
