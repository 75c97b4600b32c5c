/// The qualified name of an element or attribute, with an optional prefix:
/// `prefix:local`
#[derive(Debug, Clone, Eq)]
pub struct QName {
    prefix: Option<String>,
    local: String,
}
impl QName {
    /// Create a new qualified name.
    pub fn new<T: Into<String>>(prefix: Option<T>, local: T) -> Self {
        Self {
            prefix: prefix.map(Into::into),
            local: local.into(),
        }
    }

    /// Builds a name from the raw prefix/local pair reported by the parser.
    /// An empty prefix means the name has none.
    pub(crate) fn from_parts(prefix: &str, local: &str) -> Self {
        let prefix = if prefix.is_empty() {
            None
        } else {
            Some(prefix)
        };
        Self::new(prefix, local)
    }

    /// Compare the name with a prefix and local part.
    #[must_use]
    pub fn equals(&self, prefix: Option<&str>, local: &str) -> bool {
        self.prefix.as_deref() == prefix && self.local.as_str() == local
    }

    /// Returns the prefix of the name.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Returns the local part of the name.
    #[must_use]
    pub fn local(&self) -> &str {
        &self.local
    }
}
impl std::fmt::Display for QName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, "{prefix}:{local}", local = self.local)
        } else {
            write!(f, "{local}", local = self.local)
        }
    }
}
impl PartialEq for QName {
    fn eq(&self, other: &Self) -> bool {
        self.prefix.as_deref() == other.prefix.as_deref()
            && self.local.as_str() == other.local.as_str()
    }
}
impl PartialEq<&str> for QName {
    fn eq(&self, other: &&str) -> bool {
        self.to_string().as_str() == *other
    }
}
impl PartialEq<str> for QName {
    fn eq(&self, other: &str) -> bool {
        self.to_string().as_str() == other
    }
}
impl From<&str> for QName {
    fn from(name: &str) -> Self {
        match name.split_once(':') {
            Some((prefix, local)) => QName::new(Some(prefix), local),
            None => QName::new(None, name),
        }
    }
}
impl From<String> for QName {
    fn from(name: String) -> Self {
        QName::from(name.as_str())
    }
}
