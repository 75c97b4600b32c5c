//! Error handling for XML beautification
use crate::event::Location;
use std::path::PathBuf;

/// A result type for XML beautification, which can be either a successful value or an error.
pub type XmlResult<T> = std::result::Result<T, XmlError>;

/// An error that terminated a beautification run.
#[derive(Debug)]
pub struct XmlError {
    /// The context of the error
    pub context: Box<ErrorContext>,

    /// The kind of error that occurred
    pub kind: XmlErrorKind,
}
impl XmlError {
    /// Creates a new `XmlError`
    #[must_use]
    pub fn new(kind: XmlErrorKind, context: ErrorContext) -> Self {
        Self {
            context: Box::new(context),
            kind,
        }
    }

    /// Adds a path to the error context.
    #[must_use]
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.context.path = Some(path);
        self
    }
}
impl std::fmt::Display for XmlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.context)?;

        for line in self.kind.to_string().lines() {
            writeln!(f, "= {line}")?;
        }
        Ok(())
    }
}
impl std::error::Error for XmlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}
impl From<xmlparser::Error> for XmlError {
    fn from(err: xmlparser::Error) -> Self {
        let location = Location::from(err.pos());
        Self::new(XmlErrorKind::Xml(err), ErrorContext::new(Some(location)))
    }
}
impl From<std::io::Error> for XmlError {
    fn from(err: std::io::Error) -> Self {
        Self::new(XmlErrorKind::Io(err), ErrorContext::new(None))
    }
}

/// The kind of error that terminated a beautification run.
#[derive(Debug, thiserror::Error)]
pub enum XmlErrorKind {
    /// Another error occurred while rebuilding the document
    #[error("{0}")]
    Custom(String),

    /// A closing tag arrived with no element left open (strict mode only)
    #[error("Closing tag </{0}> has no matching open element")]
    UnmatchedClose(String),

    /// The external parser could not continue tokenizing
    #[error("XML parser error: {0}")]
    Xml(#[from] xmlparser::Error),

    /// IO error occurred while reading a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Context describing where an error happened.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The path to the file that was parsed, if available.
    pub path: Option<PathBuf>,

    /// Position of the error in the source, if the parser provided one.
    pub location: Option<Location>,
}
impl ErrorContext {
    /// Creates a new `ErrorContext` with the given location.
    #[must_use]
    pub fn new(location: Option<Location>) -> Self {
        Self {
            path: None,
            location,
        }
    }

    /// Creates a new `ErrorContext` with the given path and location.
    #[must_use]
    pub fn with_path(path: PathBuf, location: Option<Location>) -> Self {
        Self {
            path: Some(path),
            location,
        }
    }
}
impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = self.path.as_ref().map(|p| p.display());

        if let Some(location) = self.location {
            write!(f, "= At ")?;

            if let Some(path) = path {
                write!(f, "{path}:")?;
            }

            writeln!(f, "{location}")?;
        } else if let Some(path) = path {
            writeln!(f, "= In {path}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_path_and_location() {
        let err = XmlError::new(
            XmlErrorKind::Custom("something broke".to_string()),
            ErrorContext::new(Some(Location { row: 3, col: 14 })),
        )
        .with_path(PathBuf::from("input.xml"));

        let rendered = err.to_string();
        assert!(rendered.contains("= At input.xml:3:14"));
        assert!(rendered.contains("= something broke"));
    }

    #[test]
    fn test_display_without_context() {
        let err = XmlError::new(
            XmlErrorKind::UnmatchedClose("b".to_string()),
            ErrorContext::default(),
        );
        assert_eq!(
            err.to_string(),
            "= Closing tag </b> has no matching open element\n"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = XmlError::from(io);
        assert!(matches!(err.kind, XmlErrorKind::Io(_)));
        assert!(err.context.location.is_none());
    }
}
