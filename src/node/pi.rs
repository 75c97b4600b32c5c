/// A processing instruction:
/// `<?target data?>`
///
/// Instructions are immutable once created and keep the order in which they
/// were encountered in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingInstruction {
    target: String,
    data: Option<String>,
}
impl ProcessingInstruction {
    /// Create a new processing instruction.
    pub fn new<T: Into<String>>(target: T, data: Option<T>) -> Self {
        Self {
            target: target.into(),
            data: data.map(Into::into),
        }
    }

    /// Returns the target of the instruction.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the data of the instruction, if it has any.
    #[must_use]
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}
