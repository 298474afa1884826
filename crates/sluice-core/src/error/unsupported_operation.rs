use super::Error;

/// Error when a query operation is not one the builder knows how to fold.
///
/// The message names the offending operation and the full list of supported
/// operations so callers can rewrite the query shape.
#[derive(Debug)]
pub(super) struct UnsupportedOperation {
    name: Box<str>,
    supported: Box<str>,
}

impl std::error::Error for UnsupportedOperation {}

impl core::fmt::Display for UnsupportedOperation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported operation `{}`; supported operations: {}",
            self.name, self.supported
        )
    }
}

impl Error {
    /// Creates an unsupported operation error.
    pub fn unsupported_operation(name: impl Into<String>, supported: &[&str]) -> Error {
        Error::from(super::ErrorKind::UnsupportedOperation(UnsupportedOperation {
            name: name.into().into(),
            supported: supported.join(", ").into(),
        }))
    }

    /// Returns `true` if this error is an unsupported operation error.
    pub fn is_unsupported_operation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedOperation(_))
    }
}
