use super::Error;

/// Error when an expression cannot be translated to SQL.
///
/// This occurs when:
/// - A node shape cannot be resolved as a column, a derived column, an
///   arithmetic expression or a constant
/// - A function has no mapping for the target dialect or type
/// - A comparison other than `=`/`!=` is applied to `NULL`
/// - An ordering key is anything but a direct column of the query's row
#[derive(Debug)]
pub(super) struct UnsupportedExpression {
    message: Box<str>,
}

impl std::error::Error for UnsupportedExpression {}

impl core::fmt::Display for UnsupportedExpression {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported expression: {}", self.message)
    }
}

impl Error {
    /// Creates an unsupported expression error.
    pub fn unsupported_expression(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedExpression(UnsupportedExpression {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported expression error.
    pub fn is_unsupported_expression(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedExpression(_))
    }
}
