use super::Error;

/// Error when a member or column reference has no mapped column.
///
/// Raised when a lookup by member name misses, when a column index is out of
/// range for its table, or when a column reference belongs to a row that is
/// not in scope where it is used.
#[derive(Debug)]
pub(super) struct UnresolvableMember {
    member: Box<str>,
    table: Box<str>,
}

impl std::error::Error for UnresolvableMember {}

impl core::fmt::Display for UnresolvableMember {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "member `{}` has no mapped column in table `{}`",
            self.member, self.table
        )
    }
}

impl Error {
    /// Creates an unresolvable member error.
    pub fn unresolvable_member(member: impl Into<String>, table: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnresolvableMember(UnresolvableMember {
            member: member.into().into(),
            table: table.into().into(),
        }))
    }

    /// Returns `true` if this error is an unresolvable member error.
    pub fn is_unresolvable_member(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnresolvableMember(_))
    }
}
