use std::fmt;

/// The storage class of a mapped column.
///
/// This is the application's view of a column. Each dialect picks its own
/// concrete SQL type name when a cast to one of these is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Signed integer of any width
    Int,

    /// Floating point or decimal number
    Float,

    /// Unconstrained text
    Text,

    /// Boolean flag
    Bool,

    /// A civil date and time, without zone
    DateTime,

    /// 128-bit universally unique identifier
    Guid,

    /// Unconstrained binary data
    Blob,

    /// An enumeration stored as its integer discriminant
    Enum,
}

impl ColumnType {
    /// Returns `true` for types that take part in arithmetic.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::Enum)
    }

    pub fn is_text(self) -> bool {
        matches!(self, Self::Text)
    }

    pub fn is_bool(self) -> bool {
        matches!(self, Self::Bool)
    }

    pub fn is_date_time(self) -> bool {
        matches!(self, Self::DateTime)
    }

    /// Returns `true` if converting from `self` to `to` never loses
    /// information, i.e. an implicit numeric widening.
    pub fn widens_to(self, to: ColumnType) -> bool {
        self == to
            || matches!(
                (self, to),
                (Self::Int | Self::Enum, Self::Float) | (Self::Enum, Self::Int)
            )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Text => "Text",
            Self::Bool => "Bool",
            Self::DateTime => "DateTime",
            Self::Guid => "Guid",
            Self::Blob => "Blob",
            Self::Enum => "Enum",
        })
    }
}
