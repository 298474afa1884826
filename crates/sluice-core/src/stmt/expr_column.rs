use super::{Expr, SourceId};

/// Reference to a column of a query's row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprColumn {
    /// The row the column is read from
    pub source: SourceId,

    /// Index of the column in the table schema
    pub column: usize,
}

impl Expr {
    pub fn column(source: SourceId, column: usize) -> Self {
        ExprColumn { source, column }.into()
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(_))
    }

    pub fn as_column(&self) -> Option<&ExprColumn> {
        match self {
            Self::Column(column) => Some(column),
            _ => None,
        }
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Self::Column(value)
    }
}
