use super::Expr;
use crate::schema::ColumnType;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprCast {
    /// Expression to cast
    pub expr: Box<Expr>,

    /// Type to cast to
    pub ty: ColumnType,

    /// The conversion was inserted to line up operand types (for example an
    /// integer column compared with a float). Implicit widenings are looked
    /// through when deciding whether an operand is a plain column.
    pub implicit: bool,
}

impl Expr {
    /// An explicit conversion, rendered as a SQL `CAST`.
    pub fn cast(expr: impl Into<Self>, ty: ColumnType) -> Self {
        ExprCast {
            expr: Box::new(expr.into()),
            ty,
            implicit: false,
        }
        .into()
    }

    /// An implicit conversion, as inserted by a host language's typing rules.
    pub fn convert(expr: impl Into<Self>, ty: ColumnType) -> Self {
        ExprCast {
            expr: Box::new(expr.into()),
            ty,
            implicit: true,
        }
        .into()
    }

    pub fn is_cast(&self) -> bool {
        matches!(self, Self::Cast(_))
    }
}

impl From<ExprCast> for Expr {
    fn from(value: ExprCast) -> Self {
        Self::Cast(value)
    }
}
