use super::{BinaryOp, Expr, ExprColumn, UnaryOp};
use crate::schema::ColumnType;

/// Looks up the type of a column reference.
///
/// Implemented by whatever knows which table each row source reads: the
/// query model for its own row, or the SQL generator's scope stack for
/// correlated subqueries.
pub trait ResolveColumn {
    fn column_ty(&self, column: &ExprColumn) -> Option<ColumnType>;
}

impl Expr {
    /// Infers the column type the expression evaluates to. `None` when the
    /// type is unknown, e.g. a null literal or an unresolved column.
    pub fn infer_ty(&self, cx: &impl ResolveColumn) -> Option<ColumnType> {
        match self {
            Expr::Value(value) => value.ty(),
            Expr::Column(column) => cx.column_ty(column),
            Expr::Cast(e) => Some(e.ty),
            Expr::UnaryOp(e) => match e.op {
                UnaryOp::Not => Some(ColumnType::Bool),
                UnaryOp::Neg | UnaryOp::BitNot => e.expr.infer_ty(cx),
            },
            Expr::BinaryOp(e) if e.op.is_predicate() => Some(ColumnType::Bool),
            Expr::BinaryOp(e) => {
                let lhs = e.lhs.infer_ty(cx);
                let rhs = e.rhs.infer_ty(cx);

                match e.op {
                    BinaryOp::Coalesce => lhs.or(rhs),
                    BinaryOp::Add
                        if lhs == Some(ColumnType::Text) || rhs == Some(ColumnType::Text) =>
                    {
                        Some(ColumnType::Text)
                    }
                    _ if lhs == Some(ColumnType::Float) || rhs == Some(ColumnType::Float) => {
                        Some(ColumnType::Float)
                    }
                    _ => lhs.or(rhs),
                }
            }
            Expr::Conditional(e) => e.then.infer_ty(cx).or_else(|| e.otherwise.infer_ty(cx)),
            Expr::Func(e) => e
                .func
                .result_ty(e.receiver().and_then(|receiver| receiver.infer_ty(cx))),
            Expr::InList(_) | Expr::InSubquery(_) | Expr::Exists(_) => Some(ColumnType::Bool),
        }
    }

    /// Returns `true` if the expression is a boolean-valued test, as opposed
    /// to a value that happens to be a bool.
    pub fn is_predicate(&self) -> bool {
        match self {
            Expr::BinaryOp(e) => e.op.is_predicate(),
            Expr::UnaryOp(e) => e.op == UnaryOp::Not,
            Expr::Func(e) => e.func.is_predicate(),
            Expr::InList(_) | Expr::InSubquery(_) | Expr::Exists(_) => true,
            _ => false,
        }
    }
}
