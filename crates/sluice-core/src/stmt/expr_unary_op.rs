use super::{Expr, UnaryOp};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprUnaryOp {
    pub op: UnaryOp,
    pub expr: Box<Expr>,
}

impl Expr {
    pub fn unary_op(op: UnaryOp, expr: impl Into<Self>) -> Self {
        ExprUnaryOp {
            op,
            expr: Box::new(expr.into()),
        }
        .into()
    }

    pub fn not(expr: impl Into<Self>) -> Self {
        Expr::unary_op(UnaryOp::Not, expr)
    }

    pub fn neg(expr: impl Into<Self>) -> Self {
        Expr::unary_op(UnaryOp::Neg, expr)
    }

    pub fn bit_not(expr: impl Into<Self>) -> Self {
        Expr::unary_op(UnaryOp::BitNot, expr)
    }

    pub fn is_not(&self) -> bool {
        matches!(
            self,
            Self::UnaryOp(ExprUnaryOp {
                op: UnaryOp::Not,
                ..
            })
        )
    }
}

impl From<ExprUnaryOp> for Expr {
    fn from(value: ExprUnaryOp) -> Self {
        Self::UnaryOp(value)
    }
}
