use super::Expr;
use crate::query::QueryModel;

/// `expr IN (SELECT column FROM ...)`
///
/// The subquery must project exactly one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprInSubquery {
    pub expr: Box<Expr>,
    pub query: Box<QueryModel>,
}

impl Expr {
    pub fn in_subquery(expr: impl Into<Self>, query: QueryModel) -> Self {
        ExprInSubquery {
            expr: Box::new(expr.into()),
            query: Box::new(query),
        }
        .into()
    }
}

impl From<ExprInSubquery> for Expr {
    fn from(value: ExprInSubquery) -> Self {
        Self::InSubquery(value)
    }
}
