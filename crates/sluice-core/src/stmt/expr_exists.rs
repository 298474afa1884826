use super::Expr;
use crate::query::QueryModel;

/// Whether the inner query returns at least one row.
///
/// `condition` is an extra predicate over the inner row that may also read
/// columns of enclosing rows. It is AND-ed with the inner query's own filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprExists {
    pub query: Box<QueryModel>,
    pub condition: Option<Box<Expr>>,
}

impl Expr {
    pub fn exists(query: QueryModel) -> Self {
        ExprExists {
            query: Box::new(query),
            condition: None,
        }
        .into()
    }

    /// A correlated `EXISTS`: `condition` usually equates an inner column with
    /// an outer one.
    pub fn exists_where(query: QueryModel, condition: impl Into<Self>) -> Self {
        ExprExists {
            query: Box::new(query),
            condition: Some(Box::new(condition.into())),
        }
        .into()
    }
}

impl From<ExprExists> for Expr {
    fn from(value: ExprExists) -> Self {
        Self::Exists(value)
    }
}
