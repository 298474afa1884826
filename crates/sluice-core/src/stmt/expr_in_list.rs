use super::{Expr, Value};

/// `expr IN (v1, v2, ...)` against a list known at build time.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprInList {
    pub expr: Box<Expr>,
    pub list: Vec<Value>,
}

impl Expr {
    pub fn in_list<T>(expr: impl Into<Self>, list: impl IntoIterator<Item = T>) -> Self
    where
        Value: From<T>,
    {
        ExprInList {
            expr: Box::new(expr.into()),
            list: list.into_iter().map(Value::from).collect(),
        }
        .into()
    }
}

impl From<ExprInList> for Expr {
    fn from(value: ExprInList) -> Self {
        Self::InList(value)
    }
}
