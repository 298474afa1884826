use super::{Expr, Path, Primitive};

use sluice_core::stmt::Value;

/// Converts a value, column or expression into a typed expression.
pub trait IntoExpr<T: ?Sized> {
    fn into_expr(self) -> Expr<T>;
}

impl<T: Primitive> IntoExpr<T> for T {
    fn into_expr(self) -> Expr<T> {
        Expr::from_value(self.into_value())
    }
}

impl<T: Primitive + Clone> IntoExpr<T> for &T {
    fn into_expr(self) -> Expr<T> {
        self.clone().into_expr()
    }
}

impl<T: Primitive> IntoExpr<Option<T>> for T {
    fn into_expr(self) -> Expr<Option<T>> {
        Expr::from_value(self.into_value())
    }
}

impl IntoExpr<String> for &str {
    fn into_expr(self) -> Expr<String> {
        Expr::from_value(Value::from(self))
    }
}

impl IntoExpr<Option<String>> for &str {
    fn into_expr(self) -> Expr<Option<String>> {
        Expr::from_value(Value::from(self))
    }
}

impl<T: ?Sized> IntoExpr<T> for Expr<T> {
    fn into_expr(self) -> Self {
        self
    }
}

impl<T> IntoExpr<Option<T>> for Expr<T> {
    fn into_expr(self) -> Expr<Option<T>> {
        self.cast()
    }
}

impl<T: ?Sized> IntoExpr<T> for Path<T> {
    fn into_expr(self) -> Expr<T> {
        self.expr()
    }
}

impl<T> IntoExpr<Option<T>> for Path<T> {
    fn into_expr(self) -> Expr<Option<T>> {
        self.expr().cast()
    }
}
