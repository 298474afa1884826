use super::{Expr, IntoExpr, Numeric, Primitive};
use crate::{Query, Table};

use sluice_core::stmt::{self, ExprColumn, SourceId};
use std::{fmt, marker::PhantomData, ops};

/// A mapped column of one query's row, typed by the field it is read into.
pub struct Path<T: ?Sized> {
    column: ExprColumn,
    _p: PhantomData<T>,
}

impl<T: ?Sized> Path<T> {
    pub const fn new(source: SourceId, column: usize) -> Self {
        Self {
            column: ExprColumn { source, column },
            _p: PhantomData,
        }
    }

    /// Index of the column in its table schema.
    pub fn index(self) -> usize {
        self.column.column
    }

    pub fn source(self) -> SourceId {
        self.column.source
    }

    pub fn expr(self) -> Expr<T> {
        Expr::from_untyped(self.untyped())
    }

    pub(crate) fn untyped(self) -> stmt::Expr {
        self.column.into()
    }

    pub fn eq(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.expr().eq(rhs)
    }

    pub fn ne(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.expr().ne(rhs)
    }

    pub fn gt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.expr().gt(rhs)
    }

    pub fn ge(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.expr().ge(rhs)
    }

    pub fn lt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.expr().lt(rhs)
    }

    pub fn le(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.expr().le(rhs)
    }

    /// `self IN (SELECT ...)`. The subquery must project exactly one column.
    pub fn in_query<M: Table>(self, query: Query<M>) -> Expr<bool> {
        let column = self.column;

        Expr::from_result(
            query
                .model()
                .map(|model| stmt::Expr::in_subquery(column, model)),
        )
    }
}

impl<T: Primitive> Path<T> {
    pub fn in_list(self, values: impl IntoIterator<Item = T>) -> Expr<bool> {
        self.expr().in_list(values)
    }
}

impl<T> Path<Option<T>> {
    pub fn is_null(self) -> Expr<bool> {
        self.expr().is_null()
    }

    pub fn is_not_null(self) -> Expr<bool> {
        self.expr().is_not_null()
    }

    pub fn unwrap_or(self, default: impl IntoExpr<T>) -> Expr<T> {
        self.expr().unwrap_or(default)
    }
}

macro_rules! impl_binary_ops {
    ( $( $trait:ident::$method:ident ),* ) => {
        $(
            impl<T: Numeric, R: IntoExpr<T>> ops::$trait<R> for Path<T>
            where
                Expr<T>: ops::$trait<R, Output = Expr<T>>,
            {
                type Output = Expr<T>;

                fn $method(self, rhs: R) -> Expr<T> {
                    ops::$trait::$method(self.expr(), rhs)
                }
            }
        )*
    };
}

impl_binary_ops!(Add::add, Sub::sub, Mul::mul, Div::div, Rem::rem, BitAnd::bitand, BitOr::bitor, BitXor::bitxor);

impl<T: Numeric> ops::Neg for Path<T> {
    type Output = Expr<T>;

    fn neg(self) -> Expr<T> {
        -self.expr()
    }
}

impl ops::Not for Path<bool> {
    type Output = Expr<bool>;

    fn not(self) -> Expr<bool> {
        !self.expr()
    }
}

impl<T: ?Sized> Clone for Path<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Path<T> {}

impl<T: ?Sized> From<Path<T>> for Expr<T> {
    fn from(value: Path<T>) -> Self {
        value.expr()
    }
}

impl<T: ?Sized> fmt::Debug for Path<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Path").field(&self.column).finish()
    }
}
