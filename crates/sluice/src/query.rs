use crate::{
    schema,
    stmt::{Expr, IntoExpr, Path, Selection},
    Result, Table,
};

use sluice_core::{
    query::{self, Operation, QueryModel},
    stmt::{self, SourceId},
    Error,
};
use std::{fmt, marker::PhantomData};

/// A query over the rows of table `M`.
///
/// Each method records one operation. Nothing is validated until the query
/// is compiled, at which point the first failure, whether from building an
/// argument or from folding the operations, is returned.
pub struct Query<M> {
    /// Identifies this query's row in column references
    source: SourceId,

    /// Recorded operations, or the first error hit while recording
    operations: Result<Vec<Operation>>,

    _p: PhantomData<M>,
}

impl<M: Table> Query<M> {
    /// Every row of the table.
    pub fn all() -> Self {
        Self {
            source: SourceId::generate(),
            operations: Ok(vec![]),
            _p: PhantomData,
        }
    }

    /// Column accessors for this query's row.
    pub fn fields(&self) -> M::Fields {
        M::fields(self.source)
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    /// Records a raw operation. The name and arguments are checked when the
    /// query is compiled.
    pub fn apply(mut self, operation: Operation) -> Self {
        if let Ok(operations) = &mut self.operations {
            operations.push(operation);
        }

        self
    }

    fn push(self, method: &str, args: impl IntoIterator<Item = Result<stmt::Expr>>) -> Self {
        match args.into_iter().collect::<Result<Vec<_>>>() {
            Ok(args) => self.apply(Operation::new(method, args)),
            Err(err) => self.fail(err),
        }
    }

    fn fail(mut self, err: Error) -> Self {
        if self.operations.is_ok() {
            self.operations = Err(err);
        }

        self
    }

    fn predicate<E: IntoExpr<bool>>(&self, f: impl FnOnce(&M::Fields) -> E) -> Result<stmt::Expr> {
        f(&self.fields()).into_expr().untyped
    }

    pub fn filter<E: IntoExpr<bool>>(self, f: impl FnOnce(&M::Fields) -> E) -> Self {
        let predicate = self.predicate(f);
        self.push("Where", [predicate])
    }

    pub fn order_by<T: ?Sized>(self, f: impl FnOnce(&M::Fields) -> Path<T>) -> Self {
        let column = f(&self.fields()).untyped();
        self.apply(Operation::order_by(column))
    }

    pub fn order_by_descending<T: ?Sized>(self, f: impl FnOnce(&M::Fields) -> Path<T>) -> Self {
        let column = f(&self.fields()).untyped();
        self.apply(Operation::order_by_descending(column))
    }

    pub fn then_by<T: ?Sized>(self, f: impl FnOnce(&M::Fields) -> Path<T>) -> Self {
        let column = f(&self.fields()).untyped();
        self.apply(Operation::then_by(column))
    }

    pub fn then_by_descending<T: ?Sized>(self, f: impl FnOnce(&M::Fields) -> Path<T>) -> Self {
        let column = f(&self.fields()).untyped();
        self.apply(Operation::then_by_descending(column))
    }

    /// Skips `count` rows. The count must fold to a non-negative constant.
    pub fn skip(self, count: impl IntoExpr<i64>) -> Self {
        self.push("Skip", [count.into_expr().untyped])
    }

    /// Reads at most `count` rows. The count must fold to a non-negative
    /// constant.
    pub fn take(self, count: impl IntoExpr<i64>) -> Self {
        self.push("Take", [count.into_expr().untyped])
    }

    /// Projects the selected columns instead of the whole row.
    pub fn select<S: Selection>(self, f: impl FnOnce(&M::Fields) -> S) -> Self {
        let columns = f(&self.fields()).into_columns();
        self.apply(Operation::select(columns))
    }

    pub fn distinct(self) -> Self {
        self.apply(Operation::distinct())
    }

    /// `EXISTS (SELECT 1 FROM ...)` over this query, for use in another
    /// query's predicate.
    pub fn exists(self) -> Expr<bool> {
        Expr::from_result(self.model().map(stmt::Expr::exists))
    }

    /// A correlated `EXISTS`. The condition reads this query's row and may
    /// also read columns of the enclosing query.
    pub fn exists_where<E: IntoExpr<bool>>(self, f: impl FnOnce(&M::Fields) -> E) -> Expr<bool> {
        let condition = self.predicate(f);

        Expr::from_result(
            self.model()
                .and_then(|model| Ok(stmt::Expr::exists_where(model, condition?))),
        )
    }

    /// The recorded operations, in order.
    pub fn operations(&self) -> Result<&[Operation]> {
        self.operations.as_deref().map_err(Clone::clone)
    }

    /// Folds the recorded operations into a query model over `M`'s table.
    pub fn model(&self) -> Result<QueryModel> {
        let table = schema::cached::<M>()?;
        let operations = self.operations()?.to_vec();

        query::build(QueryModel::new(table, self.source), operations)
    }
}

macro_rules! impl_terminals {
    ( $( $(#[$attr:meta])* $method:ident, $method_where:ident => $name:literal; )* ) => {
        impl<M: Table> Query<M> {
            $(
                $(#[$attr])*
                pub fn $method(self) -> Self {
                    self.push($name, [])
                }

                $(#[$attr])*
                ///
                /// Only rows matching the predicate are considered.
                pub fn $method_where<E: IntoExpr<bool>>(
                    self,
                    f: impl FnOnce(&M::Fields) -> E,
                ) -> Self {
                    let predicate = self.predicate(f);
                    self.push($name, [predicate])
                }
            )*
        }
    };
}

impl_terminals! {
    /// Number of matching rows.
    count, count_where => "Count";
    /// Number of matching rows, as a 64-bit count.
    long_count, long_count_where => "LongCount";
    /// The first row.
    first, first_where => "First";
    /// The first row, if any.
    first_or_default, first_or_default_where => "FirstOrDefault";
    /// The only row. Two rows are read so a second match can be detected.
    single, single_where => "Single";
    /// The only row, if any.
    single_or_default, single_or_default_where => "SingleOrDefault";
    /// The last row, reading the ordering backwards.
    last, last_where => "Last";
    /// The last row, if any.
    last_or_default, last_or_default_where => "LastOrDefault";
    /// Whether any row matches.
    any, any_where => "Any";
}

impl<M> Clone for Query<M> {
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            operations: self.operations.clone(),
            _p: PhantomData,
        }
    }
}

impl<M> fmt::Debug for Query<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("table", &std::any::type_name::<M>())
            .field("source", &self.source)
            .field("operations", &self.operations)
            .finish()
    }
}
