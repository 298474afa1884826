use super::TerminalKind;
use crate::{
    schema::{ColumnType, TableSchema},
    stmt::{Expr, ExprColumn, ResolveColumn, SourceId},
};

use std::sync::Arc;

/// The accumulated description of one query over a single table.
///
/// Produced by [`build`](super::build) from an operation sequence. SQL
/// generation only reads a model; the builder is the only place one is
/// extended.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryModel {
    /// Table the query reads
    pub table: Arc<TableSchema>,

    /// Identity of the query's row; column references carrying this id read
    /// from `table`.
    pub source: SourceId,

    /// Conjunction of every filter applied so far
    pub predicate: Option<Expr>,

    /// Sort keys, most significant first
    pub orderings: Vec<OrderBy>,

    /// Explicitly selected columns. Empty selects every column.
    pub projection: Vec<usize>,

    pub skip: Option<u64>,

    pub take: Option<u64>,

    pub distinct: bool,

    pub terminal: TerminalKind,
}

/// One sort key of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    /// Column index in the query's table
    pub column: usize,

    pub ascending: bool,
}

impl QueryModel {
    /// A query returning every row of `table`. Column references for the
    /// query's row must carry `source`.
    pub fn new(table: Arc<TableSchema>, source: SourceId) -> QueryModel {
        QueryModel {
            table,
            source,
            predicate: None,
            orderings: vec![],
            projection: vec![],
            skip: None,
            take: None,
            distinct: false,
            terminal: TerminalKind::Sequence,
        }
    }

    /// Reference to one of this query's columns
    pub fn column(&self, index: usize) -> Expr {
        Expr::column(self.source, index)
    }

    /// AND-combines `expr` with the current predicate.
    pub fn and_predicate(&mut self, expr: Expr) {
        self.predicate = Some(match self.predicate.take() {
            Some(predicate) => Expr::and(predicate, expr),
            None => expr,
        });
    }

    /// Row limit after applying the terminal's implicit limit.
    pub fn effective_take(&self) -> Option<u64> {
        match (self.take, self.terminal.implicit_take()) {
            (Some(take), Some(implicit)) => Some(take.min(implicit)),
            (take, implicit) => take.or(implicit),
        }
    }

    pub fn is_paged(&self) -> bool {
        self.skip.is_some() || self.take.is_some()
    }
}

impl ResolveColumn for QueryModel {
    fn column_ty(&self, column: &ExprColumn) -> Option<ColumnType> {
        if column.source != self.source {
            return None;
        }

        self.table.column(column.column).map(|column| column.ty)
    }
}

impl OrderBy {
    pub fn asc(column: usize) -> OrderBy {
        OrderBy {
            column,
            ascending: true,
        }
    }

    pub fn desc(column: usize) -> OrderBy {
        OrderBy {
            column,
            ascending: false,
        }
    }

    pub fn reverse(self) -> OrderBy {
        OrderBy {
            ascending: !self.ascending,
            ..self
        }
    }
}
