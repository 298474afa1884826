use super::{ColumnRef, Comma, Formatter, Ident, Params, Predicate, ToSql};
use crate::Dialect;

use sluice_core::{
    query::{OrderBy, QueryModel, TerminalKind},
    stmt::ExprColumn,
    Error, Result,
};

/// Largest row count PostgreSQL accepts, used as "no limit" when only an
/// offset is requested.
const POSTGRESQL_UNLIMITED: u64 = i64::MAX as u64;

/// A full SELECT statement for a query model
pub(super) struct Select<'a>(pub(super) &'a QueryModel);

/// One ORDER BY key
struct OrderTerm {
    column: ExprColumn,
    ascending: bool,
}

impl ToSql for Select<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let model = self.0;

        // A subquery reading an enclosing row needs qualified names.
        let correlated = model.predicate.as_ref().is_some_and(|predicate| {
            f.scopes
                .iter()
                .any(|scope| predicate.references_source(scope.source))
        });

        if correlated
            && f
                .scopes
                .iter()
                .any(|scope| scope.table.name == model.table.name)
        {
            return Err(Error::unsupported_expression(format!(
                "correlated subquery over the enclosing table `{}`",
                model.table.name
            )));
        }

        let qualify = f.qualify;
        f.qualify |= correlated;
        f.push_scope(model);

        let ret = if model.terminal.is_count() && (model.is_paged() || model.distinct) {
            count_page(f, model)
        } else {
            select(f, model)
        };

        f.pop_scope();
        f.qualify = qualify;
        ret
    }
}

impl ToSql for &OrderTerm {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let direction = if self.ascending { " ASC" } else { " DESC" };
        fmt!(f, ColumnRef(&self.column) direction);
        Ok(())
    }
}

/// Counting a page (or the distinct rows) counts the rows of the inner
/// query rather than the table.
fn count_page<P: Params>(f: &mut Formatter<'_, P>, model: &QueryModel) -> Result<()> {
    let inner = QueryModel {
        terminal: TerminalKind::Sequence,
        ..model.clone()
    };

    fmt!(f, "SELECT " count_fn(f.dialect(), model.terminal) " FROM (");
    select(f, &inner)?;
    fmt!(f, ") AS " Ident("t"));
    Ok(())
}

fn count_fn(dialect: Dialect, terminal: TerminalKind) -> &'static str {
    match (dialect, terminal) {
        (Dialect::SqlServer, TerminalKind::LongCount) => "COUNT_BIG(*)",
        _ => "COUNT(*)",
    }
}

fn select<P: Params>(f: &mut Formatter<'_, P>, model: &QueryModel) -> Result<()> {
    let dialect = f.dialect();
    let take = model.effective_take();
    let skip = model.skip;
    let orderings = orderings(model)?;

    fmt!(f, "SELECT ");

    if model.distinct && !model.terminal.is_count() {
        fmt!(f, "DISTINCT ");
    }

    // SQL Server only pages with OFFSET/FETCH when there is an offset.
    if dialect.is_sql_server() && skip.is_none() {
        if let Some(take) = take {
            fmt!(f, "TOP (" take ") ");
        }
    }

    match model.terminal {
        TerminalKind::Count | TerminalKind::LongCount => {
            fmt!(f, count_fn(dialect, model.terminal));
        }
        TerminalKind::Any => fmt!(f, "1"),
        _ if model.projection.is_empty() => fmt!(f, "*"),
        _ => {
            let columns: Vec<_> = model
                .projection
                .iter()
                .map(|&column| ExprColumn {
                    source: model.source,
                    column,
                })
                .collect();

            fmt!(f, Comma(columns.iter().map(ColumnRef)));
        }
    }

    fmt!(f, " FROM " Ident(&model.table.name));

    if let Some(predicate) = &model.predicate {
        fmt!(f, " WHERE " Predicate(predicate));
    }

    if !orderings.is_empty() {
        let terms: Vec<_> = orderings
            .iter()
            .map(|ordering| OrderTerm {
                column: ExprColumn {
                    source: model.source,
                    column: ordering.column,
                },
                ascending: ordering.ascending,
            })
            .collect();

        fmt!(f, " ORDER BY " Comma(&terms));
    }

    match (dialect, take, skip) {
        (_, None, None) => {}
        (Dialect::SqlServer, _, None) => {}
        (Dialect::SqlServer, take, Some(skip)) => {
            fmt!(f, " OFFSET " skip " ROWS");
            if let Some(take) = take {
                fmt!(f, " FETCH NEXT " take " ROWS ONLY");
            }
        }
        (Dialect::Sqlite | Dialect::PostgreSql, Some(take), skip) => {
            fmt!(f, " limit " take);
            if let Some(skip) = skip {
                fmt!(f, " offset " skip);
            }
        }
        // The engines only accept OFFSET after a LIMIT.
        (Dialect::Sqlite, None, Some(skip)) => fmt!(f, " limit -1 offset " skip),
        (Dialect::PostgreSql, None, Some(skip)) => {
            fmt!(f, " limit " POSTGRESQL_UNLIMITED " offset " skip);
        }
    }

    Ok(())
}

/// The ORDER BY keys to emit.
///
/// Paging without an explicit order is ordered by primary key so pages are
/// deterministic. `Last` reads the reversed order.
fn orderings(model: &QueryModel) -> Result<Vec<OrderBy>> {
    if model.terminal.is_count() {
        return Ok(vec![]);
    }

    if model.terminal == TerminalKind::Any && model.skip.is_none() {
        return Ok(vec![]);
    }

    let is_last = model.terminal.is_last();

    if is_last && model.is_paged() {
        return Err(Error::unsupported_expression(format!(
            "`{}` over a paged query",
            model.terminal.name()
        )));
    }

    let mut orderings = model.orderings.clone();

    if orderings.is_empty() && (model.skip.is_some() || is_last) {
        let Some(primary_key) = model.table.primary_key_index() else {
            return Err(Error::invalid_schema(format!(
                "table `{}` has no primary key to order by",
                model.table.name
            )));
        };

        orderings.push(OrderBy::asc(primary_key));
    }

    if is_last {
        orderings = orderings.into_iter().map(OrderBy::reverse).collect();
    }

    Ok(orderings)
}
