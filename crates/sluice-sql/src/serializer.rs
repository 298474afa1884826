#[macro_use]
mod fmt;
use fmt::ToSql;

mod column;
use column::ColumnRef;

mod delim;
use delim::Comma;

mod expr;
use expr::{Operand, Predicate};

mod func;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

mod select;
use select::Select;

mod ty;

mod value;

use crate::{Dialect, GeneratedSql};

use sluice_core::{
    query::QueryModel,
    schema::{ColumnType, TableSchema},
    stmt::{Expr, ExprColumn, ResolveColumn, SourceId, Value},
    Result,
};
use std::sync::Arc;

/// Compiles query models and scalar expressions to SQL for one dialect.
///
/// Serialization is pure: the same input always produces the same text and
/// parameter list.
#[derive(Debug, Clone, Copy)]
pub struct Serializer {
    dialect: Dialect,
}

struct Formatter<'a, P> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut P,

    /// Rows in scope, innermost last. Column references resolve against the
    /// scope whose source matches.
    scopes: Vec<Scope>,

    /// True when column names are prefixed with their table name. Set while
    /// writing a correlated subquery.
    qualify: bool,
}

struct Scope {
    source: SourceId,
    table: Arc<TableSchema>,
}

impl Serializer {
    pub fn new(dialect: Dialect) -> Serializer {
        Serializer { dialect }
    }

    pub fn sqlite() -> Serializer {
        Serializer::new(Dialect::Sqlite)
    }

    pub fn sql_server() -> Serializer {
        Serializer::new(Dialect::SqlServer)
    }

    pub fn postgresql() -> Serializer {
        Serializer::new(Dialect::PostgreSql)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Generates the SELECT statement for `model`.
    pub fn generate(&self, model: &QueryModel) -> Result<GeneratedSql> {
        let mut parameters = vec![];
        let command_text = self.serialize(model, &mut parameters)?;

        log::debug!(
            "generated SQL; dialect={} params={} sql={}",
            self.dialect,
            parameters.len(),
            command_text
        );

        Ok(GeneratedSql {
            command_text,
            parameters,
        })
    }

    /// Writes the SELECT statement for `model`, appending its parameters to
    /// `params`.
    pub fn serialize(&self, model: &QueryModel, params: &mut impl Params) -> Result<String> {
        let mut ret = String::new();
        let mut f = Formatter::new(self, &mut ret, params);

        Select(model).to_sql(&mut f)?;

        Ok(ret)
    }

    /// Translates a scalar expression over `model`'s row into a SQL fragment,
    /// appending parameters to `params` in the order their placeholders are
    /// written.
    ///
    /// Predicates are written in boolean form; anything else is written as a
    /// value.
    pub fn translate(
        &self,
        expr: &Expr,
        model: &QueryModel,
        params: &mut impl Params,
    ) -> Result<String> {
        let mut ret = String::new();
        let mut f = Formatter::new(self, &mut ret, params);
        f.push_scope(model);

        log::trace!("translating {}; dialect={}", expr.describe(), self.dialect);

        if expr.is_predicate() {
            Predicate(expr).to_sql(&mut f)?;
        } else {
            Operand(expr).to_sql(&mut f)?;
        }

        Ok(ret)
    }
}

impl<'a, P: Params> Formatter<'a, P> {
    fn new(serializer: &'a Serializer, dst: &'a mut String, params: &'a mut P) -> Self {
        Formatter {
            serializer,
            dst,
            params,
            scopes: vec![],
            qualify: false,
        }
    }

    fn dialect(&self) -> Dialect {
        self.serializer.dialect
    }

    fn push_scope(&mut self, model: &QueryModel) {
        self.scopes.push(Scope {
            source: model.source,
            table: model.table.clone(),
        });
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn scope(&self, source: SourceId) -> Option<&Scope> {
        self.scopes.iter().rev().find(|scope| scope.source == source)
    }

    /// Name of the innermost table, for error messages.
    fn current_table_name(&self) -> &str {
        self.scopes
            .last()
            .map(|scope| scope.table.name.as_str())
            .unwrap_or("<none>")
    }

    fn infer_ty(&self, expr: &Expr) -> Option<ColumnType> {
        expr.infer_ty(self)
    }

    /// Adds a parameter and returns its placeholder.
    fn param(&mut self, value: &Value) -> Placeholder {
        self.params.push(value)
    }
}

impl<P> ResolveColumn for Formatter<'_, P> {
    fn column_ty(&self, column: &ExprColumn) -> Option<ColumnType> {
        let scope = self
            .scopes
            .iter()
            .rev()
            .find(|scope| scope.source == column.source)?;
        scope.table.column(column.column).map(|column| column.ty)
    }
}
