mod builder;
pub use builder::Builder;

use crate::{stmt::Expr, Query, Result, Table};

use sluice_core::schema::TableSchema;
use sluice_sql::{Dialect, GeneratedSql, Serializer};
use std::sync::Arc;

/// Compiles queries for one SQL dialect.
///
/// A session holds no connection. It is cheap to clone and can be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct Session {
    serializer: Serializer,

    /// Mappings registered when the session was built
    tables: Arc<[Arc<TableSchema>]>,
}

impl Session {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// A session for `dialect` with no registered tables. Tables are mapped
    /// on first use either way.
    pub fn new(dialect: Dialect) -> Session {
        Session {
            serializer: Serializer::new(dialect),
            tables: Vec::new().into(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.serializer.dialect()
    }

    /// Mappings registered with the builder, in registration order.
    pub fn tables(&self) -> impl ExactSizeIterator<Item = &TableSchema> + '_ {
        self.tables.iter().map(|table| &**table)
    }

    /// Compiles `query` into a SELECT statement and its parameters.
    pub fn compile<M: Table>(&self, query: &Query<M>) -> Result<GeneratedSql> {
        let model = query.model()?;
        self.serializer.generate(&model)
    }

    /// Translates a scalar expression over `query`'s row into a SQL fragment.
    ///
    /// Predicates are written in boolean form; anything else is written as a
    /// value.
    pub fn translate<M: Table, T: ?Sized>(
        &self,
        query: &Query<M>,
        f: impl FnOnce(&M::Fields) -> Expr<T>,
    ) -> Result<GeneratedSql> {
        let model = query.model()?;
        let expr = f(&query.fields()).untyped?;

        let mut parameters = vec![];
        let command_text = self
            .serializer
            .translate(&expr, &model, &mut parameters)?;

        Ok(GeneratedSql {
            command_text,
            parameters,
        })
    }
}
