use super::Session;
use crate::{schema, Result, Table};

use sluice_core::{schema::TableSchema, Error};
use sluice_sql::{Dialect, Serializer};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    /// Dialect set explicitly
    dialect: Option<Dialect>,

    /// Connection URL, if one was given
    url: Option<String>,

    /// Type name of the connection the generated SQL will run on
    connection: Option<&'static str>,

    /// Mappings to resolve when the session is built
    tables: Vec<fn() -> Result<Arc<TableSchema>>>,
}

impl Builder {
    pub fn dialect(&mut self, dialect: Dialect) -> &mut Self {
        self.dialect = Some(dialect);
        self
    }

    /// Picks the dialect from a connection URL such as
    /// `postgresql://localhost/app` or `sqlite://app.db`.
    pub fn url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = Some(url.into());
        self
    }

    /// Picks the dialect from the type of connection the SQL will run on.
    pub fn connection<C: ?Sized>(&mut self) -> &mut Self {
        self.connection = Some(std::any::type_name::<C>());
        self
    }

    /// Maps `T` when the session is built, so a bad mapping is reported up
    /// front rather than by the first query.
    pub fn register<T: Table>(&mut self) -> &mut Self {
        self.tables.push(schema::cached::<T>);
        self
    }

    pub fn build(&self) -> Result<Session> {
        let dialect = self.resolve_dialect()?;

        let tables = self
            .tables
            .iter()
            .map(|table| table())
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "session built; dialect={} tables={}",
            dialect,
            tables.len()
        );

        Ok(Session {
            serializer: Serializer::new(dialect),
            tables: tables.into(),
        })
    }

    /// Every configured source of the dialect must agree.
    fn resolve_dialect(&self) -> Result<Dialect> {
        let mut candidates = vec![];

        if let Some(dialect) = self.dialect {
            candidates.push(("dialect", dialect));
        }

        if let Some(url) = &self.url {
            candidates.push(("url", Dialect::from_url(url)?));
        }

        if let Some(type_name) = self.connection {
            let dialect = Dialect::from_connection_type_name(type_name).ok_or_else(|| {
                Error::invalid_argument(format!(
                    "connection type `{type_name}` does not name a supported dialect"
                ))
            })?;

            candidates.push(("connection", dialect));
        }

        let Some(&(_, dialect)) = candidates.first() else {
            return Err(Error::invalid_argument(
                "no dialect configured; set one with `dialect`, `url` or `connection`",
            ));
        };

        if let Some((source, other)) = candidates.iter().find(|(_, other)| *other != dialect) {
            return Err(Error::invalid_argument(format!(
                "{source} selects dialect {other}, but {} selects {dialect}",
                candidates[0].0
            )));
        }

        Ok(dialect)
    }
}
