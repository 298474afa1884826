use super::{Column, TableSchema};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::collections::HashMap;

/// Assembles a [`TableSchema`], validating column uniqueness on `build`.
#[derive(Debug)]
pub struct Builder {
    name: String,
    columns: Vec<Column>,
}

impl Builder {
    pub(super) fn new(name: impl Into<String>) -> Builder {
        Builder {
            name: name.into(),
            columns: vec![],
        }
    }

    pub fn column(mut self, column: Column) -> Builder {
        self.columns.push(column);
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Builder {
        self.columns.extend(columns);
        self
    }

    pub fn build(self) -> Result<TableSchema> {
        if self.name.is_empty() {
            return Err(Error::invalid_schema("table name must not be empty"));
        }

        let mut columns = IndexMap::with_capacity(self.columns.len());
        let mut by_name = HashMap::with_capacity(self.columns.len());
        let mut primary_key = None;

        for (index, column) in self.columns.into_iter().enumerate() {
            if column.name.is_empty() || column.member_name.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "column #{index} of table `{}` has an empty name",
                    self.name
                )));
            }

            if by_name.insert(column.name.clone(), index).is_some() {
                return Err(Error::invalid_schema(format!(
                    "duplicate column `{}` in table `{}`",
                    column.name, self.name
                )));
            }

            if column.primary_key {
                if let Some(existing) = primary_key.replace(index) {
                    return Err(Error::invalid_schema(format!(
                        "table `{}` declares more than one primary key column (#{existing} and #{index})",
                        self.name
                    )));
                }
            }

            if let Some(prev) = columns.insert(column.member_name.clone(), column) {
                return Err(Error::invalid_schema(format!(
                    "duplicate member `{}` in table `{}`",
                    prev.member_name, self.name
                )));
            }
        }

        Ok(TableSchema {
            name: self.name,
            columns,
            by_name,
            primary_key,
        })
    }
}
