use super::{Builder, Column};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::collections::HashMap;

/// Static description of a mapped table.
///
/// Built once per mapped type and immutable afterwards. Columns are kept in
/// declaration order and can be looked up by member name or SQL name in
/// constant time.
#[derive(Debug, PartialEq)]
pub struct TableSchema {
    /// Name of the table
    pub name: String,

    /// Columns keyed by member name, in declaration order
    pub(super) columns: IndexMap<String, Column>,

    /// Column SQL name to column index
    pub(super) by_name: HashMap<String, usize>,

    /// Index of the primary key column, if the table has one
    pub(super) primary_key: Option<usize>,
}

impl TableSchema {
    pub fn builder(name: impl Into<String>) -> Builder {
        Builder::new(name)
    }

    /// Columns in declaration order
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.columns.values()
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get_index(index).map(|(_, column)| column)
    }

    /// Looks up a column by the name of the field it is mapped from.
    pub fn column_by_member(&self, member_name: &str) -> Option<(usize, &Column)> {
        self.columns
            .get_full(member_name)
            .map(|(index, _, column)| (index, column))
    }

    /// Looks up a column by its SQL name.
    pub fn column_by_name(&self, name: &str) -> Option<(usize, &Column)> {
        let index = *self.by_name.get(name)?;
        self.column(index).map(|column| (index, column))
    }

    /// Resolves a member name to a column index, failing if the member is not
    /// mapped.
    pub fn resolve_member(&self, member_name: &str) -> Result<usize> {
        self.columns
            .get_index_of(member_name)
            .ok_or_else(|| Error::unresolvable_member(member_name, &self.name))
    }

    /// Resolves a column index, failing if it is out of range.
    pub fn resolve(&self, index: usize) -> Result<&Column> {
        self.column(index)
            .ok_or_else(|| Error::unresolvable_member(format!("#{index}"), &self.name))
    }

    pub fn primary_key(&self) -> Option<&Column> {
        self.primary_key.and_then(|index| self.column(index))
    }

    pub fn primary_key_index(&self) -> Option<usize> {
        self.primary_key
    }
}
