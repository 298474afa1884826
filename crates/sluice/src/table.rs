use crate::Result;

use sluice_core::{schema::TableSchema, stmt::SourceId};

/// A Rust type mapped onto a database table.
///
/// Usually implemented with `#[derive(Table)]`.
pub trait Table: Sized + 'static {
    /// Typed accessors for the table's columns, bound to one query's row
    type Fields;

    /// The table's mapping. Called once per type; the result is cached.
    fn schema() -> Result<TableSchema>;

    /// Column accessors reading from the row identified by `source`.
    fn fields(source: SourceId) -> Self::Fields;
}
