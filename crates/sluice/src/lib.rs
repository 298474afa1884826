pub mod query;
pub use query::Query;

pub mod schema;

pub mod session;
pub use session::Session;

pub mod stmt;

mod table;
pub use table::Table;

pub use sluice_core::{Error, Result};
pub use sluice_macros::{Enum, Table};
pub use sluice_sql::{Dialect, GeneratedSql};

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{
        stmt::{Path, Primitive},
        Result, Table,
    };
    pub use sluice_core::{
        schema::{Column, ColumnType, TableSchema},
        stmt::{SourceId, Value},
    };
}
