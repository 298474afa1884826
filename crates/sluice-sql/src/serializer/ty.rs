use crate::Dialect;

use sluice_core::schema::ColumnType;

/// The SQL type a conversion to `ty` casts to, or `None` when the dialect has
/// no conversion for it.
pub(super) fn cast_type_name(dialect: Dialect, ty: ColumnType) -> Option<&'static str> {
    use ColumnType::*;

    Some(match dialect {
        Dialect::Sqlite => match ty {
            Int | Bool => "INTEGER",
            Float => "REAL",
            Text | DateTime | Guid => "TEXT",
            Blob | Enum => return None,
        },
        Dialect::SqlServer => match ty {
            Int => "BIGINT",
            Float => "FLOAT",
            Text => "NVARCHAR(MAX)",
            Bool => "BIT",
            DateTime => "DATETIME2",
            Guid => "UNIQUEIDENTIFIER",
            Blob | Enum => return None,
        },
        Dialect::PostgreSql => match ty {
            Int => "bigint",
            Float => "double precision",
            Text => "text",
            Bool => "boolean",
            DateTime => "timestamp",
            Guid => "uuid",
            Blob | Enum => return None,
        },
    })
}
