#![allow(dead_code)]

use sluice_core::{
    query::{build, Operation, QueryModel},
    schema::{Column, ColumnType, TableSchema},
    stmt::{Expr, SourceId, Value},
};
use sluice_sql::{Dialect, GeneratedSql, Serializer};
use std::sync::Arc;

pub const DIALECTS: [Dialect; 3] = [Dialect::Sqlite, Dialect::SqlServer, Dialect::PostgreSql];

pub mod user {
    pub const ID: usize = 0;
    pub const NAME: usize = 1;
    pub const AGE: usize = 2;
    pub const SCORE: usize = 3;
    pub const ACTIVE: usize = 4;
    pub const CREATED_AT: usize = 5;
    pub const EXTERNAL_ID: usize = 6;
    pub const FLAGS: usize = 7;
}

pub mod order {
    pub const ID: usize = 0;
    pub const USER_ID: usize = 1;
    pub const TOTAL: usize = 2;
    pub const NOTE: usize = 3;
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn users_table() -> Arc<TableSchema> {
    Arc::new(
        TableSchema::builder("Users")
            .column(Column::new("Id", "id", ColumnType::Int).primary_key())
            .column(Column::new("Name", "name", ColumnType::Text))
            .column(Column::new("Age", "age", ColumnType::Int))
            .column(Column::new("Score", "score", ColumnType::Float).nullable(true))
            .column(Column::new("Active", "active", ColumnType::Bool))
            .column(Column::new("CreatedAt", "created_at", ColumnType::DateTime))
            .column(Column::new("ExternalId", "external_id", ColumnType::Guid).nullable(true))
            .column(Column::new("Flags", "flags", ColumnType::Int))
            .build()
            .unwrap(),
    )
}

pub fn orders_table() -> Arc<TableSchema> {
    Arc::new(
        TableSchema::builder("Orders")
            .column(Column::new("Id", "id", ColumnType::Int).primary_key())
            .column(Column::new("UserId", "user_id", ColumnType::Int))
            .column(Column::new("Total", "total", ColumnType::Float))
            .column(Column::new("Note", "note", ColumnType::Text).nullable(true))
            .build()
            .unwrap(),
    )
}

/// A table without a primary key
pub fn events_table() -> Arc<TableSchema> {
    Arc::new(
        TableSchema::builder("Events")
            .column(Column::new("Name", "name", ColumnType::Text))
            .build()
            .unwrap(),
    )
}

pub fn users() -> QueryModel {
    QueryModel::new(users_table(), SourceId::generate())
}

pub fn orders() -> QueryModel {
    QueryModel::new(orders_table(), SourceId::generate())
}

pub fn compile(
    dialect: Dialect,
    model: QueryModel,
    operations: impl IntoIterator<Item = Operation>,
) -> GeneratedSql {
    init_logging();
    let model = build(model, operations).unwrap();
    Serializer::new(dialect).generate(&model).unwrap()
}

/// Compiles `SELECT * FROM [Users] WHERE <predicate>` and returns the SQL
/// after `WHERE `, with the parameters.
pub fn filter(dialect: Dialect, predicate: impl FnOnce(&QueryModel) -> Expr) -> (String, Vec<Value>) {
    let model = users();
    let predicate = predicate(&model);
    let sql = compile(dialect, model, [Operation::filter(predicate)]);

    let prefix = format!(
        "SELECT * FROM {} WHERE ",
        dialect.escape_identifier("Users")
    );
    let text = sql
        .command_text
        .strip_prefix(&prefix)
        .unwrap_or_else(|| panic!("unexpected SQL: {}", sql.command_text))
        .to_string();

    (text, sql.parameters)
}

/// Translates `expr` as a value over the users row.
pub fn value(dialect: Dialect, expr: impl FnOnce(&QueryModel) -> Expr) -> (String, Vec<Value>) {
    init_logging();
    let model = users();
    let expr = expr(&model);
    let mut params = vec![];
    let text = Serializer::new(dialect)
        .translate(&expr, &model, &mut params)
        .unwrap();
    (text, params)
}

/// Translation error for `expr` over the users row.
pub fn translate_err(
    dialect: Dialect,
    expr: impl FnOnce(&QueryModel) -> Expr,
) -> sluice_core::Error {
    let model = users();
    let expr = expr(&model);
    let mut params = vec![];
    Serializer::new(dialect)
        .translate(&expr, &model, &mut params)
        .unwrap_err()
}
