mod common;
use common::*;

use pretty_assertions::assert_eq;
use sluice::{
    schema,
    stmt::{Path, Primitive},
    Query, Result, Table,
};
use sluice_core::schema::{Column, ColumnType, TableSchema};
use sluice_core::stmt::{SourceId, Value};
use std::sync::Arc;

#[test]
fn derived_mapping() {
    let table = User::schema().unwrap();

    assert_eq!(table.name, "Users");

    let columns: Vec<_> = table
        .columns()
        .map(|column| {
            (
                column.name.as_str(),
                column.member_name.as_str(),
                column.ty,
                column.nullable,
            )
        })
        .collect();

    assert_eq!(
        columns,
        [
            ("Id", "id", ColumnType::Int, false),
            ("Name", "name", ColumnType::Text, false),
            ("Age", "age", ColumnType::Int, false),
            ("Score", "score", ColumnType::Float, true),
            ("Active", "active", ColumnType::Bool, false),
            ("CreatedAt", "created_at", ColumnType::DateTime, false),
            ("ExternalId", "external_id", ColumnType::Guid, true),
            ("Flags", "flags", ColumnType::Int, false),
            ("Status", "status", ColumnType::Enum, false),
            ("Nick", "nickname", ColumnType::Text, true),
            ("Level", "level", ColumnType::Enum, false),
        ]
    );

    assert_eq!(table.primary_key_index(), Some(0));
    assert_eq!(table.resolve_member("nickname").unwrap(), 9);
}

#[test]
fn table_name_defaults_to_struct_name() {
    let table = Event::schema().unwrap();
    assert_eq!(table.name, "Event");
    assert!(table.primary_key().is_none());
}

#[test]
fn field_accessors_follow_declaration_order() {
    let source = SourceId::generate();
    let fields = User::fields(source);

    assert_eq!(fields.id().index(), 0);
    assert_eq!(fields.nickname().index(), 9);
    assert_eq!(fields.level().source(), source);
}

#[test]
fn enums_bind_their_discriminant() {
    assert_eq!(<Status as Primitive>::TYPE, ColumnType::Enum);
    assert_eq!(Status::Banned.into_value(), Value::Enum(2));

    let sql = compile(
        sluice::Dialect::Sqlite,
        users().filter(|u| u.status().eq(Status::Suspended)),
    );
    assert_eq!(sql.command_text, "SELECT * FROM [Users] WHERE ([Status] = $p1)");
    assert_eq!(sql.parameters, vec![Value::Enum(1)]);
}

#[test]
fn mappings_are_cached_per_type() {
    let first = schema::cached::<Order>().unwrap();
    let second = schema::cached::<Order>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let users = schema::cached::<User>().unwrap();
    assert!(!Arc::ptr_eq(&first, &users));
    assert_eq!(users.name, "Users");
}

/// Hand-written mapping with two columns of the same name.
struct Broken;

struct BrokenFields {
    source: SourceId,
}

impl BrokenFields {
    fn id(&self) -> Path<i64> {
        Path::new(self.source, 0)
    }
}

impl Table for Broken {
    type Fields = BrokenFields;

    fn schema() -> Result<TableSchema> {
        TableSchema::builder("Broken")
            .column(Column::new("Id", "id", ColumnType::Int).primary_key())
            .column(Column::new("Id", "other_id", ColumnType::Int))
            .build()
    }

    fn fields(source: SourceId) -> BrokenFields {
        BrokenFields { source }
    }
}

#[test]
fn broken_mapping_is_reported_by_every_use() {
    for _ in 0..2 {
        let err = schema::cached::<Broken>().unwrap_err();
        assert!(err.is_invalid_schema());
        assert_eq!(
            err.to_string(),
            "invalid schema: duplicate column `Id` in table `Broken`"
        );
    }

    let err = compile_err(sluice::Dialect::Sqlite, Query::<Broken>::all());
    assert!(err.is_invalid_schema());
}

#[test]
fn broken_subquery_mapping_surfaces_at_compile() {
    let query = users().filter(|u| u.id().in_query(Query::<Broken>::all().select(|b| b.id())));

    let err = compile_err(sluice::Dialect::Sqlite, query);
    assert!(err.is_invalid_schema());
}
