use pretty_assertions::assert_eq;
use sluice_core::schema::{Column, ColumnType, TableSchema};

fn users() -> TableSchema {
    TableSchema::builder("Users")
        .column(Column::new("Id", "id", ColumnType::Int).primary_key())
        .column(Column::new("UserName", "name", ColumnType::Text))
        .column(Column::new("Age", "age", ColumnType::Int).nullable(true))
        .build()
        .unwrap()
}

#[test]
fn lookup_by_member_and_name() {
    let table = users();

    let (index, column) = table.column_by_member("name").unwrap();
    assert_eq!(index, 1);
    assert_eq!(column.name, "UserName");

    let (index, column) = table.column_by_name("Age").unwrap();
    assert_eq!(index, 2);
    assert!(column.nullable);

    assert!(table.column_by_member("UserName").is_none());
    assert!(table.column_by_name("name").is_none());
}

#[test]
fn columns_keep_declaration_order() {
    let table = users();
    let names: Vec<_> = table.columns().map(|column| column.name.as_str()).collect();
    assert_eq!(names, ["Id", "UserName", "Age"]);
}

#[test]
fn primary_key() {
    let table = users();
    assert_eq!(table.primary_key_index(), Some(0));
    assert_eq!(table.primary_key().unwrap().name, "Id");
}

#[test]
fn resolve_unmapped_member() {
    let err = users().resolve_member("nickname").unwrap_err();
    assert!(err.is_unresolvable_member());
    assert_eq!(
        err.to_string(),
        "member `nickname` has no mapped column in table `Users`"
    );
}

#[test]
fn duplicate_column_name() {
    let err = TableSchema::builder("Users")
        .column(Column::new("Id", "id", ColumnType::Int))
        .column(Column::new("Id", "other_id", ColumnType::Int))
        .build()
        .unwrap_err();

    assert!(err.is_invalid_schema());
    assert_eq!(
        err.to_string(),
        "invalid schema: duplicate column `Id` in table `Users`"
    );
}

#[test]
fn duplicate_member_name() {
    let err = TableSchema::builder("Users")
        .column(Column::new("Id", "id", ColumnType::Int))
        .column(Column::new("LegacyId", "id", ColumnType::Int))
        .build()
        .unwrap_err();

    assert!(err.is_invalid_schema());
}

#[test]
fn two_primary_keys() {
    let err = TableSchema::builder("Users")
        .column(Column::new("Id", "id", ColumnType::Int).primary_key())
        .column(Column::new("Key", "key", ColumnType::Guid).primary_key())
        .build()
        .unwrap_err();

    assert!(err.is_invalid_schema());
}

#[test]
fn empty_table_name() {
    assert!(TableSchema::builder("").build().unwrap_err().is_invalid_schema());
}

#[test]
fn widening() {
    assert!(ColumnType::Int.widens_to(ColumnType::Float));
    assert!(ColumnType::Enum.widens_to(ColumnType::Int));
    assert!(ColumnType::Text.widens_to(ColumnType::Text));
    assert!(!ColumnType::Float.widens_to(ColumnType::Int));
    assert!(!ColumnType::Int.widens_to(ColumnType::Text));
}
